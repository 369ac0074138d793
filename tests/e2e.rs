mod common;

use common::synthetic_image::{checkerboard, step_edge, textured, textured_rgb};
use local_laplacian::image::io::{load_image, save_buffer, save_image, DynamicBuffer};
use local_laplacian::{FilterParams, LocalLaplacianFilter, PixelBuffer};
use nalgebra::Vector3;

fn mean_abs_deviation(img: &PixelBuffer<f64>, center: f64) -> f64 {
    img.data.iter().map(|v| (v - center).abs()).sum::<f64>() / img.data.len() as f64
}

fn max_horizontal_jump(img: &PixelBuffer<f64>) -> f64 {
    let mut max = 0.0f64;
    for y in 0..img.h {
        for x in 1..img.w {
            max = max.max((img.get(x, y) - img.get(x - 1, y)).abs());
        }
    }
    max
}

#[test]
fn unit_alpha_and_beta_reproduce_the_input() {
    let _ = env_logger::builder().is_test(true).try_init();
    let img = textured(64, 64);
    let filter = LocalLaplacianFilter::new(FilterParams::new(1.0, 1.0, 0.3)).unwrap();
    let out = filter.run(&img).unwrap();

    assert_eq!((out.image.w, out.image.h), (64, 64));
    assert_eq!(out.pyramid.num_levels(), 2);
    let err = out.image.max_abs_diff(&img);
    assert!(err < 1e-9, "identity filter changed the image by {err}");
}

#[test]
fn default_tone_mapping_leaves_low_contrast_images_untouched() {
    // Every difference stays below sigma_r, so only the detail branch with
    // alpha = 1 is ever taken.
    let img = checkerboard(64, 64, 4, 0.45, 0.55);
    let filter = LocalLaplacianFilter::new(FilterParams::default()).unwrap();
    let out = filter.apply(&img).unwrap();
    let err = out.max_abs_diff(&img);
    assert!(err < 1e-9, "low-contrast image changed by {err}");
}

#[test]
fn zero_beta_compresses_strong_edges() {
    let img = step_edge(64, 48, 0.1, 0.9);
    let params = FilterParams::new(1.0, 0.0, 0.3).with_residual_size(8);
    let filter = LocalLaplacianFilter::new(params).unwrap();
    let out = filter.apply(&img).unwrap();

    assert!(out.data.iter().all(|v| v.is_finite()));
    let before = max_horizontal_jump(&img);
    let after = max_horizontal_jump(&out);
    assert!(
        after < before - 0.05,
        "edge not compressed: jump {before:.3} -> {after:.3}"
    );
}

#[test]
fn small_alpha_boosts_fine_detail() {
    let img = checkerboard(48, 48, 2, 0.45, 0.55);
    let filter = LocalLaplacianFilter::new(FilterParams::new(0.25, 1.0, 0.4)).unwrap();
    let out = filter.apply(&img).unwrap();
    let before = mean_abs_deviation(&img, 0.5);
    let after = mean_abs_deviation(&out, 0.5);
    assert!(after > before, "detail not enhanced: {before:.4} -> {after:.4}");
}

#[test]
fn rgb_images_are_filtered_per_pixel_vector() {
    let img = textured_rgb(40, 33);
    let identity = LocalLaplacianFilter::new(FilterParams::new(1.0, 1.0, 0.2)).unwrap();
    let out = identity.apply(&img).unwrap();
    assert!(out.max_abs_diff(&img) < 1e-9);

    let tone = LocalLaplacianFilter::new(FilterParams::new(1.0, 0.0, 0.1)).unwrap();
    let mapped = tone.apply(&img).unwrap();
    assert_eq!((mapped.w, mapped.h), (40, 33));
    assert!(mapped.data.iter().all(|p| p.iter().all(|c| c.is_finite())));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_and_sequential_runs_agree() {
    let img = textured(50, 41);
    let params = FilterParams::new(0.5, 0.5, 0.2).with_residual_size(10);
    let seq = LocalLaplacianFilter::new(params.with_parallel(false))
        .unwrap()
        .apply(&img)
        .unwrap();
    let par = LocalLaplacianFilter::new(params.with_parallel(true))
        .unwrap()
        .apply(&img)
        .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn thin_images_are_supported() {
    let filter = LocalLaplacianFilter::new(FilterParams::new(1.0, 1.0, 0.3)).unwrap();
    for &(w, h) in &[(1, 20), (20, 1), (1, 1), (3, 2)] {
        let img = PixelBuffer::from_fn(w, h, |x, y| 0.2 + 0.03 * x as f64 + 0.02 * y as f64);
        let out = filter.apply(&img).unwrap();
        assert_eq!((out.w, out.h), (w, h));
        assert!(out.max_abs_diff(&img) < 1e-9, "{w}x{h}");
    }
}

#[test]
fn report_serializes_with_per_level_entries() {
    let img = textured(40, 40);
    let params = FilterParams::new(0.5, 1.0, 0.2).with_residual_size(8);
    let out = LocalLaplacianFilter::new(params).unwrap().run(&img).unwrap();
    let json = serde_json::to_value(&out.report).unwrap();

    assert_eq!(json["input"]["width"], 40);
    assert_eq!(json["input"]["channels"], 1);
    assert_eq!(json["input"]["pyramidLevels"], 3);
    assert_eq!(json["levels"].as_array().unwrap().len(), 3);
    assert_eq!(json["levels"][1]["footprint"], 21);
    assert_eq!(json["outputPyramid"]["levels"].as_array().unwrap().len(), 4);
    assert!(json["timings"]["totalMs"].as_f64().unwrap() >= 0.0);
    assert_eq!(json["params"]["alpha"], 0.5);
}

#[test]
fn saved_images_load_back_as_gray() {
    let img = step_edge(16, 8, 0.0, 1.0);
    let dir = std::env::temp_dir().join(format!("llf_e2e_{}", std::process::id()));
    let path = dir.join("step.png");
    save_buffer(&img, &path).unwrap();
    match load_image(&path).unwrap() {
        DynamicBuffer::Gray(loaded) => assert!(loaded.max_abs_diff(&img) < 1e-12),
        other => panic!("expected gray image, got {} channels", other.channels()),
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rgb_images_survive_a_save_and_load_cycle() {
    let img = PixelBuffer::from_fn(6, 4, |x, y| {
        Vector3::new(x as f64 / 5.0, y as f64 / 3.0, 1.0)
    });
    let original = DynamicBuffer::Rgb(img);
    let dir = std::env::temp_dir().join(format!("llf_e2e_rgb_{}", std::process::id()));
    let path = dir.join("original.png");
    save_image(&original, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.channels(), 3);
    assert_eq!((loaded.width(), loaded.height()), (6, 4));
    match (&loaded, &original) {
        (DynamicBuffer::Rgb(a), DynamicBuffer::Rgb(b)) => assert!(a.max_abs_diff(b) < 1.0 / 255.0),
        _ => panic!("expected rgb buffers"),
    }
    let _ = std::fs::remove_dir_all(&dir);
}
