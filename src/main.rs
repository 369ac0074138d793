use local_laplacian::{FilterParams, LocalLaplacianFilter, PixelBuffer};

fn main() {
    let _ = env_logger::try_init();
    // Demo stub: a soft gradient with a hard step and fine texture on top
    let (w, h) = (160usize, 120usize);
    let img = PixelBuffer::from_fn(w, h, |x, y| {
        let base = if x < w / 2 { 0.15 } else { 0.85 };
        let texture = 0.03 * ((x as f64 * 0.7).sin() * (y as f64 * 0.5).cos());
        base + texture + 0.1 * y as f64 / h as f64
    });

    let filter = match LocalLaplacianFilter::new(FilterParams::new(0.5, 0.3, 0.2)) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match filter.run(&img) {
        Ok(out) => println!(
            "levels={} max_change={:.3} latency_ms={:.3}",
            out.pyramid.num_levels(),
            out.image.max_abs_diff(&img),
            out.report.timings.total_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
