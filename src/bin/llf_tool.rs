use local_laplacian::config::filter::{self, FilterOutputConfig};
use local_laplacian::filter::{FilterOutput, LocalLaplacianFilter};
use local_laplacian::image::io::{
    detail_visualization, load_image, save_buffer, save_image, write_json_file, DynamicBuffer,
};
use local_laplacian::image::{Pixel, PixelBuffer};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = env_logger::try_init();
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = filter::load_config(Path::new(&config_path))?;

    let input = load_image(&config.input)?;
    println!(
        "Loaded {} ({}x{}, {} channel(s))",
        config.input.display(),
        input.width(),
        input.height(),
        input.channels()
    );

    let filter = LocalLaplacianFilter::new(config.filter).map_err(|e| e.to_string())?;
    match &input {
        DynamicBuffer::Gray(img) => process(&filter, img, &config.output)?,
        DynamicBuffer::Rgb(img) => process(&filter, img, &config.output)?,
    }

    if let Some(dir) = &config.output.levels_dir {
        save_image(&input, &dir.join("original.png"))?;
    }
    Ok(())
}

fn process<P: Pixel>(
    filter: &LocalLaplacianFilter,
    input: &PixelBuffer<P>,
    output: &FilterOutputConfig,
) -> Result<(), String> {
    let FilterOutput {
        image,
        pyramid,
        report,
    } = filter.run(input).map_err(|e| e.to_string())?;

    save_buffer(&image, &output.image)?;
    println!(
        "Saved filtered image to {} ({} levels, {:.1} ms)",
        output.image.display(),
        pyramid.num_levels(),
        report.timings.total_ms
    );

    if let Some(path) = &output.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }

    if let Some(dir) = &output.levels_dir {
        let details = &pyramid.levels()[..pyramid.num_levels()];
        for (l, level) in details.iter().enumerate() {
            let path = dir.join(format!("level{l}.png"));
            save_buffer(&detail_visualization(level), &path)?;
        }
        println!(
            "Saved {} detail levels to {}",
            pyramid.num_levels(),
            dir.display()
        );
    }

    Ok(())
}

fn usage() -> String {
    "Usage: llf_tool <config.json>".to_string()
}
