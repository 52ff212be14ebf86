use scene2pdf::export::{ExportSession, SurfaceConfig};
use scene2pdf::scenes::{build_scene, SCENE_NAMES};
use std::env;
use std::process;

fn usage(program: &str) -> ! {
    eprintln!("Scene Exporter");
    eprintln!("Usage: {} <scene> <output.pdf> [options]", program);
    eprintln!("\nScenes: {}", SCENE_NAMES.join(", "));
    eprintln!("\nOptions:");
    eprintln!("  --png <path>         Also write the rasterized frame as PNG");
    eprintln!("  --size <WxH>         Surface size in pixels (default 500x500)");
    eprintln!("  --background <hex>   Raster background color, e.g. 0E0E0E");
    eprintln!("  --sprite-transforms  Apply node transforms to sprites");
    process::exit(1);
}

fn parse_size(spec: &str) -> Option<(u32, u32)> {
    let (w, h) = spec.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        usage(args.first().map(String::as_str).unwrap_or("scene-export"));
    }

    let scene_name = &args[1];
    let output_path = &args[2];

    let (width, height) = match flag_value(&args, "--size") {
        Some(spec) => match parse_size(&spec) {
            Some(size) => size,
            None => {
                eprintln!("Error: invalid --size '{}', expected WxH", spec);
                process::exit(1);
            }
        },
        None => (500, 500),
    };

    let background = match flag_value(&args, "--background") {
        Some(hex) => match u32::from_str_radix(hex.trim_start_matches("0x"), 16) {
            Ok(color) => Some(color),
            Err(_) => {
                eprintln!("Error: invalid --background '{}', expected hex digits", hex);
                process::exit(1);
            }
        },
        None => None,
    };

    let png_path = flag_value(&args, "--png");
    let sprite_transforms = args.iter().any(|arg| arg == "--sprite-transforms");

    let Some(scene) = build_scene(scene_name, width, height) else {
        eprintln!("Error: unknown scene '{}'", scene_name);
        eprintln!("Available scenes: {}", SCENE_NAMES.join(", "));
        process::exit(1);
    };

    let mut surface = SurfaceConfig::new(width, height);
    if let Some(color) = background {
        surface = surface.with_background(color);
    }

    let session = match ExportSession::new(surface) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let session = session.with_options(scene2pdf::WalkerOptions { sprite_transforms });

    let output = match session.export_pdf(&scene).await {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error exporting scene '{}': {}", scene_name, e);
            process::exit(1);
        }
    };

    if let Err(e) = tokio::fs::write(output_path, &output.pdf).await {
        eprintln!("Error writing {}: {}", output_path, e);
        process::exit(1);
    }
    println!("Wrote {} ({} bytes)", output_path, output.pdf.len());

    if let Some(path) = png_path {
        let png = match output.frame.encode_png() {
            Ok(png) => png,
            Err(e) => {
                eprintln!("Error encoding PNG: {}", e);
                process::exit(1);
            }
        };
        if let Err(e) = tokio::fs::write(&path, &png).await {
            eprintln!("Error writing {}: {}", path, e);
            process::exit(1);
        }
        println!("Wrote {} ({} bytes)", path, png.len());
    }
}
