use anyhow::Context;
use clap::Parser;
use image::DynamicImage;
use std::path::PathBuf;
use tracing::{info, warn};

use handfinder::AppConfig;
use handfinder::HandDetector;
use handfinder::debug::{DebugOutput, DebugStage, now, snapshot_file_name};
use handfinder::logging::{LogFormat, init_logging};
use handfinder::open_source;
use handfinder::render::render_overlay;

#[derive(Parser)]
#[command(name = "handfinder")]
#[command(about = "Find a hand and its extended fingers in images")]
struct Cli {
    /// Image file, or directory of frames processed in name order
    #[arg(value_name = "INPUT", required_unless_present = "write_default_config")]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Save annotated frames to directory
    #[arg(long, value_name = "DIR")]
    save: Option<PathBuf>,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Write the default configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_default_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    init_logging(level, args.log_format);

    if let Some(path) = &args.write_default_config {
        AppConfig::write_default(path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default configuration written to {}", path.display());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.validate()?;

    let detector = HandDetector::from_config(&config);
    let debug = args.debug_out.map(DebugOutput::new).transpose()?;
    if let Some(dir) = &args.save {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let input = args.input.context("No input given")?;
    let mut source = open_source(&input)?;
    info!(source = source.name(), "Processing frames");

    let mut frame_index = 0usize;
    let mut hands = 0usize;
    while let Some(frame) = source.next_frame()? {
        let skin = detector.get_skin_mask(&frame);
        let mask = detector.clean_mask(&skin);
        let result = detector.detect_in_mask(&mask);

        info!(
            frame = frame_index,
            contours = result.contour_count,
            hand = result.has_hand(),
            fingers = result.finger_count(),
            "Frame processed"
        );
        if result.has_hand() {
            hands += 1;
        } else {
            warn!(frame = frame_index, "No hand found");
        }

        let needs_overlay = args.save.is_some() || debug.is_some();
        let span = config.fingers.span;
        let overlay = needs_overlay.then(|| render_overlay(&frame, &result, span));

        if let Some(debug) = &debug {
            let stages = [
                (DebugStage::Input, DynamicImage::ImageRgb8(frame.clone())),
                (DebugStage::SkinMask, DynamicImage::ImageLuma8(skin)),
                (DebugStage::CleanedMask, DynamicImage::ImageLuma8(mask)),
            ];
            for (stage, image) in &stages {
                debug.save(*stage, frame_index, image)?;
            }
            if let Some(overlay) = &overlay {
                let image = DynamicImage::ImageRgb8(overlay.clone());
                debug.save(DebugStage::Overlay, frame_index, &image)?;
            }
        }

        if let (Some(dir), Some(overlay)) = (&args.save, &overlay) {
            let path = dir.join(snapshot_file_name(now(), frame_index)?);
            overlay
                .save(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
        }

        if let Some(bbox) = result.bounding_box {
            println!(
                "Frame {}: hand at ({}, {}) {}x{} with {} finger(s)",
                frame_index,
                bbox.x,
                bbox.y,
                bbox.width,
                bbox.height,
                result.finger_count()
            );
            if args.verbose {
                for (i, finger) in result.fingers.iter().enumerate() {
                    println!(
                        "  Finger {}: tip ({}, {}) root ({}, {}) length {:.1}",
                        i + 1,
                        finger.tip.x,
                        finger.tip.y,
                        finger.root.x,
                        finger.root.y,
                        finger.length()
                    );
                }
            }
        } else {
            println!("Frame {}: no hand", frame_index);
        }

        frame_index += 1;
    }

    println!("\n=== Hand Detection Results ===");
    println!("Frames processed: {}", frame_index);
    println!("Frames with a hand: {}", hands);

    Ok(())
}
