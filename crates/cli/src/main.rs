use std::path::PathBuf;
use std::process;

use clap::Parser;

use facelift_core::io::image_file::is_supported;
use facelift_core::pipeline::infrastructure::worker::{self, RestoreJob, WorkerMessage};

/// Face detection and restoration for still images.
#[derive(Parser)]
#[command(name = "facelift")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file.
    output: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// NMS IoU threshold for deduplicating detections (0.0-1.0).
    #[arg(long, default_value = "0.45")]
    iou: f64,

    /// Crop coverage: how far the restoration crop extends beyond the
    /// detected face (fraction of box size per side).
    #[arg(long, default_value = "0.25")]
    padding: f64,

    /// Directory searched for pre-bundled models before downloading.
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let rx = worker::spawn(RestoreJob {
        input_path: cli.input,
        output_path: cli.output.clone(),
        confidence: cli.confidence,
        iou_threshold: cli.iou,
        crop_padding: cli.padding,
        model_dir: cli.model_dir,
    });

    for message in rx {
        match message {
            WorkerMessage::DownloadProgress(downloaded, total) => {
                if total > 0 {
                    log::info!(
                        "downloading models: {:.0}%",
                        downloaded as f64 / total as f64 * 100.0
                    );
                } else {
                    log::info!("downloading models: {downloaded} bytes");
                }
            }
            WorkerMessage::Progress(phase, percent) => {
                log::info!("{}: {percent}%", phase.as_str());
            }
            WorkerMessage::Complete { face_count } => {
                if face_count == 0 {
                    println!("No faces detected; wrote an unchanged copy to {}", cli.output.display());
                } else {
                    println!("Restored {face_count} face(s) → {}", cli.output.display());
                }
                return Ok(());
            }
            WorkerMessage::Failed(message) => {
                return Err(message.into());
            }
        }
    }

    Err("worker exited without reporting a result".into())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("input file does not exist: {}", cli.input.display()).into());
    }
    if !is_supported(&cli.input) {
        return Err(format!("unsupported input format: {}", cli.input.display()).into());
    }
    if !is_supported(&cli.output) {
        return Err(format!("unsupported output format: {}", cli.output.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err("confidence must be between 0.0 and 1.0".into());
    }
    if !(0.0..=1.0).contains(&cli.iou) {
        return Err("iou must be between 0.0 and 1.0".into());
    }
    if !(0.0..=1.0).contains(&cli.padding) {
        return Err("padding must be between 0.0 and 1.0".into());
    }
    Ok(())
}
