use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::detection::infrastructure::onnx_face_detector::OnnxFaceDetector;
use crate::io::image_file::{read_image, write_image};
use crate::parsing::domain::mask_builder::MaskBuilder;
use crate::parsing::infrastructure::onnx_face_parser::OnnxFaceParser;
use crate::pipeline::progress::{ProgressPhase, ProgressSink};
use crate::pipeline::restore_faces_use_case::RestoreFacesUseCase;
use crate::restoration::infrastructure::onnx_face_restorer::OnnxFaceRestorer;
use crate::shared::constants::{
    DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL, PARSER_MODEL_NAME, PARSER_MODEL_URL,
    RESTORER_MODEL_NAME, RESTORER_MODEL_URL,
};
use crate::shared::model_resolver;

/// Messages sent from the worker thread to its caller.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    DownloadProgress(u64, u64),
    Progress(ProgressPhase, u8),
    Complete { face_count: usize },
    Failed(String),
}

/// Parameters for one restoration request.
pub struct RestoreJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub confidence: f64,
    pub iou_threshold: f64,
    pub crop_padding: f64,
    /// Directory checked for pre-bundled models before downloading.
    pub model_dir: Option<PathBuf>,
}

/// Run one restoration request on a dedicated thread.
///
/// One thread per request; requests are never queued behind each other
/// inside the pipeline. Once started, the job runs to completion or
/// failure — there is no mid-loop cancellation. A caller that loses
/// interest drops the receiver and ignores the result.
pub fn spawn(job: RestoreJob) -> Receiver<WorkerMessage> {
    let (tx, rx) = crossbeam_channel::unbounded::<WorkerMessage>();

    thread::spawn(move || {
        if let Err(e) = run(&tx, &job) {
            let _ = tx.send(WorkerMessage::Failed(e.to_string()));
        }
    });

    rx
}

struct ChannelProgressSink {
    tx: Sender<WorkerMessage>,
}

impl ProgressSink for ChannelProgressSink {
    fn progress(&mut self, phase: ProgressPhase, percent: u8) {
        let _ = self.tx.send(WorkerMessage::Progress(phase, percent));
    }
}

fn resolve_model(
    tx: &Sender<WorkerMessage>,
    name: &str,
    url: &str,
    bundled_dir: Option<&std::path::Path>,
) -> Result<PathBuf, model_resolver::ModelResolveError> {
    let progress_tx = tx.clone();
    model_resolver::resolve(
        name,
        url,
        bundled_dir,
        Some(Box::new(move |downloaded, total| {
            let _ = progress_tx.send(WorkerMessage::DownloadProgress(downloaded, total));
        })),
    )
}

fn run(tx: &Sender<WorkerMessage>, job: &RestoreJob) -> Result<(), Box<dyn std::error::Error>> {
    let bundled = job.model_dir.as_deref();
    let detector_path = resolve_model(tx, DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL, bundled)?;
    let restorer_path = resolve_model(tx, RESTORER_MODEL_NAME, RESTORER_MODEL_URL, bundled)?;
    let parser_path = resolve_model(tx, PARSER_MODEL_NAME, PARSER_MODEL_URL, bundled)?;

    let detector =
        OnnxFaceDetector::with_thresholds(&detector_path, job.confidence, job.iou_threshold)?;
    let restorer = OnnxFaceRestorer::new(&restorer_path)?;
    let parser = OnnxFaceParser::new(&parser_path)?;

    let mut use_case = RestoreFacesUseCase::new(
        Box::new(detector),
        Box::new(restorer),
        MaskBuilder::new(Box::new(parser)),
    )
    .with_crop_padding(job.crop_padding);

    let image = read_image(&job.input_path)?;
    let mut sink = ChannelProgressSink { tx: tx.clone() };
    let outcome = use_case.execute(&image, &mut sink)?;
    write_image(&job.output_path, &outcome.image)?;

    let _ = tx.send(WorkerMessage::Complete {
        face_count: outcome.face_count,
    });
    Ok(())
}
