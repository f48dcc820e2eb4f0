/// YOLO-family face detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference, and NMS post-processing
/// through the domain's decode functions.
use std::path::Path;

use crate::detection::domain::decode::{decode_candidates, Candidate};
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::nms::non_max_suppression;
use crate::geometry::letterbox::letterbox;
use crate::shared::constants::{DEFAULT_CONFIDENCE, DEFAULT_IOU_THRESHOLD};
use crate::shared::face_box::FaceBox;
use crate::shared::image::Image;

/// Fallback model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Face detector backed by an ONNX Runtime session.
pub struct OnnxFaceDetector {
    session: ort::session::Session,
    confidence: f64,
    iou_threshold: f64,
    input_size: u32,
}

impl OnnxFaceDetector {
    /// Load a face detection ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting
    /// NCHW). Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_thresholds(model_path, DEFAULT_CONFIDENCE, DEFAULT_IOU_THRESHOLD)
    }

    pub fn with_thresholds(
        model_path: &Path,
        confidence: f64,
        iou_threshold: f64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        // Try to read input size from model metadata (NCHW: [1, 3, H, W])
        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            confidence,
            iou_threshold,
            input_size,
        })
    }
}

impl FaceDetector for OnnxFaceDetector {
    fn detect(&mut self, image: &Image) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let iw = image.width();
        let ih = image.height();

        // 1. Preprocess: letterbox → NCHW float32 in [0,1]
        let (input_tensor, scale, pad_x, pad_y) = letterbox(image, self.input_size);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("detection model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();

        // Output shape is [1, num_features, num_detections] (transposed)
        // or [1, num_detections, num_features]. Handle both.
        let (num_dets, num_feats) = if shape.len() == 3 {
            if shape[1] < shape[2] {
                (shape[2], shape[1])
            } else {
                (shape[1], shape[2])
            }
        } else {
            return Err(format!("unexpected detection output shape: {shape:?}").into());
        };
        if num_feats < 5 {
            return Err(format!("detection rows too short: {num_feats} features").into());
        }

        let data = tensor.as_slice().ok_or("cannot get tensor slice")?;
        let transposed = shape[1] < shape[2];

        // 3. Parse rows: [cx, cy, w, h, conf, ...]
        let mut candidates = Vec::with_capacity(num_dets);
        for i in 0..num_dets {
            let at = |f: usize| {
                if transposed {
                    data[f * num_dets + i] as f64
                } else {
                    data[i * num_feats + f] as f64
                }
            };
            candidates.push(Candidate {
                cx: at(0),
                cy: at(1),
                width: at(2),
                height: at(3),
                confidence: at(4),
            });
        }

        // 4. Back to original coordinates, then NMS
        let boxes = decode_candidates(
            &candidates,
            scale,
            pad_x,
            pad_y,
            iw,
            ih,
            self.confidence,
        );
        let kept = non_max_suppression(&boxes, self.iou_threshold);

        log::debug!(
            "detector: {} candidates → {} above threshold → {} after NMS",
            candidates.len(),
            boxes.len(),
            kept.len()
        );
        Ok(kept)
    }
}
