use std::path::Path;

use ndarray::Array4;

use crate::geometry::sampling::bilinear_sample_gray;
use crate::parsing::domain::face_label::FaceLabel;
use crate::parsing::domain::face_parser::{FaceParser, RegionMask, RgbaCrop};
use crate::shared::image::CHANNELS;

/// Fallback model input resolution.
const DEFAULT_INPUT_SIZE: u32 = 512;

/// ImageNet channel statistics used by BiSeNet-family parsing models.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Class order of the CelebAMask-HQ face parsing heads. The strings go
/// through `FaceLabel::parse` so the core never sees them.
const CLASS_NAMES: &[&str] = &[
    "background",
    "skin",
    "l_brow",
    "r_brow",
    "l_eye",
    "r_eye",
    "eye_g",
    "l_ear",
    "r_ear",
    "ear_r",
    "nose",
    "mouth",
    "u_lip",
    "l_lip",
    "neck",
    "neck_l",
    "cloth",
    "hair",
    "hat",
];

/// BiSeNet-style face parser backed by an ONNX Runtime session.
///
/// Takes an 8-bit RGBA crop, runs the segmentation model, and returns one
/// binary mask per class present in the argmax map, at the model's native
/// output resolution.
pub struct OnnxFaceParser {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxFaceParser {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

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
            input_size,
        })
    }

    /// Resample the RGBA crop to the model's input grid and normalize with
    /// ImageNet statistics, channel-major.
    fn preprocess(&self, crop: &RgbaCrop) -> Array4<f32> {
        let n = self.input_size as usize;
        let mut tensor = Array4::<f32>::zeros((1, CHANNELS, n, n));
        let scale = crop.size as f64 / self.input_size as f64;

        // Per-channel planes of the interleaved RGBA buffer
        for c in 0..CHANNELS {
            let plane: Vec<u8> = crop
                .data
                .chunks(4)
                .map(|px| px[c])
                .collect();
            for y in 0..n {
                for x in 0..n {
                    let v = bilinear_sample_gray(
                        &plane,
                        crop.size,
                        crop.size,
                        x as f64 * scale,
                        y as f64 * scale,
                    ) as f32
                        / 255.0;
                    tensor[[0, c, y, x]] = (v - MEAN[c]) / STD[c];
                }
            }
        }
        tensor
    }
}

impl FaceParser for OnnxFaceParser {
    fn parse(&mut self, crop: &RgbaCrop) -> Result<Vec<RegionMask>, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(self.preprocess(crop))?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("parsing model produced no outputs".into());
        }

        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();
        // Expect per-class logits [1, classes, H, W]
        if shape.len() != 4 || shape[0] != 1 {
            return Err(format!("unexpected parsing output shape: {shape:?}").into());
        }
        let (classes, h, w) = (shape[1], shape[2], shape[3]);
        if h != w {
            return Err(format!("parsing output is not square: {shape:?}").into());
        }
        let data = tensor.as_slice().ok_or("cannot get tensor slice")?;

        // Argmax per pixel, one binary mask per class that actually appears
        let plane = h * w;
        let mut class_map = vec![0usize; plane];
        let mut present = vec![false; classes];
        for p in 0..plane {
            let mut best = 0usize;
            let mut best_score = data[p];
            for k in 1..classes {
                let score = data[k * plane + p];
                if score > best_score {
                    best = k;
                    best_score = score;
                }
            }
            class_map[p] = best;
            present[best] = true;
        }

        let mut regions = Vec::new();
        for (k, &seen) in present.iter().enumerate() {
            if !seen {
                continue;
            }
            let label = CLASS_NAMES
                .get(k)
                .map(|name| FaceLabel::parse(name))
                .unwrap_or(FaceLabel::Unknown);
            let mask: Vec<u8> = class_map
                .iter()
                .map(|&c| if c == k { 255 } else { 0 })
                .collect();
            regions.push(RegionMask {
                label,
                data: mask,
                size: w as u32,
            });
        }

        log::debug!("face parser: {} region masks at {w}x{h}", regions.len());
        Ok(regions)
    }
}
