use std::path::Path;

use ndarray::Array3;

use crate::restoration::domain::face_restorer::FaceRestorer;
use crate::shared::image::CHANNELS;

/// Fallback spatial size when the model doesn't declare its input shape.
const DEFAULT_RESTORER_SIZE: u32 = 512;

/// GFPGAN-style face restorer backed by an ONNX Runtime session.
///
/// One named input, one named output, both `[1, 3, S, S]` in [-1,1]. The
/// adapter only reshapes between the pipeline's CHW tensors and the
/// model's NCHW batch of one.
pub struct OnnxFaceRestorer {
    session: ort::session::Session,
    size: u32,
}

impl OnnxFaceRestorer {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        let size = session
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
            .unwrap_or(DEFAULT_RESTORER_SIZE);

        Ok(Self { session, size })
    }
}

impl FaceRestorer for OnnxFaceRestorer {
    fn restore(&mut self, face: Array3<f32>) -> Result<Array3<f32>, Box<dyn std::error::Error>> {
        let s = self.size as usize;
        let (c, h, w) = face.dim();
        if c != CHANNELS || h != s || w != s {
            return Err(format!(
                "restorer expects [{CHANNELS}, {s}, {s}] input, got [{c}, {h}, {w}]"
            )
            .into());
        }

        let batched = face.insert_axis(ndarray::Axis(0));
        let input_value = ort::value::Tensor::from_array(batched)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("restoration model produced no outputs".into());
        }

        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();
        if shape != [1, CHANNELS, s, s] {
            return Err(format!("unexpected restoration output shape: {shape:?}").into());
        }

        let data = tensor.as_slice().ok_or("cannot get tensor slice")?;
        Ok(Array3::from_shape_vec((CHANNELS, s, s), data.to_vec())?)
    }

    fn output_size(&self) -> u32 {
        self.size
    }
}
