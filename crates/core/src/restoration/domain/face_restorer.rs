use ndarray::Array3;

/// Domain interface for single-face restoration.
///
/// Input and output are CHW float32 tensors of the same fixed square size,
/// in the model's native [-1,1] range. Implementations hold inference
/// state, hence `&mut self`.
pub trait FaceRestorer: Send {
    fn restore(&mut self, face: Array3<f32>) -> Result<Array3<f32>, Box<dyn std::error::Error>>;

    /// Spatial side length of the restorer's input and output tensors.
    fn output_size(&self) -> u32;
}
