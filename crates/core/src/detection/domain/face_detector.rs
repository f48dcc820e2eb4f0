use crate::shared::face_box::FaceBox;
use crate::shared::image::Image;

/// Domain interface for face detection.
///
/// Implementations may hold inference state, hence `&mut self`.
/// Deterministic for a given model and image; returned boxes are
/// deduplicated and lie fully inside the image.
pub trait FaceDetector: Send {
    fn detect(&mut self, image: &Image) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}
