pub mod face_cropper;
pub mod face_restorer;
