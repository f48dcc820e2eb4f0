pub mod constants;
pub mod face_box;
pub mod image;
pub mod model_resolver;
