pub mod decode;
pub mod face_detector;
pub mod nms;
