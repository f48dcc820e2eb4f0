pub mod crop_region;
pub mod letterbox;
pub mod sampling;
