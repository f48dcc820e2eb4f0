pub mod face_label;
pub mod face_parser;
pub mod mask_builder;
