pub mod error;
pub mod infrastructure;
pub mod progress;
pub mod restore_faces_use_case;
