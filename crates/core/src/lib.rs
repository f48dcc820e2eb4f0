pub mod compositing;
pub mod detection;
pub mod geometry;
pub mod io;
pub mod parsing;
pub mod pipeline;
pub mod restoration;
pub mod shared;
