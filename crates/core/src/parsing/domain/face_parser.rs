use super::face_label::FaceLabel;

/// An 8-bit RGBA square crop, the input format segmenters expect.
#[derive(Clone, Debug)]
pub struct RgbaCrop {
    pub data: Vec<u8>,
    pub size: u32,
}

impl RgbaCrop {
    pub fn new(data: Vec<u8>, size: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (size as usize) * (size as usize) * 4,
            "data length must equal size * size * 4"
        );
        Self { data, size }
    }
}

/// One labeled region mask over a parsed crop: a square single-channel
/// buffer of blend weights (0-255) at the segmenter's native resolution.
#[derive(Clone, Debug)]
pub struct RegionMask {
    pub label: FaceLabel,
    pub data: Vec<u8>,
    pub size: u32,
}

/// Domain interface for semantic face parsing.
///
/// Label strings are parsed into `FaceLabel` at this boundary, so
/// implementations own all the stringiness of the underlying model.
pub trait FaceParser: Send {
    fn parse(&mut self, crop: &RgbaCrop) -> Result<Vec<RegionMask>, Box<dyn std::error::Error>>;
}
