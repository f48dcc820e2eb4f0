use crate::shared::face_box::FaceBox;

/// One raw detector output row, in detector-input pixel units.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
}

/// Map raw candidates back into original-image coordinates.
///
/// Drops candidates below `confidence_threshold`, undoes the letterbox
/// transform (`scale`, `pad_x`, `pad_y`), clamps each box to the image, and
/// discards boxes with nothing left inside it.
pub fn decode_candidates(
    candidates: &[Candidate],
    scale: f64,
    pad_x: u32,
    pad_y: u32,
    image_w: u32,
    image_h: u32,
    confidence_threshold: f64,
) -> Vec<FaceBox> {
    candidates
        .iter()
        .filter(|c| c.confidence >= confidence_threshold)
        .filter_map(|c| {
            let raw = FaceBox {
                x: (c.cx - c.width / 2.0 - pad_x as f64) / scale,
                y: (c.cy - c.height / 2.0 - pad_y as f64) / scale,
                width: c.width / scale,
                height: c.height / scale,
                confidence: c.confidence,
            };
            raw.clamped(image_w, image_h)
        })
        .collect()
}
