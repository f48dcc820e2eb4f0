/// A detected face in original-image pixel coordinates.
///
/// Invariant once built: `x >= 0`, `y >= 0`, `x + width <= W`,
/// `y + height <= H`. A `FaceBox` is a value; nothing holds a reference
/// to one after detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
}

impl FaceBox {
    /// Clamp the box to `[0, image_w] x [0, image_h]`.
    ///
    /// Returns `None` when nothing of the box survives inside the image.
    pub fn clamped(&self, image_w: u32, image_h: u32) -> Option<FaceBox> {
        let x1 = self.x.max(0.0);
        let y1 = self.y.max(0.0);
        let x2 = (self.x + self.width).min(image_w as f64);
        let y2 = (self.y + self.height).min(image_h as f64);
        if x2 - x1 <= 0.0 || y2 - y1 <= 0.0 {
            return None;
        }
        Some(FaceBox {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            confidence: self.confidence,
        })
    }

    pub fn iou(&self, other: &FaceBox) -> f64 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        if inter == 0.0 {
            return 0.0;
        }

        let area_a = self.width * self.height;
        let area_b = other.width * other.height;
        inter / (area_a + area_b - inter)
    }
}
