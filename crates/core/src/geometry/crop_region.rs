use crate::shared::face_box::FaceBox;

/// The rectangle of the original image a face crop was sampled from.
///
/// Always built square before clamping; clamping at image borders can leave
/// it slightly non-square, and every consumer maps it as a plain rectangle,
/// so faces at the border come back with a mildly distorted aspect ratio.
/// Lives only for the duration of one face's processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Expand a face box into the crop rectangle to resample from.
///
/// Grows the box by `padding` (fraction of its size, per side), forces it
/// square by widening the shorter dimension symmetrically around the
/// center, then clamps to image bounds. Clamping comes last.
pub fn expand_to_square(
    face: &FaceBox,
    padding: f64,
    image_w: u32,
    image_h: u32,
) -> CropRegion {
    let pad_w = face.width * padding;
    let pad_h = face.height * padding;
    let w = face.width + 2.0 * pad_w;
    let h = face.height + 2.0 * pad_h;

    let side = w.max(h);
    let cx = face.x - pad_w + w / 2.0;
    let cy = face.y - pad_h + h / 2.0;

    let x1 = (cx - side / 2.0).max(0.0);
    let y1 = (cy - side / 2.0).max(0.0);
    let x2 = (cx + side / 2.0).min(image_w as f64);
    let y2 = (cy + side / 2.0).min(image_h as f64);

    let xi = x1.floor() as u32;
    let yi = y1.floor() as u32;
    let wi = ((x2.ceil() as u32).min(image_w) - xi).max(1);
    let hi = ((y2.ceil() as u32).min(image_h) - yi).max(1);

    CropRegion {
        x: xi,
        y: yi,
        width: wi,
        height: hi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn face(x: f64, y: f64, w: f64, h: f64) -> FaceBox {
        FaceBox {
            x,
            y,
            width: w,
            height: h,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_interior_box_becomes_padded_square() {
        // 40x40 box at (10,10) with 0.25 padding → 60x60 at (0,0)
        let region = expand_to_square(&face(10.0, 10.0, 40.0, 40.0), 0.25, 100, 100);
        assert_eq!(
            region,
            CropRegion {
                x: 0,
                y: 0,
                width: 60,
                height: 60
            }
        );
    }

    #[test]
    fn test_side_length_bounds() {
        // Side must land between the box size and box * (1 + 2*padding)
        let padding = 0.25;
        let region = expand_to_square(&face(30.0, 30.0, 40.0, 40.0), padding, 200, 200);
        assert_eq!(region.width, region.height);
        assert!(region.width as f64 >= 40.0);
        assert!(region.width as f64 <= (40.0 * (1.0 + 2.0 * padding)).ceil());
    }

    #[test]
    fn test_shorter_dimension_grows_to_square() {
        // 20x60 box, no padding → 60x60 centered on the box center
        let region = expand_to_square(&face(50.0, 20.0, 20.0, 60.0), 0.0, 200, 200);
        assert_eq!(region.width, 60);
        assert_eq!(region.height, 60);
        // horizontal center preserved: box center x = 60
        assert_eq!(region.x, 30);
    }

    #[rstest]
    #[case::top_left(face(0.0, 0.0, 40.0, 40.0))]
    #[case::bottom_right(face(70.0, 70.0, 30.0, 30.0))]
    #[case::spans_most(face(5.0, 5.0, 90.0, 90.0))]
    fn test_clamped_to_image_bounds(#[case] f: FaceBox) {
        let region = expand_to_square(&f, 0.3, 100, 100);
        assert!(region.right() <= 100);
        assert!(region.bottom() <= 100);
    }

    #[test]
    fn test_clamp_after_square_can_leave_non_square() {
        // Box hugging the right edge: the square overflows and gets trimmed
        let region = expand_to_square(&face(80.0, 40.0, 18.0, 18.0), 0.3, 100, 100);
        assert!(region.right() <= 100);
        assert!(region.width <= region.height);
    }

    #[test]
    fn test_contains() {
        let region = CropRegion {
            x: 10,
            y: 10,
            width: 20,
            height: 20,
        };
        assert!(region.contains(10, 10));
        assert!(region.contains(29, 29));
        assert!(!region.contains(30, 29));
        assert!(!region.contains(9, 15));
    }
}
