use ndarray::Array3;

use crate::geometry::crop_region::CropRegion;
use crate::geometry::sampling::bilinear_sample_chw;
use crate::parsing::domain::mask_builder::Mask;
use crate::restoration::domain::face_cropper::denormalize;
use crate::shared::constants::FEATHER_RADIUS;
use crate::shared::image::{Image, CHANNELS};

/// Paste a restored face back into the full image.
///
/// Every pixel inside the crop rectangle is mapped into the restorer's
/// square frame, where both the semantic mask and the restored tensor are
/// bilinearly sampled. The blend weight is the product of two feathers:
/// the mask's own softened edge, and an independent ramp over the pixel's
/// distance to the crop rectangle boundary. The first hides the restorer's
/// edge artifacts, the second hides the rectangular crop seam.
///
/// Takes the accumulator image by value and returns it; pixels outside the
/// crop rectangle are untouched.
pub fn paste(
    mut image: Image,
    restored: &Array3<f32>,
    mask: &Mask,
    region: &CropRegion,
) -> Image {
    let (_, th, tw) = restored.dim();
    debug_assert_eq!(th, tw, "restored tensor must be square");
    let target = th as f64;
    let restored_view = restored.view();

    let x_end = region.right().min(image.width());
    let y_end = region.bottom().min(image.height());
    let feather = FEATHER_RADIUS as f64;

    for y in region.y..y_end {
        let face_y = (y - region.y) as f64 * target / region.height as f64;
        let dy = (y - region.y).min(y_end - 1 - y) as f64;
        for x in region.x..x_end {
            let face_x = (x - region.x) as f64 * target / region.width as f64;

            let mask_alpha = mask.sample(face_x, face_y) / 255.0;

            // Independent feather against the crop rectangle itself
            let dx = (x - region.x).min(x_end - 1 - x) as f64;
            let edge_factor = (dx.min(dy) / feather).min(1.0);

            let weight = (mask_alpha * edge_factor).clamp(0.0, 1.0);
            if weight <= 0.0 {
                continue;
            }

            for c in 0..CHANNELS {
                let restored_v = denormalize(bilinear_sample_chw(
                    &restored_view,
                    face_x,
                    face_y,
                    c,
                ))
                .clamp(0.0, 1.0);
                let original_v = image.get(x, y, c);
                let blended =
                    original_v * (1.0 - weight as f32) + restored_v * weight as f32;
                image.set(x, y, c, blended);
            }
        }
    }

    image
}
