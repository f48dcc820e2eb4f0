use ndarray::Array4;

use crate::shared::image::{Image, CHANNELS};

use super::sampling::bilinear_sample_hwc;

/// Neutral gray used for letterbox padding, in normalized [0,1] color.
const PAD_GRAY: f32 = 0.5;

/// Letterbox-resize an image to `target_size` x `target_size`.
///
/// Scales uniformly by `min(target/W, target/H)`, centers the result on a
/// gray canvas, and bilinearly samples every destination pixel. A square
/// image at the target size passes through with scale 1 and no padding.
///
/// Returns `(NCHW float32 tensor in [0,1], scale, pad_x, pad_y)`.
pub fn letterbox(image: &Image, target_size: u32) -> (Array4<f32>, f64, u32, u32) {
    let iw = image.width() as f64;
    let ih = image.height() as f64;
    let target = target_size as f64;

    let scale = (target / iw).min(target / ih);
    let new_w = (iw * scale).round() as u32;
    let new_h = (ih * scale).round() as u32;
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let mut tensor = Array4::<f32>::from_elem(
        (1, CHANNELS, target_size as usize, target_size as usize),
        PAD_GRAY,
    );

    let data = image.data();
    for y in 0..new_h {
        let src_y = y as f64 / scale;
        for x in 0..new_w {
            let src_x = x as f64 / scale;
            let ty = (pad_y + y) as usize;
            let tx = (pad_x + x) as usize;
            for c in 0..CHANNELS {
                tensor[[0, c, ty, tx]] = bilinear_sample_hwc(
                    data,
                    image.width(),
                    image.height(),
                    CHANNELS,
                    src_x,
                    src_y,
                    c,
                );
            }
        }
    }

    (tensor, scale, pad_x, pad_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_preserves_aspect_ratio() {
        // 200x100 → 640: scale = min(3.2, 6.4) = 3.2, new = 640x320
        let image = Image::filled(200, 100, 0.25);
        let (tensor, scale, pad_x, pad_y) = letterbox(&image, 640);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert_relative_eq!(scale, 3.2);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 160);
    }

    #[test]
    fn test_identity_when_already_target_size() {
        let mut image = Image::filled(8, 8, 0.25);
        image.set(3, 5, 1, 0.9);
        let (tensor, scale, pad_x, pad_y) = letterbox(&image, 8);

        assert_relative_eq!(scale, 1.0);
        assert_eq!((pad_x, pad_y), (0, 0));
        // Content passes through exactly
        assert_relative_eq!(tensor[[0, 1, 5, 3]], 0.9);
        assert_relative_eq!(tensor[[0, 0, 5, 3]], 0.25);
    }

    #[test]
    fn test_padding_is_neutral_gray() {
        let image = Image::filled(100, 50, 1.0);
        let (tensor, _, pad_x, pad_y) = letterbox(&image, 640);

        assert_eq!(pad_x, 0);
        assert!(pad_y > 0);
        // Pad rows above the content
        assert_relative_eq!(tensor[[0, 0, 0, 0]], 0.5);
        assert_relative_eq!(tensor[[0, 2, (pad_y - 1) as usize, 320]], 0.5);
        // Content region keeps its value
        assert_relative_eq!(tensor[[0, 0, (pad_y + 1) as usize, 320]], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_square_image_has_no_padding() {
        let image = Image::filled(100, 100, 0.5);
        let (tensor, scale, pad_x, pad_y) = letterbox(&image, 640);
        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert_relative_eq!(scale, 6.4);
        assert_eq!((pad_x, pad_y), (0, 0));
    }
}
