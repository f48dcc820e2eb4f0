use ndarray::Array3;

use crate::geometry::crop_region::CropRegion;
use crate::geometry::sampling::bilinear_sample_hwc;
use crate::shared::image::{Image, CHANNELS};

/// Map a [0,1] color sample into the restorer's [-1,1] range.
#[inline]
pub fn normalize(v: f32) -> f32 {
    (v - 0.5) / 0.5
}

/// Map a restorer output sample from [-1,1] back to [0,1].
#[inline]
pub fn denormalize(v: f32) -> f32 {
    v * 0.5 + 0.5
}

/// Resample a crop region of the image into the restorer's input tensor.
///
/// The region (from `expand_to_square`) is bilinearly resampled onto a
/// `target_size` x `target_size` grid and laid out channel-major in [-1,1].
/// The caller keeps the region to invert the mapping at paste time; the
/// same corner-anchored mapping is used there, so crop and paste-back
/// coordinates agree exactly.
pub fn crop_face(image: &Image, region: &CropRegion, target_size: u32) -> Array3<f32> {
    let target = target_size as usize;
    let mut tensor = Array3::<f32>::zeros((CHANNELS, target, target));

    let data = image.data();
    let sx = region.width as f64 / target_size as f64;
    let sy = region.height as f64 / target_size as f64;

    for j in 0..target {
        let src_y = region.y as f64 + j as f64 * sy;
        for i in 0..target {
            let src_x = region.x as f64 + i as f64 * sx;
            for c in 0..CHANNELS {
                let v = bilinear_sample_hwc(
                    data,
                    image.width(),
                    image.height(),
                    CHANNELS,
                    src_x,
                    src_y,
                    c,
                );
                tensor[[c, j, i]] = normalize(v);
            }
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::crop_region::expand_to_square;
    use crate::shared::face_box::FaceBox;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(0.25)]
    #[case(0.5)]
    #[case(1.0)]
    fn test_normalize_round_trip(#[case] v: f32) {
        assert!((denormalize(normalize(v)) - v).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_range() {
        assert_relative_eq!(normalize(0.0), -1.0);
        assert_relative_eq!(normalize(0.5), 0.0);
        assert_relative_eq!(normalize(1.0), 1.0);
    }

    #[test]
    fn test_uniform_image_crops_to_uniform_tensor() {
        let image = Image::filled(100, 100, 0.75);
        let region = CropRegion {
            x: 10,
            y: 10,
            width: 60,
            height: 60,
        };
        let tensor = crop_face(&image, &region, 16);
        assert_eq!(tensor.shape(), &[3, 16, 16]);
        for &v in tensor.iter() {
            assert_relative_eq!(v, normalize(0.75));
        }
    }

    #[test]
    fn test_output_is_channel_major() {
        // Left half red, right half black; the red channel should differ
        // across the tensor's width while green stays flat.
        let mut image = Image::filled(8, 8, 0.0);
        for y in 0..8 {
            for x in 0..4 {
                image.set(x, y, 0, 1.0);
            }
        }
        let region = CropRegion {
            x: 0,
            y: 0,
            width: 8,
            height: 8,
        };
        let tensor = crop_face(&image, &region, 8);
        assert_relative_eq!(tensor[[0, 4, 0]], normalize(1.0));
        assert_relative_eq!(tensor[[0, 4, 7]], normalize(0.0));
        assert_relative_eq!(tensor[[1, 4, 0]], normalize(0.0));
    }

    #[test]
    fn test_identity_crop_preserves_pixels() {
        let mut image = Image::filled(8, 8, 0.25);
        image.set(3, 5, 2, 0.9);
        let region = CropRegion {
            x: 0,
            y: 0,
            width: 8,
            height: 8,
        };
        let tensor = crop_face(&image, &region, 8);
        assert_relative_eq!(tensor[[2, 5, 3]], normalize(0.9));
    }

    #[test]
    fn test_padded_square_crop_stays_inside_image() {
        // A 40x40 face on a 100x100 image with 0.25 padding: side in
        // [40, 60], fully inside the image.
        let face = FaceBox {
            x: 10.0,
            y: 10.0,
            width: 40.0,
            height: 40.0,
            confidence: 0.9,
        };
        let region = expand_to_square(&face, 0.25, 100, 100);
        assert!(region.width >= 40 && region.width as f64 <= 60.0);
        assert!(region.right() <= 100 && region.bottom() <= 100);

        let image = Image::filled(100, 100, 0.5);
        let tensor = crop_face(&image, &region, 32);
        assert_eq!(tensor.shape(), &[3, 32, 32]);
    }
}
