use crate::geometry::crop_region::expand_to_square;
use crate::geometry::sampling::{bilinear_sample_gray, bilinear_sample_hwc};
use crate::shared::constants::{FEATHER_RADIUS, PARSE_CROP_PADDING};
use crate::shared::face_box::FaceBox;
use crate::shared::image::{Image, CHANNELS};

use super::face_parser::{FaceParser, RgbaCrop};

/// Per-pixel blend weights (0-255) in a crop's local coordinate frame,
/// square, sized to match the restorer's output.
#[derive(Clone, Debug)]
pub struct Mask {
    data: Vec<u8>,
    size: u32,
}

impl Mask {
    pub fn new(data: Vec<u8>, size: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (size as usize) * (size as usize),
            "data length must equal size * size"
        );
        Self { data, size }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Clamped bilinear lookup at a fractional position, on the 0-255 scale.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        bilinear_sample_gray(&self.data, self.size, self.size, x, y)
    }
}

/// Builds the semantic blend mask for one face.
///
/// Crops the original (pre-restoration) image around the box with a tight
/// padding, hands the crop to the segmenter, unions the face-interior
/// regions, and feathers the result so the compositor blends softly
/// instead of cutting out a hard region.
pub struct MaskBuilder {
    parser: Box<dyn FaceParser>,
    padding: f64,
    feather_radius: u32,
}

impl MaskBuilder {
    pub fn new(parser: Box<dyn FaceParser>) -> Self {
        Self {
            parser,
            padding: PARSE_CROP_PADDING,
            feather_radius: FEATHER_RADIUS,
        }
    }

    pub fn build(
        &mut self,
        image: &Image,
        face: &FaceBox,
        output_size: u32,
    ) -> Result<Mask, Box<dyn std::error::Error>> {
        let region = expand_to_square(face, self.padding, image.width(), image.height());
        let crop = rgba_crop(image, region.x, region.y, region.width, region.height, output_size);

        let regions = self.parser.parse(&crop)?;

        let n = output_size as usize;
        let mut union = vec![0u8; n * n];
        for rm in regions.iter().filter(|r| r.label.is_face_interior()) {
            if rm.size == output_size {
                for (dst, &src) in union.iter_mut().zip(&rm.data) {
                    *dst = (*dst).max(src);
                }
            } else {
                // Segmenter worked at its own resolution; resample onto ours
                let scale = rm.size as f64 / output_size as f64;
                for y in 0..n {
                    for x in 0..n {
                        let v = bilinear_sample_gray(
                            &rm.data,
                            rm.size,
                            rm.size,
                            x as f64 * scale,
                            y as f64 * scale,
                        );
                        let dst = &mut union[y * n + x];
                        *dst = (*dst).max(v.round() as u8);
                    }
                }
            }
        }

        // Binarize, then soften: weight ramps from 0 at the region edge to
        // full over `feather_radius` pixels inward.
        for v in union.iter_mut() {
            *v = if *v >= 128 { 255 } else { 0 };
        }
        feather(&mut union, n, self.feather_radius);

        Ok(Mask::new(union, output_size))
    }
}

/// Resample a rectangle of the image into an 8-bit RGBA square.
///
/// This is a separate resampling path from the restoration crop on
/// purpose: it feeds a segmenter expecting plain 8-bit RGBA, not a
/// normalized tensor.
fn rgba_crop(image: &Image, x: u32, y: u32, width: u32, height: u32, size: u32) -> RgbaCrop {
    let n = size as usize;
    let mut data = vec![255u8; n * n * 4];
    let sx = width as f64 / size as f64;
    let sy = height as f64 / size as f64;

    for j in 0..n {
        let src_y = y as f64 + j as f64 * sy;
        for i in 0..n {
            let src_x = x as f64 + i as f64 * sx;
            for c in 0..CHANNELS {
                let v = bilinear_sample_hwc(
                    image.data(),
                    image.width(),
                    image.height(),
                    CHANNELS,
                    src_x,
                    src_y,
                    c,
                );
                data[(j * n + i) * 4 + c] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        }
    }

    RgbaCrop::new(data, size)
}

/// Feather a binary mask in place: each interior pixel's weight becomes
/// `min(dist_to_edge, radius) / radius * 255`, using a two-pass city-block
/// distance transform. Pixels outside the buffer count as background, so
/// a mask touching the crop edge still ramps down there.
fn feather(mask: &mut [u8], size: usize, radius: u32) {
    if radius == 0 || size == 0 {
        return;
    }
    let far = u32::MAX - 1;
    let mut dist = vec![far; size * size];

    for y in 0..size {
        for x in 0..size {
            let i = y * size + x;
            if mask[i] == 0 {
                dist[i] = 0;
            } else if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                dist[i] = 1;
            }
        }
    }

    // Forward pass: top-left neighbors
    for y in 0..size {
        for x in 0..size {
            let i = y * size + x;
            if x > 0 {
                dist[i] = dist[i].min(dist[i - 1].saturating_add(1));
            }
            if y > 0 {
                dist[i] = dist[i].min(dist[i - size].saturating_add(1));
            }
        }
    }
    // Backward pass: bottom-right neighbors
    for y in (0..size).rev() {
        for x in (0..size).rev() {
            let i = y * size + x;
            if x + 1 < size {
                dist[i] = dist[i].min(dist[i + 1].saturating_add(1));
            }
            if y + 1 < size {
                dist[i] = dist[i].min(dist[i + size].saturating_add(1));
            }
        }
    }

    for (v, &d) in mask.iter_mut().zip(&dist) {
        if *v > 0 {
            let w = (d.min(radius) as f64) / radius as f64;
            *v = (w * 255.0).round() as u8;
        }
    }
}
