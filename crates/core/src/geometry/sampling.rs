//! Clamped bilinear sampling over the buffer layouts used by the pipeline.
//!
//! All samplers clamp coordinates to the valid range, so fractional
//! positions at (or past) the edges never read out of bounds.

use ndarray::ArrayView3;

/// Split a clamped coordinate into (low index, high index, fraction).
#[inline]
fn taps(coord: f64, len: usize) -> (usize, usize, f64) {
    let max = (len - 1) as f64;
    let c = coord.clamp(0.0, max);
    let lo = c.floor() as usize;
    let hi = (lo + 1).min(len - 1);
    (lo, hi, c - lo as f64)
}

/// 4-neighbor interpolation over an HWC f32 buffer.
pub fn bilinear_sample_hwc(
    data: &[f32],
    width: u32,
    height: u32,
    channels: usize,
    x: f64,
    y: f64,
    channel: usize,
) -> f32 {
    let w = width as usize;
    let (x0, x1, fx) = taps(x, w);
    let (y0, y1, fy) = taps(y, height as usize);

    let at = |xi: usize, yi: usize| data[(yi * w + xi) * channels + channel] as f64;

    let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
    let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
    (top * (1.0 - fy) + bottom * fy) as f32
}

/// 4-neighbor interpolation over a CHW f32 tensor.
pub fn bilinear_sample_chw(tensor: &ArrayView3<'_, f32>, x: f64, y: f64, channel: usize) -> f32 {
    let (_, h, w) = tensor.dim();
    let (x0, x1, fx) = taps(x, w);
    let (y0, y1, fy) = taps(y, h);

    let at = |xi: usize, yi: usize| tensor[[channel, yi, xi]] as f64;

    let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
    let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
    (top * (1.0 - fy) + bottom * fy) as f32
}

/// 4-neighbor interpolation over a single-channel 8-bit buffer.
/// Returns the interpolated value on the 0-255 scale.
pub fn bilinear_sample_gray(data: &[u8], width: u32, height: u32, x: f64, y: f64) -> f64 {
    let w = width as usize;
    let (x0, x1, fx) = taps(x, w);
    let (y0, y1, fy) = taps(y, height as usize);

    let at = |xi: usize, yi: usize| data[yi * w + xi] as f64;

    let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
    let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
    top * (1.0 - fy) + bottom * fy
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array3;

    fn gradient_hwc(width: u32, height: u32) -> Vec<f32> {
        // value = x + 10*y on every channel
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                for _ in 0..3 {
                    data.push((x + 10 * y) as f32);
                }
            }
        }
        data
    }

    #[test]
    fn test_hwc_exact_at_integer_coords() {
        let data = gradient_hwc(4, 4);
        assert_relative_eq!(bilinear_sample_hwc(&data, 4, 4, 3, 2.0, 3.0, 0), 32.0);
    }

    #[test]
    fn test_hwc_midpoint_interpolates() {
        let data = gradient_hwc(4, 4);
        // halfway between x=1 and x=2 on row 0
        assert_relative_eq!(bilinear_sample_hwc(&data, 4, 4, 3, 1.5, 0.0, 0), 1.5);
        // halfway between rows 0 and 1
        assert_relative_eq!(bilinear_sample_hwc(&data, 4, 4, 3, 0.0, 0.5, 0), 5.0);
    }

    #[test]
    fn test_hwc_clamps_out_of_range() {
        let data = gradient_hwc(4, 4);
        assert_relative_eq!(bilinear_sample_hwc(&data, 4, 4, 3, -5.0, -5.0, 0), 0.0);
        assert_relative_eq!(bilinear_sample_hwc(&data, 4, 4, 3, 100.0, 100.0, 0), 33.0);
    }

    #[test]
    fn test_hwc_channel_selection() {
        let mut data = vec![0.0f32; 2 * 2 * 3];
        data[1] = 0.7; // pixel (0,0), channel 1
        assert_relative_eq!(bilinear_sample_hwc(&data, 2, 2, 3, 0.0, 0.0, 1), 0.7);
        assert_relative_eq!(bilinear_sample_hwc(&data, 2, 2, 3, 0.0, 0.0, 0), 0.0);
    }

    #[test]
    fn test_chw_matches_hwc_on_same_content() {
        let mut chw = Array3::<f32>::zeros((3, 4, 4));
        for y in 0..4 {
            for x in 0..4 {
                for c in 0..3 {
                    chw[[c, y, x]] = (x + 10 * y) as f32;
                }
            }
        }
        let hwc = gradient_hwc(4, 4);
        let view = chw.view();
        for &(x, y) in &[(0.5, 0.5), (2.25, 1.75), (3.0, 3.0)] {
            assert_relative_eq!(
                bilinear_sample_chw(&view, x, y, 2),
                bilinear_sample_hwc(&hwc, 4, 4, 3, x, y, 2)
            );
        }
    }

    #[test]
    fn test_gray_interpolation_and_clamp() {
        let data = vec![0u8, 100, 200, 255];
        assert_relative_eq!(bilinear_sample_gray(&data, 2, 2, 0.5, 0.0), 50.0);
        assert_relative_eq!(bilinear_sample_gray(&data, 2, 2, 0.5, 1.0), 227.5);
        assert_relative_eq!(bilinear_sample_gray(&data, 2, 2, 9.0, 9.0), 255.0);
    }
}
