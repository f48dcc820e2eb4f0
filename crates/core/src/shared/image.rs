use image::RgbImage;
use ndarray::ArrayView3;

pub const CHANNELS: usize = 3;

/// A normalized RGB image: contiguous f32 samples in [0,1], HWC order
/// (row, then column, then channel).
///
/// Format conversion happens at I/O boundaries only; every pipeline stage
/// operates on this type directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl Image {
    pub fn new(data: Vec<f32>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Solid-color image, mostly useful in tests.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self::new(
            vec![value; (width as usize) * (height as usize) * CHANNELS],
            width,
            height,
        )
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32, channel: usize) -> f32 {
        self.data[(y as usize * self.width as usize + x as usize) * CHANNELS + channel]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, channel: usize, value: f32) {
        self.data[(y as usize * self.width as usize + x as usize) * CHANNELS + channel] = value;
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, f32> {
        ArrayView3::from_shape(
            (self.height as usize, self.width as usize, CHANNELS),
            &self.data,
        )
        .expect("Image data length must match dimensions")
    }

    /// Convert an 8-bit RGB buffer into the normalized [0,1] representation.
    pub fn from_rgb8(rgb: &RgbImage) -> Self {
        let data = rgb.as_raw().iter().map(|&v| v as f32 / 255.0).collect();
        Self::new(data, rgb.width(), rgb.height())
    }

    /// Convert back to 8-bit RGB, clamping each sample to [0,1].
    pub fn to_rgb8(&self) -> RgbImage {
        let bytes: Vec<u8> = self
            .data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        RgbImage::from_raw(self.width, self.height, bytes)
            .expect("Image data length must match dimensions")
    }
}
