use crate::compositing::compositor::paste;
use crate::detection::domain::face_detector::FaceDetector;
use crate::geometry::crop_region::expand_to_square;
use crate::parsing::domain::mask_builder::MaskBuilder;
use crate::restoration::domain::face_cropper::crop_face;
use crate::restoration::domain::face_restorer::FaceRestorer;
use crate::shared::constants::RESTORE_CROP_PADDING;
use crate::shared::image::Image;

use super::error::RestoreError;
use super::progress::{ProgressPhase, ProgressSink};

/// Result of one pipeline run.
#[derive(Clone, Debug)]
pub struct RestoreOutcome {
    pub image: Image,
    pub face_count: usize,
}

/// Single-image restoration pipeline:
/// detect → per face (crop → restore → mask → composite).
///
/// Each face composites onto the accumulator produced by the previous
/// face, so overlapping faces never re-process original pixels. Stages
/// run strictly sequentially; the inference backends are not assumed to
/// tolerate concurrent calls from one pipeline instance.
pub struct RestoreFacesUseCase {
    detector: Box<dyn FaceDetector>,
    restorer: Box<dyn FaceRestorer>,
    mask_builder: MaskBuilder,
    crop_padding: f64,
}

impl RestoreFacesUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        restorer: Box<dyn FaceRestorer>,
        mask_builder: MaskBuilder,
    ) -> Self {
        Self {
            detector,
            restorer,
            mask_builder,
            crop_padding: RESTORE_CROP_PADDING,
        }
    }

    pub fn with_crop_padding(mut self, padding: f64) -> Self {
        self.crop_padding = padding;
        self
    }

    /// Run the full pipeline over one image.
    ///
    /// Zero detected faces is a normal outcome: the returned image equals
    /// the input exactly and `face_count` is 0. Any stage failure aborts
    /// the whole call.
    pub fn execute(
        &mut self,
        image: &Image,
        progress: &mut dyn ProgressSink,
    ) -> Result<RestoreOutcome, RestoreError> {
        progress.progress(ProgressPhase::Detect, 10);

        let faces = self
            .detector
            .detect(image)
            .map_err(|e| RestoreError::Detection(e.to_string()))?;

        progress.progress(ProgressPhase::Detect, 20);

        if faces.is_empty() {
            log::info!("no faces detected; image returned unchanged");
            return Ok(RestoreOutcome {
                image: image.clone(),
                face_count: 0,
            });
        }

        let total = faces.len();
        let target_size = self.restorer.output_size();
        log::info!("restoring {total} face(s) at {target_size}px");

        // Accumulator threaded through the loop: face i+1 sees face i's
        // composite, in detector order.
        let mut accumulator = image.clone();
        for (i, face) in faces.iter().enumerate() {
            let region = expand_to_square(
                face,
                self.crop_padding,
                accumulator.width(),
                accumulator.height(),
            );

            let crop = crop_face(&accumulator, &region, target_size);
            let restored = self
                .restorer
                .restore(crop)
                .map_err(|e| RestoreError::Restoration(e.to_string()))?;
            let mask = self
                .mask_builder
                .build(&accumulator, face, target_size)
                .map_err(|e| RestoreError::Segmentation(e.to_string()))?;

            accumulator = paste(accumulator, &restored, &mask, &region);

            let percent = 20 + 80 * (i + 1) / total;
            progress.progress(ProgressPhase::Enhance, percent as u8);
        }

        Ok(RestoreOutcome {
            image: accumulator,
            face_count: total,
        })
    }
}
