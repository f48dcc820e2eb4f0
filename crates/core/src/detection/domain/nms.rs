use crate::shared::face_box::FaceBox;

/// Greedy non-maximum suppression.
///
/// Sorts by confidence descending, then repeatedly keeps the best remaining
/// box and suppresses every other box whose IoU with it exceeds
/// `iou_threshold`. Pure function of the input set: running it on its own
/// output returns the output unchanged.
pub fn non_max_suppression(boxes: &[FaceBox], iou_threshold: f64) -> Vec<FaceBox> {
    let mut sorted = boxes.to_vec();
    sorted.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; sorted.len()];

    for i in 0..sorted.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(sorted[i]);
        for j in (i + 1)..sorted.len() {
            if !suppressed[j] && sorted[i].iou(&sorted[j]) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn face_box(x: f64, y: f64, w: f64, h: f64, conf: f64) -> FaceBox {
        FaceBox {
            x,
            y,
            width: w,
            height: h,
            confidence: conf,
        }
    }

    #[test]
    fn test_suppresses_overlapping() {
        // IoU of these two is ~0.6 — only the 0.9 box survives
        let boxes = vec![
            face_box(0.0, 0.0, 100.0, 100.0, 0.9),
            face_box(0.0, 25.0, 100.0, 100.0, 0.7),
        ];
        let kept = non_max_suppression(&boxes, 0.45);
        assert_eq!(kept.len(), 1);
        assert_relative_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn test_keeps_non_overlapping() {
        let boxes = vec![
            face_box(0.0, 0.0, 50.0, 50.0, 0.9),
            face_box(200.0, 200.0, 50.0, 50.0, 0.8),
        ];
        assert_eq!(non_max_suppression(&boxes, 0.45).len(), 2);
    }

    #[test]
    fn test_highest_confidence_wins_regardless_of_order() {
        let boxes = vec![
            face_box(2.0, 2.0, 100.0, 100.0, 0.5),
            face_box(0.0, 0.0, 100.0, 100.0, 0.9),
        ];
        let kept = non_max_suppression(&boxes, 0.3);
        assert_eq!(kept.len(), 1);
        assert_relative_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn test_output_sorted_by_confidence() {
        let boxes = vec![
            face_box(0.0, 0.0, 50.0, 50.0, 0.6),
            face_box(200.0, 0.0, 50.0, 50.0, 0.9),
            face_box(0.0, 200.0, 50.0, 50.0, 0.7),
        ];
        let kept = non_max_suppression(&boxes, 0.45);
        assert_eq!(kept.len(), 3);
        assert!(kept[0].confidence >= kept[1].confidence);
        assert!(kept[1].confidence >= kept[2].confidence);
    }

    #[test]
    fn test_idempotent() {
        let boxes = vec![
            face_box(0.0, 0.0, 100.0, 100.0, 0.9),
            face_box(10.0, 10.0, 100.0, 100.0, 0.8),
            face_box(300.0, 300.0, 50.0, 50.0, 0.7),
            face_box(305.0, 305.0, 50.0, 50.0, 0.6),
        ];
        let once = non_max_suppression(&boxes, 0.45);
        let twice = non_max_suppression(&once, 0.45);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let boxes = vec![
            face_box(0.0, 0.0, 100.0, 100.0, 0.5),
            face_box(0.0, 0.0, 100.0, 100.0, 0.9),
        ];
        let snapshot = boxes.clone();
        let _ = non_max_suppression(&boxes, 0.45);
        assert_eq!(boxes, snapshot);
    }

    #[test]
    fn test_empty_input() {
        assert!(non_max_suppression(&[], 0.45).is_empty());
    }

    #[test]
    fn test_no_survivor_pair_exceeds_threshold() {
        let boxes: Vec<FaceBox> = (0..10)
            .map(|i| face_box(i as f64 * 8.0, 0.0, 40.0, 40.0, 0.5 + i as f64 * 0.04))
            .collect();
        let kept = non_max_suppression(&boxes, 0.45);
        for i in 0..kept.len() {
            for j in (i + 1)..kept.len() {
                assert!(kept[i].iou(&kept[j]) <= 0.45);
            }
        }
    }
}
