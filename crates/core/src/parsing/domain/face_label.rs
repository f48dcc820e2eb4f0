/// Closed set of face-parsing region labels.
///
/// Segmenters report regions as free-form strings; those are parsed into
/// this enum once, at the segmentation boundary, so everything downstream
/// matches exhaustively instead of comparing strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceLabel {
    Background,
    Skin,
    LeftBrow,
    RightBrow,
    LeftEye,
    RightEye,
    Eyeglasses,
    LeftEar,
    RightEar,
    Earring,
    Nose,
    Mouth,
    UpperLip,
    LowerLip,
    Neck,
    Necklace,
    Cloth,
    Hair,
    Hat,
    Unknown,
}

impl FaceLabel {
    /// Parse a segmenter-reported label string.
    ///
    /// Case-insensitive; a trailing file-extension-like suffix is stripped
    /// first, so `"Skin.png"` parses the same as `"skin"`. Anything
    /// unrecognized maps to `Unknown`.
    pub fn parse(raw: &str) -> FaceLabel {
        let lowered = raw.trim().to_ascii_lowercase();
        let name = strip_extension(&lowered);
        match name {
            "background" | "bg" => FaceLabel::Background,
            "skin" | "face" => FaceLabel::Skin,
            "l_brow" | "left_brow" | "left_eyebrow" => FaceLabel::LeftBrow,
            "r_brow" | "right_brow" | "right_eyebrow" => FaceLabel::RightBrow,
            "l_eye" | "left_eye" => FaceLabel::LeftEye,
            "r_eye" | "right_eye" => FaceLabel::RightEye,
            "eye_g" | "eyeglasses" | "glasses" => FaceLabel::Eyeglasses,
            "l_ear" | "left_ear" => FaceLabel::LeftEar,
            "r_ear" | "right_ear" => FaceLabel::RightEar,
            "ear_r" | "earring" => FaceLabel::Earring,
            "nose" => FaceLabel::Nose,
            "mouth" => FaceLabel::Mouth,
            "u_lip" | "upper_lip" => FaceLabel::UpperLip,
            "l_lip" | "lower_lip" => FaceLabel::LowerLip,
            "neck" => FaceLabel::Neck,
            "neck_l" | "necklace" => FaceLabel::Necklace,
            "cloth" | "clothes" => FaceLabel::Cloth,
            "hair" => FaceLabel::Hair,
            "hat" => FaceLabel::Hat,
            _ => FaceLabel::Unknown,
        }
    }

    /// Whether this region belongs to the restored face interior.
    ///
    /// Hair, ears, glasses, neck and everything behind the face are
    /// excluded: blending those back from the restorer produces halos.
    pub fn is_face_interior(self) -> bool {
        match self {
            FaceLabel::Skin
            | FaceLabel::LeftBrow
            | FaceLabel::RightBrow
            | FaceLabel::LeftEye
            | FaceLabel::RightEye
            | FaceLabel::Nose
            | FaceLabel::Mouth
            | FaceLabel::UpperLip
            | FaceLabel::LowerLip => true,
            FaceLabel::Background
            | FaceLabel::Eyeglasses
            | FaceLabel::LeftEar
            | FaceLabel::RightEar
            | FaceLabel::Earring
            | FaceLabel::Neck
            | FaceLabel::Necklace
            | FaceLabel::Cloth
            | FaceLabel::Hair
            | FaceLabel::Hat
            | FaceLabel::Unknown => false,
        }
    }
}

/// Strip a trailing `.ext`-style suffix (1-4 alphanumeric chars).
fn strip_extension(name: &str) -> &str {
    if let Some(idx) = name.rfind('.') {
        let ext = &name[idx + 1..];
        if !ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return &name[..idx];
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("skin", FaceLabel::Skin)]
    #[case("Skin", FaceLabel::Skin)]
    #[case("SKIN.PNG", FaceLabel::Skin)]
    #[case("skin.png", FaceLabel::Skin)]
    #[case("nose.webp", FaceLabel::Nose)]
    #[case("l_eye", FaceLabel::LeftEye)]
    #[case("r_brow", FaceLabel::RightBrow)]
    #[case("u_lip", FaceLabel::UpperLip)]
    #[case("l_lip", FaceLabel::LowerLip)]
    #[case("eye_g", FaceLabel::Eyeglasses)]
    #[case("ear_r", FaceLabel::Earring)]
    #[case("neck_l", FaceLabel::Necklace)]
    #[case("hair", FaceLabel::Hair)]
    #[case("background", FaceLabel::Background)]
    #[case("wing", FaceLabel::Unknown)]
    #[case("", FaceLabel::Unknown)]
    fn test_parse(#[case] raw: &str, #[case] expected: FaceLabel) {
        assert_eq!(FaceLabel::parse(raw), expected);
    }

    #[test]
    fn test_parse_strips_only_extension_like_suffixes() {
        // "neck_l" must not be mistaken for "neck" with an "_l" extension,
        // and a long dotted suffix is not an extension.
        assert_eq!(FaceLabel::parse("neck_l"), FaceLabel::Necklace);
        assert_eq!(FaceLabel::parse("skin.backup_copy"), FaceLabel::Unknown);
    }

    #[test]
    fn test_interior_set() {
        for label in [
            FaceLabel::Skin,
            FaceLabel::LeftBrow,
            FaceLabel::RightBrow,
            FaceLabel::LeftEye,
            FaceLabel::RightEye,
            FaceLabel::Nose,
            FaceLabel::Mouth,
            FaceLabel::UpperLip,
            FaceLabel::LowerLip,
        ] {
            assert!(label.is_face_interior(), "{label:?} should be interior");
        }
        for label in [
            FaceLabel::Background,
            FaceLabel::Hair,
            FaceLabel::Neck,
            FaceLabel::Eyeglasses,
            FaceLabel::LeftEar,
            FaceLabel::Hat,
            FaceLabel::Unknown,
        ] {
            assert!(!label.is_face_interior(), "{label:?} should be excluded");
        }
    }
}
