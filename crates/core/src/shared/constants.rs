pub const DETECTOR_MODEL_NAME: &str = "yolov8n-face.onnx";
pub const DETECTOR_MODEL_URL: &str =
    "https://github.com/facelift-app/facelift/releases/download/v0.1.0/yolov8n-face.onnx";

pub const RESTORER_MODEL_NAME: &str = "gfpgan-v1.4.onnx";
pub const RESTORER_MODEL_URL: &str =
    "https://github.com/facelift-app/facelift/releases/download/v0.1.0/gfpgan-v1.4.onnx";

pub const PARSER_MODEL_NAME: &str = "face-parsing-bisenet.onnx";
pub const PARSER_MODEL_URL: &str =
    "https://github.com/facelift-app/facelift/releases/download/v0.1.0/face-parsing-bisenet.onnx";

/// Minimum detector confidence for a candidate to survive decoding.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// NMS IoU threshold.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.45;

/// Crop padding (fraction of box size per side) for the restoration crop.
pub const RESTORE_CROP_PADDING: f64 = 0.25;

/// Crop padding for the face-parsing crop. Tighter than the restoration
/// crop so the segmenter sees mostly face.
pub const PARSE_CROP_PADDING: f64 = 0.1;

/// Feather width in pixels, applied both to semantic mask edges and to the
/// crop-rectangle boundary during compositing.
pub const FEATHER_RADIUS: u32 = 8;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
