pub mod onnx_face_parser;
