pub mod onnx_face_restorer;
