//! Image recognition: forwards a photo to an external label-detection API and
//! reduces the answer to one best-guess label.

pub mod detector;
pub mod gateway;
pub mod image;
pub mod vision;

pub use detector::{LabelAnnotation, LabelDetector};
pub use gateway::RecognitionGateway;
pub use image::{ImageFormat, decode_image_payload, sniff_format};
pub use vision::VisionApiClient;
