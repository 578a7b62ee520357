// greenpulse-api: Async clients for the external capabilities GreenPulse consumes
// (image classification provider + static reference image sources).

pub mod error;
pub mod image;
pub mod transport;
pub mod vision;

pub use error::Error;
pub use image::ImageClient;
pub use transport::TransportConfig;
pub use vision::VisionClient;
