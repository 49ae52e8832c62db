pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod source;

pub use config::{AppConfig, FingerParams};
pub use detection::HandDetector;
pub use detection::fingers::FingerDetector;
pub use error::{HandError, HandResult};
pub use models::{BoundingBox, Contour, Finger, FingerMatch, FrameResult, Point};
pub use source::{FrameSource, open_source};
