mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from handfinder for tests
pub use handfinder::{AppConfig, Contour, Finger, FingerDetector, HandDetector, Point};
