//! Configuration
//!
//! TOML-backed settings for every stage of the frame pipeline. All defaults
//! reproduce the tuned constants of the detector, so an empty file (or no file
//! at all) behaves exactly like the built-in configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HandError, HandResult};

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Skin color thresholds
    pub skin: SkinConfig,
    /// Mask cleanup
    pub morphology: MorphologyConfig,
    /// Contour extraction
    pub contours: ContourConfig,
    /// Finger window scan
    pub fingers: FingerParams,
    /// Result packaging
    pub output: OutputConfig,
}

/// Inclusive HSV range for skin pixels.
///
/// Uses the 8-bit OpenCV convention: H in [0, 180], S and V in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    pub h_min: u8,
    pub h_max: u8,
    pub s_min: u8,
    pub s_max: u8,
    pub v_min: u8,
    pub v_max: u8,
}

impl SkinConfig {
    /// Whether an `[h, s, v]` triple falls inside the range
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        let [h, s, v] = hsv;
        (self.h_min..=self.h_max).contains(&h)
            && (self.s_min..=self.s_max).contains(&s)
            && (self.v_min..=self.v_max).contains(&v)
    }
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            h_min: 0,
            h_max: 32,
            s_min: 70,
            s_max: 255,
            v_min: 90,
            v_max: 255,
        }
    }
}

/// Opening then closing of the skin mask.
///
/// Each pass erodes/dilates with a cross of arm length `kernel_radius`,
/// repeated `iterations` times. Zero iterations disables cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    pub kernel_radius: u8,
    pub iterations: u8,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            kernel_radius: 2,
            iterations: 5,
        }
    }
}

/// How traced borders are reduced before scanning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approximation {
    /// Keep every border pixel
    #[default]
    None,
    /// Keep only the end points of horizontal, vertical and diagonal runs
    Simple,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    pub approximation: Approximation,
}

/// Thresholds of the finger window scan.
///
/// Angles are integer degrees. Every bound is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerParams {
    /// Contour-index distance between the two bases of a candidate
    pub span: usize,
    /// Minimum pixel distance from the apex to either base
    pub min_finger_top_length: f32,
    /// Maximum pixel distance across the finger, at the bases and at the flank ends
    pub max_finger_width: f32,
    pub apex_angle_min: i32,
    pub apex_angle_max: i32,
    /// Maximum absolute bend of a flank that still counts as straight
    pub straightness_max: i32,
    /// Minimum normalized dot product of the two flank directions
    pub parallel_min: f32,
}

impl FingerParams {
    pub const DEFAULT_SPAN: usize = 100;
    pub const DEFAULT_MIN_FINGER_TOP_LENGTH: f32 = 30.0;
    pub const DEFAULT_MAX_FINGER_WIDTH: f32 = 100.0;
    pub const DEFAULT_APEX_ANGLE_MIN: i32 = 30;
    pub const DEFAULT_APEX_ANGLE_MAX: i32 = 90;
    pub const DEFAULT_STRAIGHTNESS_MAX: i32 = 20;
    pub const DEFAULT_PARALLEL_MIN: f32 = 0.85;

    pub fn accepts_apex_angle(&self, angle: i32) -> bool {
        self.apex_angle_min < angle && angle < self.apex_angle_max
    }

    pub fn is_straight(&self, angle: i32) -> bool {
        angle.abs() < self.straightness_max
    }

    pub fn is_parallel(&self, dot: f32) -> bool {
        dot > self.parallel_min
    }

    pub fn is_narrow(&self, width: f32) -> bool {
        width < self.max_finger_width
    }
}

impl Default for FingerParams {
    fn default() -> Self {
        Self {
            span: Self::DEFAULT_SPAN,
            min_finger_top_length: Self::DEFAULT_MIN_FINGER_TOP_LENGTH,
            max_finger_width: Self::DEFAULT_MAX_FINGER_WIDTH,
            apex_angle_min: Self::DEFAULT_APEX_ANGLE_MIN,
            apex_angle_max: Self::DEFAULT_APEX_ANGLE_MAX,
            straightness_max: Self::DEFAULT_STRAIGHTNESS_MAX,
            parallel_min: Self::DEFAULT_PARALLEL_MIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Scale factor of the diagnostic mask copy in the frame result
    pub mask_scale: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { mask_scale: 0.2 }
    }
}

impl AppConfig {
    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> HandResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HandError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> HandResult<Self> {
        toml::from_str(content)
            .map_err(|e| HandError::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Write the default settings to a TOML file
    pub fn write_default<P: AsRef<Path>>(path: P) -> HandResult<()> {
        let content = toml::to_string_pretty(&Self::default()).map_err(|e| {
            HandError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges the detector relies on
    pub fn validate(&self) -> HandResult<()> {
        let skin = &self.skin;
        if skin.h_min > 180 || skin.h_max > 180 || skin.h_min > skin.h_max {
            return Err(HandError::Configuration(
                "Invalid skin H range (must be 0-180, min <= max)".to_string(),
            ));
        }
        if skin.s_min > skin.s_max || skin.v_min > skin.v_max {
            return Err(HandError::Configuration(
                "Invalid skin S/V range (min must be <= max)".to_string(),
            ));
        }

        let fingers = &self.fingers;
        if fingers.span < 4 {
            return Err(HandError::Configuration(format!(
                "Finger span must be at least 4 contour points, got {}",
                fingers.span
            )));
        }
        let min_top = fingers.min_finger_top_length;
        if min_top.is_nan() || min_top < 0.0 {
            return Err(HandError::Configuration(
                "min_finger_top_length must be non-negative".to_string(),
            ));
        }
        let max_width = fingers.max_finger_width;
        if max_width.is_nan() || max_width <= 0.0 {
            return Err(HandError::Configuration(
                "max_finger_width must be positive".to_string(),
            ));
        }
        if fingers.apex_angle_min >= fingers.apex_angle_max {
            return Err(HandError::Configuration(format!(
                "Empty apex angle window ({}, {})",
                fingers.apex_angle_min, fingers.apex_angle_max
            )));
        }
        if fingers.straightness_max <= 0 {
            return Err(HandError::Configuration(
                "straightness_max must be positive".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&fingers.parallel_min) {
            return Err(HandError::Configuration(
                "parallel_min must lie in [-1, 1]".to_string(),
            ));
        }

        let scale = self.output.mask_scale;
        if scale.is_nan() || scale <= 0.0 || scale > 1.0 {
            return Err(HandError::Configuration(format!(
                "mask_scale must lie in (0, 1], got {}",
                scale
            )));
        }

        Ok(())
    }
}
