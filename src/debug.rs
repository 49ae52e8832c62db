use image::DynamicImage;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::debug;

use crate::error::{HandError, HandResult};

/// Pipeline stages whose intermediate images can be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugStage {
    Input,
    SkinMask,
    CleanedMask,
    Overlay,
}

impl DebugStage {
    pub fn index(self) -> usize {
        match self {
            DebugStage::Input => 0,
            DebugStage::SkinMask => 1,
            DebugStage::CleanedMask => 2,
            DebugStage::Overlay => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DebugStage::Input => "input",
            DebugStage::SkinMask => "skin_mask",
            DebugStage::CleanedMask => "cleaned_mask",
            DebugStage::Overlay => "overlay",
        }
    }

    /// Directory name under the debug root, e.g. `01_skin_mask`
    pub fn dir_name(self) -> String {
        format!("{:02}_{}", self.index(), self.name())
    }
}

/// Per-stage image dump for inspecting a run
#[derive(Debug, Clone)]
pub struct DebugOutput {
    root: PathBuf,
}

impl DebugOutput {
    /// The directory must be empty or non-existent
    pub fn new(output_dir: impl Into<PathBuf>) -> HandResult<Self> {
        let root = output_dir.into();
        if root.exists() {
            let entries = std::fs::read_dir(&root)?;
            if entries.count() > 0 {
                return Err(HandError::Configuration(format!(
                    "Debug directory is not empty: {}",
                    root.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&root)?;
        }

        Ok(Self { root })
    }

    /// Save one stage image as `{stage_dir}/{frame:04}.png`
    pub fn save(
        &self,
        stage: DebugStage,
        frame_index: usize,
        image: &DynamicImage,
    ) -> HandResult<PathBuf> {
        let stage_dir = self.root.join(stage.dir_name());
        std::fs::create_dir_all(&stage_dir)?;

        let path = stage_dir.join(format!("{:04}.png", frame_index));
        image.save(&path)?;

        debug!(stage = stage.name(), path = %path.display(), "saved debug image");
        Ok(path)
    }
}

/// File name for an annotated snapshot, e.g. `20240305-140709-0003.png`
pub fn snapshot_file_name(timestamp: OffsetDateTime, frame_index: usize) -> HandResult<String> {
    let stamp = timestamp.format(format_description!(
        "[year][month][day]-[hour][minute][second]"
    ))?;
    Ok(format!("{}-{:04}.png", stamp, frame_index))
}

/// Local time if the offset can be determined, UTC otherwise
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
