//! Frame sources.
//!
//! A source hands out frames one at a time until it runs dry. The detector
//! never sees where frames come from.

use image::{ImageFormat, ImageReader, RgbImage};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{HandError, HandResult};

pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> HandResult<Option<RgbImage>>;

    /// Human-readable origin of the frames
    fn name(&self) -> &str;
}

/// A single still image, yielded once
pub struct SingleImageSource {
    name: String,
    frame: Option<RgbImage>,
}

impl SingleImageSource {
    pub fn open(path: &Path) -> HandResult<Self> {
        let frame = load_rgb(path)?;
        Ok(Self::from_image(path.display().to_string(), frame))
    }

    pub fn from_image(name: impl Into<String>, frame: RgbImage) -> Self {
        Self {
            name: name.into(),
            frame: Some(frame),
        }
    }
}

impl FrameSource for SingleImageSource {
    fn next_frame(&mut self) -> HandResult<Option<RgbImage>> {
        Ok(self.frame.take())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Every image file in a directory, in file name order
pub struct ImageSequenceSource {
    name: String,
    pending: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path) -> HandResult<Self> {
        let mut frames: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && ImageFormat::from_path(path).is_ok())
            .collect();

        if frames.is_empty() {
            return Err(HandError::Source(format!(
                "No image files in {}",
                dir.display()
            )));
        }
        frames.sort();

        debug!(dir = %dir.display(), frames = frames.len(), "opened image sequence");
        Ok(Self {
            name: dir.display().to_string(),
            pending: frames.into(),
        })
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> HandResult<Option<RgbImage>> {
        match self.pending.pop_front() {
            Some(path) => load_rgb(&path).map(Some),
            None => Ok(None),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Open a directory as a sequence, anything else as a single image
pub fn open_source(path: &Path) -> HandResult<Box<dyn FrameSource>> {
    if path.is_dir() {
        Ok(Box::new(ImageSequenceSource::open(path)?))
    } else if path.is_file() {
        Ok(Box::new(SingleImageSource::open(path)?))
    } else {
        Err(HandError::Source(format!(
            "Input does not exist: {}",
            path.display()
        )))
    }
}

fn load_rgb(path: &Path) -> HandResult<RgbImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image.to_rgb8())
}
