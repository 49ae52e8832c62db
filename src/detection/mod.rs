pub mod contours;
pub mod fingers;
pub mod geometry;
pub mod preprocessing;
pub mod ranking;

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::config::{AppConfig, ContourConfig, MorphologyConfig, SkinConfig};
use crate::models::{Contour, FrameResult, HandCandidate};
use fingers::FingerDetector;
use ranking::{ContourRanking, select_hand};

/// Per-frame hand detection: mask, contours, ranking, finger scan, selection.
///
/// Holds no per-frame state, so one detector can process any number of
/// frames and always gives the same answer for the same input.
#[derive(Debug, Clone)]
pub struct HandDetector {
    pub skin: SkinConfig,
    pub morphology: MorphologyConfig,
    pub contours: ContourConfig,
    pub fingers: FingerDetector,
    pub mask_scale: f32,
}

impl HandDetector {
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            skin: config.skin,
            morphology: config.morphology,
            contours: config.contours,
            fingers: FingerDetector::new(config.fingers),
            mask_scale: config.output.mask_scale,
        }
    }

    /// Run the full pipeline on a color frame
    pub fn detect(&self, frame: &RgbImage) -> FrameResult {
        let mask = self.get_mask(frame);
        self.detect_in_mask(&mask)
    }

    /// Run everything after skin segmentation
    pub fn detect_in_mask(&self, mask: &GrayImage) -> FrameResult {
        let contours = self.get_contours(mask);
        self.analyze(&contours, mask)
    }

    /// Rank contours, scan the top two for fingers and package the hand
    pub fn analyze(&self, contours: &[Contour], mask: &GrayImage) -> FrameResult {
        let ranking = ContourRanking::from_contours(contours);

        let candidates: Vec<HandCandidate> = ranking
            .iter()
            .map(|ranked| {
                let matches = self.fingers.scan(&contours[ranked.index]);
                debug!(
                    contour = ranked.index,
                    area = ranked.area,
                    points = contours[ranked.index].len(),
                    fingers = matches.len(),
                    "scanned candidate"
                );
                HandCandidate {
                    contour: ranked,
                    matches,
                }
            })
            .collect();

        let hand = select_hand(candidates);
        if let Some(candidate) = &hand {
            debug!(
                contour = candidate.contour.index,
                fingers = candidate.finger_count(),
                "hand selected"
            );
        }

        FrameResult::assemble(hand, contours, ranking.slots(), mask, self.mask_scale)
    }

    /// Raw skin segmentation of a frame
    pub fn get_skin_mask(&self, frame: &RgbImage) -> GrayImage {
        preprocessing::skin_mask(frame, &self.skin)
    }

    /// Skin segmentation followed by morphological cleanup
    pub fn get_mask(&self, frame: &RgbImage) -> GrayImage {
        self.clean_mask(&self.get_skin_mask(frame))
    }

    pub fn clean_mask(&self, mask: &GrayImage) -> GrayImage {
        preprocessing::clean_mask(mask, &self.morphology)
    }

    /// Outer contours of a binary mask (for debugging)
    pub fn get_contours(&self, mask: &GrayImage) -> Vec<Contour> {
        contours::find_contours(mask, self.contours.approximation)
    }
}

impl Default for HandDetector {
    fn default() -> Self {
        Self::new()
    }
}
