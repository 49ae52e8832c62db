//! Finger detection along a hand contour.
//!
//! A finger shows up on the silhouette boundary as a narrow protrusion: the
//! boundary runs straight along one side, turns sharply at the tip and runs
//! straight back along the other side, parallel to the first. The scan slides
//! a window of `span` contour points over the boundary:
//!
//! ```text
//!                 c  (apex, index start + span/2)
//!                / \
//!               /   \
//!    (start)   s     e   (start + span)
//!              |     |
//!             sc     ec  (span/4 further out)
//!              |     |
//!             se     ee  (span/2 further out)
//! ```
//!
//! and accepts a window when the apex angle is acute, both flanks beyond the
//! bases are straight and parallel, and the finger is narrow enough. After a
//! match the whole window is skipped so one finger is reported once.

use tracing::{debug, trace};

use crate::config::FingerParams;
use crate::detection::geometry::{distance, normalized_dot, three_point_angle};
use crate::models::{Contour, Finger, FingerMatch};

/// Sliding-window finger detector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FingerDetector {
    params: FingerParams,
}

/// Outcome of one scan window
#[derive(Debug, Clone, Copy, PartialEq)]
enum Window {
    Accept(FingerMatch),
    Reject(Rejection),
}

/// First test a window failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Shallow,
    ApexAngle,
    LeftFlankBent,
    RightFlankBent,
    NotParallel,
    TooWide,
}

impl FingerDetector {
    pub fn new(params: FingerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FingerParams {
        &self.params
    }

    /// Fingers found on the contour, in scan order
    pub fn detect(&self, contour: &Contour) -> Vec<Finger> {
        self.scan(contour).into_iter().map(|m| m.finger).collect()
    }

    /// Accepted windows with their supporting points, in scan order
    pub fn scan(&self, contour: &Contour) -> Vec<FingerMatch> {
        let n = contour.len();
        let mut matches = Vec::new();
        if n == 0 || self.params.span == 0 {
            return matches;
        }

        let mut start = 0;
        while start < n {
            let skip = match self.evaluate(contour, start) {
                Window::Accept(found) => {
                    debug!(
                        start,
                        tip_x = found.finger.tip.x,
                        tip_y = found.finger.tip.y,
                        apex = found.apex_angle,
                        left = found.left_flank_angle,
                        right = found.right_flank_angle,
                        dot = found.parallelism,
                        "finger matched"
                    );
                    matches.push(found);
                    self.params.span - 1
                }
                Window::Reject(reason) => {
                    trace!(start, ?reason, "window rejected");
                    0
                }
            };
            start += skip + 1;
        }

        matches
    }

    fn evaluate(&self, contour: &Contour, start: usize) -> Window {
        let p = &self.params;
        let start = start as isize;
        let span = p.span as isize;
        let straight_span = span / 2;

        let s = contour.at(start);
        let c = contour.at(start + span / 2);
        let e = contour.at(start + span);

        if distance(s, c) <= p.min_finger_top_length
            || distance(e, c) <= p.min_finger_top_length
        {
            return Window::Reject(Rejection::Shallow);
        }

        let apex_angle = three_point_angle(s, c, e);
        if !p.accepts_apex_angle(apex_angle) {
            return Window::Reject(Rejection::ApexAngle);
        }

        let left_mid = contour.at(start - straight_span / 2);
        let left_end = contour.at(start - straight_span);
        let left_flank_angle = three_point_angle(left_mid, s, left_end);
        if !p.is_straight(left_flank_angle) {
            return Window::Reject(Rejection::LeftFlankBent);
        }

        let right_mid = contour.at(start + span + straight_span / 2);
        let right_end = contour.at(start + span + straight_span);
        let right_flank_angle = three_point_angle(right_mid, e, right_end);
        if !p.is_straight(right_flank_angle) {
            return Window::Reject(Rejection::RightFlankBent);
        }

        let parallelism = match normalized_dot(s, left_end, e, right_end) {
            Some(dot) if p.is_parallel(dot) => dot,
            _ => return Window::Reject(Rejection::NotParallel),
        };

        if !p.is_narrow(distance(s, e)) || !p.is_narrow(distance(left_end, right_end)) {
            return Window::Reject(Rejection::TooWide);
        }

        Window::Accept(FingerMatch {
            finger: Finger {
                root: left_end.midpoint(right_end),
                tip: c,
            },
            start: start as usize,
            left_base: s,
            right_base: e,
            left_end,
            right_end,
            apex_angle,
            left_flank_angle,
            right_flank_angle,
            parallelism,
        })
    }
}
