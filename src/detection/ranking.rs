//! Contour ranking and hand selection.
//!
//! Only the two largest regions of a frame are considered as hand candidates.
//! Between them, the one showing more fingers is the hand.

use crate::models::{Contour, HandCandidate, RankedContour};

/// The two largest contours seen so far, largest first
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContourRanking {
    slots: [Option<RankedContour>; 2],
}

impl ContourRanking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank every contour of a frame by enclosed area
    pub fn from_contours(contours: &[Contour]) -> Self {
        let mut ranking = Self::new();
        for (index, contour) in contours.iter().enumerate() {
            ranking.offer(RankedContour {
                index,
                area: contour.area(),
            });
        }
        ranking
    }

    /// Carry a candidate down the slots, bumping any strictly smaller entry
    pub fn offer(&mut self, candidate: RankedContour) {
        let mut carried = Some(candidate);
        for slot in &mut self.slots {
            swap_if_bigger(slot, &mut carried);
        }
    }

    pub fn first(&self) -> Option<RankedContour> {
        self.slots[0]
    }

    pub fn second(&self) -> Option<RankedContour> {
        self.slots[1]
    }

    pub fn slots(&self) -> [Option<RankedContour>; 2] {
        self.slots
    }

    /// Present slots in rank order
    pub fn iter(&self) -> impl Iterator<Item = RankedContour> + '_ {
        self.slots.iter().map_while(|slot| *slot)
    }
}

// An empty slot or carry counts as area 0, so a zero-area contour never ranks.
fn swap_if_bigger(slot: &mut Option<RankedContour>, carried: &mut Option<RankedContour>) {
    let slot_area = slot.map_or(0.0, |r| r.area);
    let carried_area = carried.map_or(0.0, |r| r.area);
    if slot_area < carried_area {
        std::mem::swap(slot, carried);
    }
}

/// Pick the hand among candidates given in rank order.
///
/// The candidate with strictly more fingers wins; on a tie the earlier
/// (larger) one is kept. Candidates without fingers never qualify.
pub fn select_hand<I>(candidates: I) -> Option<HandCandidate>
where
    I: IntoIterator<Item = HandCandidate>,
{
    let mut best: Option<HandCandidate> = None;
    for candidate in candidates {
        if candidate.finger_count() == 0 {
            continue;
        }
        let better = best
            .as_ref()
            .is_none_or(|current| current.finger_count() < candidate.finger_count());
        if better {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(index: usize, area: f64) -> RankedContour {
        RankedContour { index, area }
    }

    #[test]
    fn test_keeps_two_largest_in_order() {
        let mut ranking = ContourRanking::new();
        for (i, area) in [50.0, 10.0, 80.0, 30.0, 70.0].into_iter().enumerate() {
            ranking.offer(ranked(i, area));
        }

        assert_eq!(ranking.first(), Some(ranked(2, 80.0)));
        assert_eq!(ranking.second(), Some(ranked(4, 70.0)));
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let mut ranking = ContourRanking::new();
        ranking.offer(ranked(0, 40.0));
        ranking.offer(ranked(1, 40.0));
        ranking.offer(ranked(2, 40.0));

        assert_eq!(ranking.first().map(|r| r.index), Some(0));
        assert_eq!(ranking.second().map(|r| r.index), Some(1));
    }

    #[test]
    fn test_absent_slots() {
        let empty = ContourRanking::new();
        assert_eq!(empty.slots(), [None, None]);
        assert_eq!(empty.iter().count(), 0);

        let mut single = ContourRanking::new();
        single.offer(ranked(0, 12.0));
        assert_eq!(single.slots(), [Some(ranked(0, 12.0)), None]);
        assert_eq!(single.iter().count(), 1);
    }

    #[test]
    fn test_zero_area_never_ranks() {
        let mut ranking = ContourRanking::new();
        ranking.offer(ranked(0, 0.0));
        assert_eq!(ranking.first(), None);
    }

    #[test]
    fn test_no_fingers_no_hand() {
        let candidates = vec![
            HandCandidate {
                contour: ranked(0, 900.0),
                matches: vec![],
            },
            HandCandidate {
                contour: ranked(1, 500.0),
                matches: vec![],
            },
        ];
        assert!(select_hand(candidates).is_none());
        assert!(select_hand(Vec::new()).is_none());
    }
}
