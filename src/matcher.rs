//! Overlap-based match detection: decides which shadow target (if any) a
//! released item landed on.

use crate::geometry::{Point, Rect, overlap_percentage};

/// Default share of the dragged item that must cover a shadow to count as a drop.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 70.0;

/// A shadow target on screen, identified by the item id it shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub rect: Rect,
}

/// Best qualifying candidate of a release.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetHit<'a> {
    pub id: &'a str,
    pub overlap: f64,
    pub rect: Rect,
}

/// Result of a release. `NoMatch` is an explicit negative signal so the caller can
/// play "try again" feedback.
#[derive(Clone, Debug, PartialEq)]
pub enum Detection<'a> {
    Hit(TargetHit<'a>),
    NoMatch,
}

impl<'a> Detection<'a> {
    pub fn hit(&self) -> Option<&TargetHit<'a>> {
        match self {
            Detection::Hit(h) => Some(h),
            Detection::NoMatch => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MatchDetector {
    threshold: f64,
}

impl Default for MatchDetector {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAP_THRESHOLD)
    }
}

impl MatchDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Pick the candidate with the highest overlap at or above the threshold.
    /// Ties keep the first candidate seen.
    pub fn detect<'a, I>(&self, dragged: &Rect, candidates: I) -> Detection<'a>
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        if dragged.area() <= 0.0 {
            return Detection::NoMatch;
        }
        let mut best: Option<TargetHit<'a>> = None;
        for cand in candidates {
            let overlap = overlap_percentage(dragged, &cand.rect);
            if overlap < self.threshold {
                continue;
            }
            if let Some(b) = &best {
                if overlap <= b.overlap {
                    continue;
                }
            }
            best = Some(TargetHit {
                id: cand.id,
                overlap,
                rect: cand.rect,
            });
        }
        match best {
            Some(hit) => Detection::Hit(hit),
            None => Detection::NoMatch,
        }
    }

    /// Candidate with the largest non-zero overlap regardless of threshold; used
    /// for hover highlighting while a drag is in progress.
    pub fn hovered<'a, I>(&self, dragged: &Rect, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        let mut best: Option<(&'a str, f64)> = None;
        for cand in candidates {
            let overlap = overlap_percentage(dragged, &cand.rect);
            if overlap <= 0.0 {
                continue;
            }
            if best.is_none_or(|(_, b)| overlap > b) {
                best = Some((cand.id, overlap));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// How a release resolves against the item being dragged.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// Dropped on its own, not yet matched shadow.
    Correct { item_id: String, position: Point },
    /// Dropped on its own shadow which is already filled in; no feedback.
    AlreadyMatched { item_id: String },
    /// Dropped on another shadow or on nothing.
    Wrong {
        item_id: String,
        target_id: Option<String>,
        position: Point,
    },
}

/// Turn a detection into a game outcome for `item_id`.
///
/// `is_matched` reports whether a shadow is already filled in.
pub fn resolve_drop(
    item_id: &str,
    dragged: &Rect,
    detection: &Detection<'_>,
    is_matched: impl Fn(&str) -> bool,
) -> DropOutcome {
    match detection {
        Detection::Hit(hit) if hit.id == item_id => {
            if is_matched(hit.id) {
                DropOutcome::AlreadyMatched {
                    item_id: item_id.to_string(),
                }
            } else {
                DropOutcome::Correct {
                    item_id: item_id.to_string(),
                    position: hit.rect.center(),
                }
            }
        }
        Detection::Hit(hit) => DropOutcome::Wrong {
            item_id: item_id.to_string(),
            target_id: Some(hit.id.to_string()),
            position: dragged.center(),
        },
        Detection::NoMatch => DropOutcome::Wrong {
            item_id: item_id.to_string(),
            target_id: None,
            position: dragged.center(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAGGED: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    // Target that covers exactly `pct` percent of DRAGGED (horizontal slice).
    fn target_covering(pct: f64) -> Rect {
        Rect::new(100.0 - pct, 0.0, 200.0, 100.0)
    }

    #[test]
    fn test_selects_highest_qualifying_candidate() {
        let cands = vec![
            Candidate { id: "cat", rect: target_covering(72.0) },
            Candidate { id: "dog", rect: target_covering(85.0) },
            Candidate { id: "rabbit", rect: target_covering(40.0) },
        ];
        let det = MatchDetector::new(70.0).detect(&DRAGGED, cands);
        let hit = det.hit().expect("expected a hit");
        assert_eq!(hit.id, "dog");
        assert!((hit.overlap - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let cands = vec![
            Candidate { id: "first", rect: target_covering(80.0) },
            Candidate { id: "second", rect: target_covering(80.0) },
        ];
        let det = MatchDetector::default().detect(&DRAGGED, cands);
        assert_eq!(det.hit().map(|h| h.id), Some("first"));
    }

    #[test]
    fn test_below_threshold_is_no_match() {
        let cands = vec![Candidate { id: "cat", rect: target_covering(69.9) }];
        assert_eq!(MatchDetector::new(70.0).detect(&DRAGGED, cands), Detection::NoMatch);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let cands = vec![Candidate { id: "cat", rect: target_covering(50.0) }];
        assert!(MatchDetector::new(50.0).detect(&DRAGGED, cands).hit().is_some());
    }

    #[test]
    fn test_zero_area_dragged_never_matches() {
        let dragged = Rect::new(10.0, 10.0, 0.0, 0.0);
        let cands = vec![Candidate { id: "cat", rect: Rect::new(0.0, 0.0, 100.0, 100.0) }];
        assert_eq!(MatchDetector::new(0.0001).detect(&dragged, cands), Detection::NoMatch);
    }

    #[test]
    fn test_hovered_ignores_threshold() {
        let cands = vec![
            Candidate { id: "cat", rect: target_covering(10.0) },
            Candidate { id: "dog", rect: target_covering(30.0) },
        ];
        assert_eq!(MatchDetector::default().hovered(&DRAGGED, cands), Some("dog"));
    }

    #[test]
    fn test_resolve_drop_variants() {
        let own = Detection::Hit(TargetHit {
            id: "cat",
            overlap: 90.0,
            rect: Rect::new(200.0, 0.0, 100.0, 100.0),
        });
        match resolve_drop("cat", &DRAGGED, &own, |_| false) {
            DropOutcome::Correct { position, .. } => assert_eq!(position, Point::new(250.0, 50.0)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            resolve_drop("cat", &DRAGGED, &own, |_| true),
            DropOutcome::AlreadyMatched { item_id: "cat".into() }
        );
        match resolve_drop("dog", &DRAGGED, &own, |_| false) {
            DropOutcome::Wrong { target_id, position, .. } => {
                assert_eq!(target_id.as_deref(), Some("cat"));
                assert_eq!(position, DRAGGED.center());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            resolve_drop("dog", &DRAGGED, &Detection::NoMatch, |_| false),
            DropOutcome::Wrong { target_id: None, .. }
        ));
    }
}
