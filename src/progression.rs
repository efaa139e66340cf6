//! Level progression through one topic.
//!
//! `level` counts correct matches and selects the current item through a play
//! order permutation. A topic is complete once every item has been matched;
//! the completing match leaves `level` on the last index so it stays a valid
//! modulus index into the item list.

use std::collections::HashSet;

use crate::rng::Lcg;

/// Observable state of the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressState {
    InProgress { level: usize, matched: usize },
    Complete,
}

/// What `record_match` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRecord {
    Advanced { level: usize },
    Completed,
    /// Item was already matched (or the topic is finished); nothing changed.
    AlreadyMatched,
    /// Id is not one of this progression's items; nothing changed.
    Unknown,
}

#[derive(Clone, Debug)]
pub struct Progression {
    /// Item ids in catalog order.
    ids: Vec<String>,
    order: Vec<usize>,
    level: usize,
    complete: bool,
    matched: HashSet<String>,
}

impl Progression {
    /// Fresh progression over `ids` (catalog order), played in that order.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        Self {
            order: (0..ids.len()).collect(),
            ids,
            level: 0,
            complete: false,
            matched: HashSet::new(),
        }
    }

    /// Fresh progression with a shuffled play order.
    pub fn shuffled<I, S>(ids: I, rng: &mut Lcg) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut p = Self::new(ids);
        rng.shuffle(&mut p.order);
        p
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn item_count(&self) -> usize {
        self.ids.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn is_matched(&self, item_id: &str) -> bool {
        self.matched.contains(item_id)
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn state(&self) -> ProgressState {
        if self.complete {
            ProgressState::Complete
        } else {
            ProgressState::InProgress {
                level: self.level,
                matched: self.matched.len(),
            }
        }
    }

    /// Catalog index of the item to drag at the current level.
    pub fn current_index(&self) -> usize {
        if self.order.is_empty() {
            return 0;
        }
        self.order[self.level % self.order.len()]
    }

    /// Apply a correct match for `item_id`.
    pub fn record_match(&mut self, item_id: &str) -> MatchRecord {
        if !self.ids.iter().any(|id| id == item_id) {
            tracing::warn!(item = item_id, "match for unknown item ignored");
            return MatchRecord::Unknown;
        }
        if self.complete || self.matched.contains(item_id) {
            return MatchRecord::AlreadyMatched;
        }
        self.matched.insert(item_id.to_string());
        if self.matched.len() >= self.ids.len() {
            self.complete = true;
            tracing::info!(matched = self.matched.len(), "topic complete");
            return MatchRecord::Completed;
        }
        self.level += 1;
        tracing::debug!(level = self.level, matched = self.matched.len(), "level advanced");
        MatchRecord::Advanced { level: self.level }
    }

    /// A wrong drop. Progression is untouched; kept as an explicit transition so
    /// callers do not special-case it.
    pub fn record_miss(&mut self) -> ProgressState {
        tracing::debug!(level = self.level, "miss");
        self.state()
    }

    /// Back to level 0 with nothing matched, keeping the current play order.
    pub fn reset(&mut self) {
        self.level = 0;
        self.complete = false;
        self.matched.clear();
    }

    /// Back to level 0 and draw a new play order.
    pub fn reset_shuffled(&mut self, rng: &mut Lcg) {
        self.reset();
        self.order = (0..self.ids.len()).collect();
        rng.shuffle(&mut self.order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 4] = ["cat", "dog", "rabbit", "cow"];

    #[test]
    fn test_n_matches_complete_topic() {
        let mut p = Progression::new(IDS);
        for (i, id) in IDS.iter().enumerate() {
            let rec = p.record_match(id);
            if i + 1 < IDS.len() {
                assert_eq!(rec, MatchRecord::Advanced { level: i + 1 });
            } else {
                assert_eq!(rec, MatchRecord::Completed);
            }
        }
        assert_eq!(p.state(), ProgressState::Complete);
        assert!(p.level() < IDS.len());
    }

    #[test]
    fn test_miss_after_n_minus_one_keeps_level() {
        let mut p = Progression::new(IDS);
        for id in &IDS[..IDS.len() - 1] {
            p.record_match(id);
        }
        let before = p.level();
        let state = p.record_miss();
        assert_eq!(
            state,
            ProgressState::InProgress {
                level: before,
                matched: IDS.len() - 1
            }
        );
        assert_eq!(p.level(), IDS.len() - 1);
    }

    #[test]
    fn test_duplicate_match_is_ignored() {
        let mut p = Progression::new(IDS);
        p.record_match("cat");
        assert_eq!(p.record_match("cat"), MatchRecord::AlreadyMatched);
        assert_eq!(p.level(), 1);
        assert_eq!(p.matched_count(), 1);
    }

    #[test]
    fn test_reset_mid_session() {
        let mut p = Progression::new(IDS);
        p.record_match("cat");
        p.record_match("dog");
        p.reset();
        assert_eq!(p.level(), 0);
        assert_eq!(p.matched_count(), 0);
        assert!(!p.is_matched("cat"));
        assert_eq!(
            p.state(),
            ProgressState::InProgress {
                level: 0,
                matched: 0
            }
        );
    }

    #[test]
    fn test_reset_after_complete() {
        let mut p = Progression::new(["a", "b"]);
        p.record_match("a");
        p.record_match("b");
        assert!(p.is_complete());
        p.reset_shuffled(&mut Lcg::new(3));
        assert!(!p.is_complete());
        assert_eq!(p.level(), 0);
        let mut order = p.order().to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_current_index_follows_order() {
        let ids = ["a", "b", "c", "d", "e"];
        let mut p = Progression::shuffled(ids, &mut Lcg::new(99));
        let order = p.order().to_vec();
        assert_eq!(p.current_index(), order[0]);
        p.record_match(ids[order[0]]);
        assert_eq!(p.current_index(), order[1]);
    }

    #[test]
    fn test_foreign_ids_never_complete() {
        let mut p = Progression::new(IDS);
        for id in ["a", "b", "c", "d", "e"] {
            assert_eq!(p.record_match(id), MatchRecord::Unknown);
        }
        assert!(!p.is_complete());
        assert_eq!(p.matched_count(), 0);
        assert_eq!(p.level(), 0);
    }
}
