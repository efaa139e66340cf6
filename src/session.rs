//! One play session on a topic board: the drag interaction handler plus the
//! progression it drives.
//!
//! Flow: `pointer_down` on the draggable grabs it, `pointer_move` follows the
//! pointer, `pointer_up` measures overlap against every shadow target and
//! resolves the drop. The draggable always returns to its home slot.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::feedback::{Effect, FeedbackPlan, plan_feedback};
use crate::geometry::{Point, Rect};
use crate::layout::{BoardLayout, Viewport};
use crate::matcher::{Candidate, DropOutcome, MatchDetector, resolve_drop};
use crate::progression::{MatchRecord, Progression};
use crate::rng::Lcg;
use crate::topics::{Item, Topic};

/// Item currently held by the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    /// Pointer position relative to the item's top-left corner at grab time.
    pub grab_offset: Point,
    pub rect: Rect,
    pub hovered: Option<&'static str>,
}

/// Result of releasing the draggable.
#[derive(Clone, Debug, PartialEq)]
pub struct DropResult {
    pub outcome: DropOutcome,
    pub record: Option<MatchRecord>,
    pub plan: FeedbackPlan,
    /// Identifies the effect so a late hide callback cannot clear a newer one.
    pub seq: u64,
}

/// What happened when a feedback window closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackEnd {
    /// Stale or unknown sequence number; nothing changed.
    Ignored,
    Hidden,
    NextItem,
    Complete,
}

#[derive(Debug)]
pub struct Session {
    topic: &'static Topic,
    progression: Progression,
    detector: MatchDetector,
    layout: BoardLayout,
    drag: Option<DragState>,
    effect: Option<Effect>,
    /// Set after a correct drop until its feedback window closes.
    awaiting_next: bool,
    seq: u64,
    shuffle: bool,
}

impl Session {
    pub fn new(
        topic: &'static Topic,
        config: &GameConfig,
        viewport: Viewport,
        rng: &mut Lcg,
    ) -> Result<Self, GameError> {
        if topic.items.is_empty() {
            return Err(GameError::EmptyTopic(topic.id.to_string()));
        }
        let ids = topic.items.iter().map(|i| i.id);
        let progression = if config.shuffle {
            Progression::shuffled(ids, rng)
        } else {
            Progression::new(ids)
        };
        tracing::info!(topic = topic.id, items = topic.items.len(), "session started");
        Ok(Self {
            topic,
            progression,
            detector: MatchDetector::new(config.overlap_threshold),
            layout: BoardLayout::compute(viewport, topic.items.len()),
            drag: None,
            effect: None,
            awaiting_next: false,
            seq: 0,
            shuffle: config.shuffle,
        })
    }

    /// Sequence number of the most recent feedback window.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Number later feedback windows after `seq`, so timers armed by an
    /// earlier session can never match one of ours.
    pub fn continue_after(&mut self, seq: u64) {
        self.seq = self.seq.max(seq);
    }

    pub fn topic(&self) -> &'static Topic {
        self.topic
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.layout = BoardLayout::compute(viewport, self.topic.items.len());
        self.drag = None;
    }

    pub fn current_item(&self) -> &'static Item {
        &self.topic.items[self.progression.current_index() % self.topic.items.len()]
    }

    pub fn is_matched(&self, item_id: &str) -> bool {
        self.progression.is_matched(item_id)
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn effect(&self) -> Option<&Effect> {
        self.effect.as_ref()
    }

    /// Where to draw the draggable; `None` while a success window is open or the
    /// topic is finished.
    pub fn draggable_rect(&self) -> Option<Rect> {
        if self.awaiting_next || self.progression.is_complete() {
            return None;
        }
        Some(
            self.drag
                .as_ref()
                .map(|d| d.rect)
                .unwrap_or(self.layout.draggable_home),
        )
    }

    /// Shadow targets paired with their item ids, in catalog order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate<'static>> + '_ {
        let items: &'static [Item] = self.topic.items;
        items
            .iter()
            .zip(self.layout.targets.iter())
            .map(|(item, rect)| Candidate { id: item.id, rect: *rect })
    }

    /// Grab the draggable if `p` is on it.
    pub fn pointer_down(&mut self, p: Point) -> bool {
        let Some(home) = self.draggable_rect() else {
            return false;
        };
        if self.drag.is_some() || !home.contains(p) {
            return false;
        }
        self.drag = Some(DragState {
            grab_offset: Point::new(p.x - home.x, p.y - home.y),
            rect: home,
            hovered: None,
        });
        tracing::debug!(item = self.current_item().id, "drag start");
        true
    }

    pub fn pointer_move(&mut self, p: Point) {
        let Some(mut drag) = self.drag.take() else {
            return;
        };
        drag.rect = drag
            .rect
            .moved_to(Point::new(p.x - drag.grab_offset.x, p.y - drag.grab_offset.y));
        drag.hovered = self.detector.hovered(&drag.rect, self.candidates());
        self.drag = Some(drag);
    }

    /// Release the draggable at `p` and resolve the drop.
    pub fn pointer_up(&mut self, p: Point, config: &GameConfig, rng: &mut Lcg) -> Option<DropResult> {
        self.pointer_move(p);
        let drag = self.drag.take()?;
        let item = self.current_item();

        let detection = self.detector.detect(&drag.rect, self.candidates());
        let outcome = resolve_drop(item.id, &drag.rect, &detection, |id| {
            self.progression.is_matched(id)
        });
        let record = match &outcome {
            DropOutcome::Correct { item_id, .. } => {
                let rec = self.progression.record_match(item_id);
                self.awaiting_next = true;
                Some(rec)
            }
            DropOutcome::Wrong { .. } => {
                self.progression.record_miss();
                None
            }
            DropOutcome::AlreadyMatched { .. } => None,
        };
        tracing::debug!(?outcome, "drop resolved");

        let plan = plan_feedback(&outcome, item, config, rng);
        if let Some(effect) = &plan.effect {
            self.seq += 1;
            self.effect = Some(effect.clone());
        }
        Some(DropResult {
            outcome,
            record,
            plan,
            seq: self.seq,
        })
    }

    /// Abort a drag without resolving it.
    pub fn pointer_cancel(&mut self) {
        self.drag = None;
    }

    /// Close the feedback window opened by drop `seq`.
    pub fn finish_feedback(&mut self, seq: u64) -> FeedbackEnd {
        if seq != self.seq {
            return FeedbackEnd::Ignored;
        }
        self.effect = None;
        if !self.awaiting_next {
            return FeedbackEnd::Hidden;
        }
        self.awaiting_next = false;
        if self.progression.is_complete() {
            FeedbackEnd::Complete
        } else {
            FeedbackEnd::NextItem
        }
    }

    /// Back to the first level with nothing matched.
    pub fn reset(&mut self, rng: &mut Lcg) {
        if self.shuffle {
            self.progression.reset_shuffled(rng);
        } else {
            self.progression.reset();
        }
        self.drag = None;
        self.effect = None;
        self.awaiting_next = false;
        self.seq += 1;
        tracing::info!(topic = self.topic.id, "session reset");
    }
}
