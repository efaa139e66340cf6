//! Screen layout in canvas pixels: shadow grid, draggable home slot and buttons.
//!
//! Layout is recomputed whenever the canvas is resized. A degenerate viewport
//! (zero, negative or non-finite size) falls back to the default 960x720 grid so
//! targets always have a position.

use crate::geometry::{Point, Rect};

pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 960.0,
    height: 720.0,
};

pub const MAX_COLUMNS: usize = 5;
pub const TARGET_SIZE: f64 = 144.0;
pub const TARGET_GAP: f64 = 16.0;
pub const MIN_TARGET_SIZE: f64 = 32.0;
/// Height of the bottom strip holding the draggable item.
pub const DRAG_STRIP_HEIGHT: f64 = 192.0;
pub const DRAGGABLE_SIZE: f64 = 160.0;
const PAD: f64 = 16.0;
const BUTTON: f64 = 48.0;

const CARD_COLUMNS: usize = 4;
const CARD_WIDTH: f64 = 200.0;
const CARD_HEIGHT: f64 = 180.0;
const CARD_GAP: f64 = 24.0;
const HOME_HEADER: f64 = 170.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// This viewport, or the default one when it cannot hold a layout.
    pub fn or_default(self) -> Self {
        if self.is_usable() {
            self
        } else {
            tracing::warn!(
                width = self.width,
                height = self.height,
                "unusable viewport, using default grid placement"
            );
            DEFAULT_VIEWPORT
        }
    }
}

/// Uniform grid of square cells, row-major, last row left-aligned.
fn grid(
    count: usize,
    max_cols: usize,
    cell: (f64, f64),
    gap: f64,
    area: Rect,
) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let cols = count.min(max_cols).max(1);
    let rows = count.div_ceil(cols);
    let grid_w = cols as f64 * cell.0 + (cols - 1) as f64 * gap;
    let grid_h = rows as f64 * cell.1 + (rows - 1) as f64 * gap;
    let x0 = area.x + (area.width - grid_w) * 0.5;
    let y0 = area.y + ((area.height - grid_h) * 0.5).max(0.0);
    (0..count)
        .map(|i| {
            let c = (i % cols) as f64;
            let r = (i / cols) as f64;
            Rect::new(x0 + c * (cell.0 + gap), y0 + r * (cell.1 + gap), cell.0, cell.1)
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardLayout {
    pub viewport: Viewport,
    /// One rect per topic item, in catalog order.
    pub targets: Vec<Rect>,
    pub draggable_home: Rect,
    pub back_button: Rect,
}

impl BoardLayout {
    pub fn compute(viewport: Viewport, item_count: usize) -> Self {
        let vp = viewport.or_default();
        let strip = DRAG_STRIP_HEIGHT.min(vp.height * 0.4);
        let area = Rect::new(PAD, PAD, vp.width - 2.0 * PAD, vp.height - strip - 2.0 * PAD);

        let cols = item_count.clamp(1, MAX_COLUMNS);
        let rows = item_count.max(1).div_ceil(cols);
        let fit_w = (area.width - (cols - 1) as f64 * TARGET_GAP) / cols as f64;
        let fit_h = (area.height - (rows - 1) as f64 * TARGET_GAP) / rows as f64;
        let size = TARGET_SIZE.min(fit_w).min(fit_h).max(MIN_TARGET_SIZE);

        let targets = grid(item_count, MAX_COLUMNS, (size, size), TARGET_GAP, area);
        let drag_size = DRAGGABLE_SIZE.min(strip - 2.0 * PAD).max(MIN_TARGET_SIZE);
        let draggable_home = Rect::centered_square(
            Point::new(vp.width * 0.5, vp.height - strip * 0.5),
            drag_size,
        );
        Self {
            viewport: vp,
            targets,
            draggable_home,
            back_button: Rect::new(PAD, PAD, BUTTON, BUTTON),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HomeLayout {
    pub viewport: Viewport,
    /// One card per topic, in catalog order.
    pub cards: Vec<Rect>,
    pub sound_toggle: Rect,
    pub test_voice: Rect,
}

impl HomeLayout {
    pub fn compute(viewport: Viewport, topic_count: usize) -> Self {
        let vp = viewport.or_default();
        let area = Rect::new(PAD, HOME_HEADER, vp.width - 2.0 * PAD, vp.height - HOME_HEADER - PAD);
        let cols = topic_count.clamp(1, CARD_COLUMNS);
        let fit_w = (area.width - (cols - 1) as f64 * CARD_GAP) / cols as f64;
        let w = CARD_WIDTH.min(fit_w).max(MIN_TARGET_SIZE);
        let h = CARD_HEIGHT * (w / CARD_WIDTH);
        Self {
            viewport: vp,
            cards: grid(topic_count, CARD_COLUMNS, (w, h), CARD_GAP, area),
            sound_toggle: Rect::new(vp.width - PAD - 150.0, PAD, 150.0, BUTTON),
            test_voice: Rect::new(vp.width - PAD - 150.0, PAD + BUTTON + 8.0, 150.0, 40.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationLayout {
    pub viewport: Viewport,
    pub play_again: Rect,
    pub back_button: Rect,
}

impl CelebrationLayout {
    pub fn compute(viewport: Viewport) -> Self {
        let vp = viewport.or_default();
        Self {
            viewport: vp,
            play_again: Rect::new(vp.width * 0.5 - 140.0, vp.height * 0.68, 280.0, 72.0),
            back_button: Rect::new(PAD, PAD, BUTTON, BUTTON),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_targets_in_two_rows_of_five() {
        let l = BoardLayout::compute(DEFAULT_VIEWPORT, 10);
        assert_eq!(l.targets.len(), 10);
        assert_eq!(l.targets[0].y, l.targets[4].y);
        assert!(l.targets[5].y > l.targets[0].y);
        assert_eq!(l.targets[5].x, l.targets[0].x);
        assert_eq!(l.targets[0].width, TARGET_SIZE);
    }

    #[test]
    fn test_targets_do_not_overlap_each_other_or_draggable() {
        let l = BoardLayout::compute(Viewport::new(800.0, 600.0), 8);
        for (i, a) in l.targets.iter().enumerate() {
            assert!(a.intersection(&l.draggable_home).is_none());
            for b in &l.targets[i + 1..] {
                assert!(a.intersection(b).is_none());
            }
        }
    }

    #[test]
    fn test_degenerate_viewport_falls_back_to_default_grid() {
        let bad = BoardLayout::compute(Viewport::new(0.0, f64::NAN), 6);
        let good = BoardLayout::compute(DEFAULT_VIEWPORT, 6);
        assert_eq!(bad, good);
    }

    #[test]
    fn test_narrow_viewport_shrinks_cells() {
        let l = BoardLayout::compute(Viewport::new(400.0, 700.0), 10);
        assert!(l.targets[0].width < TARGET_SIZE);
        assert!(l.targets[4].right() <= 400.0);
    }

    #[test]
    fn test_home_cards() {
        let l = HomeLayout::compute(DEFAULT_VIEWPORT, 4);
        assert_eq!(l.cards.len(), 4);
        assert_eq!(l.cards[0].y, l.cards[3].y);
        assert!(l.cards.iter().all(|c| c.intersection(&l.sound_toggle).is_none()));
    }
}
