//! Axis-aligned rectangles and the overlap calculation used for drop hit-testing.
//!
//! Coordinates are canvas pixels with the origin in the top-left corner and `y`
//! growing downward, matching `getBoundingClientRect()` / canvas space.

/// A point in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Axis-aligned rectangle (position of the top-left corner + size).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered_square(center: Point, size: f64) -> Self {
        Self::new(center.x - size * 0.5, center.y - size * 0.5, size, size)
    }

    pub fn left(&self) -> f64 {
        self.x
    }
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    pub fn top(&self) -> f64 {
        self.y
    }
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area; negative sizes count as empty.
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open containment test (left/top edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.y >= self.top() && p.x < self.right() && p.y < self.bottom()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same size, top-left corner moved to `origin`.
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Shared region of two rectangles. Rectangles that only touch along an
    /// edge or a corner do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Percentage (0..=100) of `dragged`'s area covered by `target`.
///
/// A zero-area (or non-finite) dragged rectangle always yields 0 so callers never
/// divide by zero.
pub fn overlap_percentage(dragged: &Rect, target: &Rect) -> f64 {
    let dragged_area = dragged.area();
    if dragged_area <= 0.0 || !dragged_area.is_finite() {
        return 0.0;
    }
    match dragged.intersection(target) {
        Some(shared) => (shared.area() / dragged_area * 100.0).min(100.0),
        None => 0.0,
    }
}
