use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict AABB overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Strict overlap of the horizontal extents only.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }

    /// Whether the bottom edge lies in `[surface.y - above, surface.y + below]`
    /// while the horizontal extents overlap. This is the "standing on" test
    /// every entity uses against platforms, with entity-specific bands.
    pub fn rests_on(&self, surface: &Rect, above: f32, below: f32) -> bool {
        let feet = self.bottom();
        feet >= surface.y - above
            && feet <= surface.y + below
            && self.overlaps_horizontally(surface)
    }

    /// Move vertically so the bottom edge sits exactly on `surface_y`.
    pub fn snap_bottom_to(&mut self, surface_y: f32) {
        self.y = surface_y - self.height;
    }
}
