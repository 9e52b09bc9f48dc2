mod evasive;
mod interpolation;
mod throttle;

pub use evasive::{nudge_out_of_zone, EdgeBand, EvasivePositioner, NUDGE_OFFSET};
pub use interpolation::*;
pub use throttle::Throttle;

use serde::{Deserialize, Serialize};

/// Largest value either coordinate of a placed element may take.
/// Leaves room for the element's own footprint at the right/bottom edge.
pub const MAX_COORDINATE: f32 = 90.0;

/// Top-left anchor of an absolutely placed element, in viewport percentages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPosition {
    pub top: f32,
    pub left: f32,
}

impl ViewportPosition {
    /// Create a position, clamping both coordinates into `[0, 90]`
    pub fn new(top: f32, left: f32) -> Self {
        Self {
            top: top.clamp(0.0, MAX_COORDINATE),
            left: left.clamp(0.0, MAX_COORDINATE),
        }
    }

    /// Convert to terminal cell coordinates inside a viewport of the given size
    pub fn to_terminal(&self, width: u16, height: u16) -> (u16, u16) {
        if width == 0 || height == 0 {
            return (0, 0);
        }
        let col = (self.left / 100.0 * width as f32).round() as u16;
        let row = (self.top / 100.0 * height as f32).round() as u16;
        (col.min(width - 1), row.min(height - 1))
    }

    /// Linear interpolation toward another position
    pub fn lerp(&self, target: &ViewportPosition, t: f32) -> ViewportPosition {
        let t = t.clamp(0.0, 1.0);
        ViewportPosition {
            top: self.top + (target.top - self.top) * t,
            left: self.left + (target.left - self.left) * t,
        }
    }
}

/// Axis-aligned rectangle (percentage space) a placed element must avoid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForbiddenZone {
    pub left_min: f32,
    pub left_max: f32,
    pub top_min: f32,
    pub top_max: f32,
}

impl ForbiddenZone {
    pub fn new(left_min: f32, left_max: f32, top_min: f32, top_max: f32) -> Self {
        Self {
            left_min,
            left_max,
            top_min,
            top_max,
        }
    }

    /// Whether a point lies inside the zone (edges included)
    pub fn contains(&self, left: f32, top: f32) -> bool {
        left >= self.left_min && left <= self.left_max && top >= self.top_min && top <= self.top_max
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left_min + self.left_max) / 2.0,
            (self.top_min + self.top_max) / 2.0,
        )
    }

    /// A zone is usable when both ranges are non-empty and inside the viewport
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f32| (0.0..=100.0).contains(&v);
        self.left_min < self.left_max
            && self.top_min < self.top_max
            && in_range(self.left_min)
            && in_range(self.left_max)
            && in_range(self.top_min)
            && in_range(self.top_max)
    }
}

impl Default for ForbiddenZone {
    /// The centre of the screen, where the mascot sits
    fn default() -> Self {
        Self::new(35.0, 65.0, 38.0, 62.0)
    }
}

/// Pixel size of one terminal cell, used to express cell positions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

/// Last observed pointer location in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPoint {
    pub x: f32,
    pub y: f32,
}

impl PointerPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pointer at the centre of a terminal cell
    pub fn from_cell(col: u16, row: u16, cell: CellSize) -> Self {
        Self {
            x: (col as f32 + 0.5) * cell.width,
            y: (row as f32 + 0.5) * cell.height,
        }
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rendered bounding box of the evasive target, in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl TargetBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds covering a block of terminal cells
    pub fn from_cells(col: u16, row: u16, cols: u16, rows: u16, cell: CellSize) -> Self {
        Self {
            x: col as f32 * cell.width,
            y: row as f32 * cell.height,
            width: cols as f32 * cell.width,
            height: rows as f32 * cell.height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
