//! Axis-aligned bounding boxes for coarse spatial filtering.

use geo::{BoundingRect, Geometry};

/// Axis-aligned bounding box in geographic coordinates (x = longitude,
/// y = latitude).
///
/// Envelopes are derived once per feature at ingestion time and used only
/// for index placement, never as the final intersection truth. All
/// containment and overlap checks are inclusive of the boundary, so a point
/// sitting exactly on an edge counts as inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    /// Create an envelope from two corner coordinates.
    ///
    /// Swapped bounds are normalized, so `new(4.0, 0.0, 0.0, 4.0)` yields
    /// the same envelope as `new(0.0, 0.0, 4.0, 4.0)`.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let (min_x, max_x) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (min_y, max_y) = if min_y <= max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate (zero-area) envelope for a single point.
    ///
    /// Used to query the index with a pointer coordinate.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Derive the envelope of a geometry.
    ///
    /// Returns `None` for geometries with no extent (e.g. an empty
    /// multi-geometry); such features are left unindexed.
    pub fn of(geometry: &Geometry<f64>) -> Option<Self> {
        geometry
            .bounding_rect()
            .map(|rect| Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// Whether two envelopes overlap (boundary contact counts).
    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Whether the envelope contains a point (boundary counts).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Envelope width (x extent).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Envelope height (y extent).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Envelope area. Zero for degenerate point and line envelopes.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}
