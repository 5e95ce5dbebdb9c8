//! Query coordinates.

use crate::geometry::Envelope;

/// A point in geometry coordinate space.
///
/// GeoJSON positions are `[lng, lat]`, so x carries longitude and y
/// carries latitude. [`QueryPoint::from_lng_lat`] does that mapping for
/// callers working in geographic terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint {
    pub x: f64,
    pub y: f64,
}

impl QueryPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a query point from geographic coordinates.
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { x: lng, y: lat }
    }

    /// The degenerate envelope covering exactly this point.
    pub fn envelope(&self) -> Envelope {
        Envelope::point(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lng_lat_maps_longitude_to_x() {
        let point = QueryPoint::from_lng_lat(7.26, 43.7);
        assert_eq!(point.x, 7.26);
        assert_eq!(point.y, 43.7);
    }

    #[test]
    fn test_envelope_is_degenerate() {
        let envelope = QueryPoint::new(2.0, 3.0).envelope();
        assert_eq!(envelope, Envelope::point(2.0, 3.0));
        assert_eq!(envelope.area(), 0.0);
    }
}
