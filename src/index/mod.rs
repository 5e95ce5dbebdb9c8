//! Spatial indexing over feature envelopes.
//!
//! The [`FeatureIndex`] is an R-tree bulk-loaded from a normalized
//! feature collection. It answers envelope-intersection queries only:
//! a returned feature is a *candidate* whose bounding box touches the
//! query region, which over-approximates exact containment but never
//! misses a feature that actually contains the point.
//!
//! # Example
//!
//! ```
//! use geo::{Geometry, Point};
//! use geojson::JsonObject;
//! use hoverlay::geometry::{Feature, FeatureCollection, FeatureId};
//! use hoverlay::index::FeatureIndex;
//!
//! let collection = FeatureCollection::new(vec![Feature::new(
//!     FeatureId(0),
//!     Some(Geometry::Point(Point::new(7.26, 43.7))),
//!     JsonObject::new(),
//! )]);
//! let index = FeatureIndex::build(&collection);
//!
//! assert_eq!(index.query_point(7.26, 43.7).len(), 1);
//! assert!(index.query_point(0.0, 0.0).is_empty());
//! ```

mod entry;
mod rtree;

pub use entry::IndexEntry;
pub use rtree::FeatureIndex;
