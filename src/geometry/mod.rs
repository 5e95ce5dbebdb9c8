//! Feature geometry: parsing, normalization, and storage.
//!
//! This module turns raw source payloads into a normalized
//! [`FeatureCollection`] of geo-typed features. The [`GeometryStore`] owns
//! the current collection and accepts either a plain GeoJSON feature
//! collection or the base64 blob wrapper some sources deliver; anything
//! else degrades to an empty collection rather than an error.
//!
//! # Example
//!
//! ```
//! use hoverlay::geometry::GeometryStore;
//!
//! let store = GeometryStore::new(None);
//! let collection = store
//!     .ingest(br#"{"type": "FeatureCollection", "features": []}"#)
//!     .unwrap();
//!
//! assert!(collection.is_empty());
//! ```

mod envelope;
mod error;
mod feature;
mod store;

pub use envelope::Envelope;
pub use error::ParseError;
pub use feature::{Feature, FeatureCollection, FeatureId};
pub use store::GeometryStore;
