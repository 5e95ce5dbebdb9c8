//! Pointer query resolution against the spatial index.
//!
//! The [`QueryResolver`] sits between pointer movement and the
//! [`FeatureIndex`](crate::index::FeatureIndex), gating queries on index
//! readiness. Before the first index is installed, every query resolves
//! to [`Resolution::Empty`]; afterwards, [`ResolveMode`] picks between
//! the cheap envelope candidate set and the exact single-match test.

mod point;
mod resolver;

pub use point::QueryPoint;
pub use resolver::{QueryResolver, Resolution, ResolveMode};
