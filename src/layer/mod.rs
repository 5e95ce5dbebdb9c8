//! The composite layer: raster backdrop plus pointer-driven overlay.
//!
//! [`CompositeLayer`] ties the crate together. It ingests feature
//! payloads into a [`GeometryStore`](crate::geometry::GeometryStore),
//! builds a [`FeatureIndex`](crate::index::FeatureIndex) per ingestion,
//! and once ready replaces the overlay display contents on every pointer
//! move. Lifecycle milestones are announced as [`LayerEvent`]s; hosts
//! subscribe through the [`EventSource`] capability.
//!
//! The host side plugs in at two seams: [`DisplayLayer`] receives the
//! rendered overlay contents, and [`Viewport`] mounts the backdrop and
//! overlay into the visible map view.

mod controller;
mod display;
mod error;
mod events;
mod viewport;

pub use controller::{CompositeLayer, LayerState};
pub use display::{DisplayLayer, RenderedFeature};
pub use error::LayerError;
pub use events::{EventDispatcher, EventSource, LayerEvent, LayerEventKind};
pub use viewport::{PointerPosition, Viewport};
