//! Hoverlay - cursor-driven composite map layers
//!
//! This library combines a raster tile backdrop with a vector overlay
//! whose visible contents follow the pointer: features are fetched as
//! GeoJSON, indexed spatially, and the features under the cursor are
//! pushed to the host display on every pointer move.
//!
//! # High-Level API
//!
//! For most use cases, the [`layer`] module provides the full facade:
//!
//! ```ignore
//! use hoverlay::config::CompositeConfig;
//! use hoverlay::layer::{CompositeLayer, EventSource, LayerEventKind};
//! use hoverlay::source::HttpSource;
//!
//! let config = CompositeConfig::builder()
//!     .source_url("https://api.example.com/regions.geojson")
//!     .tile_source("https://tiles.example.com/{z}/{x}/{y}.png")
//!     .build();
//!
//! let layer = CompositeLayer::new(config, display);
//! layer.once(LayerEventKind::IndexReady, |event| {
//!     println!("index ready: {event:?}");
//! });
//!
//! layer.load(&HttpSource::new()?).await?;
//! layer.pointer_moved(position);
//! ```

pub mod config;
pub mod geometry;
pub mod index;
pub mod layer;
pub mod logging;
pub mod query;
pub mod source;

/// Version of the hoverlay library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
