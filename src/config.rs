//! Layer configuration types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geometry::Feature;

/// Default stroke opacity for overlay features (invisible).
pub const DEFAULT_STYLE_OPACITY: f64 = 0.0;

/// Default fill opacity for overlay features (invisible).
pub const DEFAULT_STYLE_FILL_OPACITY: f64 = 0.0;

/// Rendering style applied to an overlay feature.
///
/// The default style is fully transparent: the overlay exists for
/// hit-testing and host-side highlighting, not for drawing the whole
/// dataset, so features stay invisible until a style function says
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl FeatureStyle {
    pub fn new(opacity: f64, fill_opacity: f64) -> Self {
        Self { opacity, fill_opacity }
    }

    /// The invisible default style.
    pub fn hidden() -> Self {
        Self {
            opacity: DEFAULT_STYLE_OPACITY,
            fill_opacity: DEFAULT_STYLE_FILL_OPACITY,
        }
    }
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Per-feature style callback.
pub type StyleFn = Arc<dyn Fn(&Feature) -> FeatureStyle + Send + Sync>;

/// Opaque options passed through to the backdrop tile renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileOptions {
    options: Map<String, Value>,
}

impl TileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, consuming and returning the options for chaining.
    pub fn set(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Get an option value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// All options as a map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Options for the vector overlay: an optional per-feature style callback
/// plus opaque renderer options.
#[derive(Clone, Default)]
pub struct FeatureOptions {
    style: Option<StyleFn>,
    options: Map<String, Value>,
}

impl FeatureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-feature style callback.
    pub fn with_style<F>(mut self, style: F) -> Self
    where
        F: Fn(&Feature) -> FeatureStyle + Send + Sync + 'static,
    {
        self.style = Some(Arc::new(style));
        self
    }

    /// Set an option, consuming and returning the options for chaining.
    pub fn set(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Get an option value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// All options as a map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Whether a style callback is configured.
    pub fn has_style(&self) -> bool {
        self.style.is_some()
    }

    /// Resolve the style for a feature: the configured callback, or the
    /// invisible default when none is set.
    pub fn style_for(&self, feature: &Feature) -> FeatureStyle {
        match &self.style {
            Some(style) => style(feature),
            None => FeatureStyle::hidden(),
        }
    }
}

impl fmt::Debug for FeatureOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureOptions")
            .field("style", &self.style.as_ref().map(|_| "<fn>"))
            .field("options", &self.options)
            .finish()
    }
}

/// The raster backdrop: a tile URL template plus renderer options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileBackdrop {
    template: String,
    options: TileOptions,
}

impl TileBackdrop {
    pub fn new(template: impl Into<String>, options: TileOptions) -> Self {
        Self {
            template: template.into(),
            options,
        }
    }

    /// Get the tile URL template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Get the renderer options.
    pub fn options(&self) -> &TileOptions {
        &self.options
    }
}

/// Configuration for a composite layer.
///
/// # Example
///
/// ```
/// use hoverlay::config::{CompositeConfig, TileOptions};
///
/// let config = CompositeConfig::builder()
///     .source_url("https://api.example.com/regions.geojson")
///     .tile_source("https://tiles.example.com/{z}/{x}/{y}.png")
///     .tile_options(TileOptions::new().set("maxZoom", serde_json::json!(12)))
///     .build();
///
/// assert_eq!(config.tile_source(), "https://tiles.example.com/{z}/{x}/{y}.png");
/// assert!(config.source_url().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompositeConfig {
    /// URL the feature payload is fetched from (optional; without it the
    /// layer renders the backdrop alone)
    source_url: Option<String>,
    /// Tile URL template for the raster backdrop
    tile_source: String,
    /// Options passed through to the backdrop renderer
    tile_options: TileOptions,
    /// Options for the vector overlay
    feature_options: FeatureOptions,
}

impl CompositeConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CompositeConfigBuilder {
        CompositeConfigBuilder::default()
    }

    /// Get the feature payload URL, if configured.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Get the tile URL template.
    pub fn tile_source(&self) -> &str {
        &self.tile_source
    }

    /// Get the backdrop renderer options.
    pub fn tile_options(&self) -> &TileOptions {
        &self.tile_options
    }

    /// Get the overlay options.
    pub fn feature_options(&self) -> &FeatureOptions {
        &self.feature_options
    }

    /// Assemble the backdrop description for viewport mounting.
    pub fn tile_backdrop(&self) -> TileBackdrop {
        TileBackdrop::new(self.tile_source.clone(), self.tile_options.clone())
    }
}

/// Builder for CompositeConfig.
///
/// Provides a fluent API for constructing layer configuration.
#[derive(Debug, Clone, Default)]
pub struct CompositeConfigBuilder {
    source_url: Option<String>,
    tile_source: Option<String>,
    tile_options: Option<TileOptions>,
    feature_options: Option<FeatureOptions>,
}

impl CompositeConfigBuilder {
    /// Set the feature payload URL.
    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Set the tile URL template for the raster backdrop.
    pub fn tile_source(mut self, template: impl Into<String>) -> Self {
        self.tile_source = Some(template.into());
        self
    }

    /// Set the backdrop renderer options.
    pub fn tile_options(mut self, options: TileOptions) -> Self {
        self.tile_options = Some(options);
        self
    }

    /// Set the overlay options.
    pub fn feature_options(mut self, options: FeatureOptions) -> Self {
        self.feature_options = Some(options);
        self
    }

    /// Build the configuration with defaults for unset values.
    pub fn build(self) -> CompositeConfig {
        CompositeConfig {
            source_url: self.source_url,
            tile_source: self.tile_source.unwrap_or_default(),
            tile_options: self.tile_options.unwrap_or_default(),
            feature_options: self.feature_options.unwrap_or_default(),
        }
    }
}
