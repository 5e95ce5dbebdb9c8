//! Overlay display abstraction.

use serde::Serialize;

use crate::config::{FeatureOptions, FeatureStyle};
use crate::geometry::Feature;

/// A feature encoded for display: GeoJSON geometry, properties, and the
/// resolved style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedFeature {
    pub geometry: Option<geojson::Geometry>,
    pub properties: geojson::JsonObject,
    pub style: FeatureStyle,
}

impl RenderedFeature {
    /// Encode a stored feature for display, resolving its style through
    /// the configured options.
    pub fn encode(feature: &Feature, options: &FeatureOptions) -> Self {
        Self {
            geometry: feature
                .geometry
                .as_ref()
                .map(|geometry| geojson::Geometry::new(geojson::Value::from(geometry))),
            properties: feature.properties.clone(),
            style: options.style_for(feature),
        }
    }
}

/// Sink for the overlay's displayed features.
///
/// A pointer move replaces the display contents wholesale: the layer
/// calls `clear` and then `add_features` with the new set, which may be
/// empty.
pub trait DisplayLayer: Send + Sync {
    /// Remove every displayed feature.
    fn clear(&self);

    /// Add encoded features to the display.
    fn add_features(&self, features: Vec<RenderedFeature>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FeatureId;
    use geo::{Geometry, Point};
    use geojson::JsonObject;
    use serde_json::json;

    fn harbour_feature() -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), json!("harbour"));
        Feature::new(
            FeatureId(0),
            Some(Geometry::Point(Point::new(7.26, 43.7))),
            properties,
        )
    }

    #[test]
    fn test_encode_carries_geometry_and_properties() {
        let rendered = RenderedFeature::encode(&harbour_feature(), &FeatureOptions::new());

        assert!(rendered.geometry.is_some());
        assert_eq!(rendered.properties.get("name"), Some(&json!("harbour")));
        assert_eq!(rendered.style, FeatureStyle::hidden());
    }

    #[test]
    fn test_encode_without_geometry() {
        let bare = Feature::new(FeatureId(0), None, JsonObject::new());
        let rendered = RenderedFeature::encode(&bare, &FeatureOptions::new());
        assert!(rendered.geometry.is_none());
    }

    #[test]
    fn test_encode_applies_style_callback() {
        let options = FeatureOptions::new().with_style(|_| FeatureStyle::new(1.0, 0.5));
        let rendered = RenderedFeature::encode(&harbour_feature(), &options);
        assert_eq!(rendered.style, FeatureStyle::new(1.0, 0.5));
    }

    #[test]
    fn test_rendered_feature_serializes_as_geojson() {
        let rendered = RenderedFeature::encode(&harbour_feature(), &FeatureOptions::new());
        let value = serde_json::to_value(&rendered).unwrap();

        assert_eq!(value["geometry"]["type"], json!("Point"));
        assert_eq!(value["geometry"]["coordinates"], json!([7.26, 43.7]));
        assert_eq!(value["properties"]["name"], json!("harbour"));
        assert_eq!(value["style"], json!({"opacity": 0.0, "fillOpacity": 0.0}));
    }
}
