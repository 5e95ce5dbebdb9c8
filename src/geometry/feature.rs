//! Normalized feature records and the ordered collection that owns them.

use std::sync::Arc;

use geo::Geometry;
use geojson::JsonObject;

use super::envelope::Envelope;

/// Stable feature identity, assigned from insertion order at ingestion.
///
/// Identities are scoped to one ingested collection; a re-ingestion assigns
/// fresh ids starting from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub usize);

/// A single geometric entity: geometry plus property map plus identity.
///
/// Immutable after ingestion and shared via `Arc` between the owning
/// collection and the spatial index. GeoJSON permits features with `null`
/// geometry; these are stored (their properties survive) but carry no
/// envelope and are never indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Option<Geometry<f64>>,
    pub properties: JsonObject,
    /// Derived eagerly at construction; `None` when the feature has no
    /// geometry or the geometry has no extent.
    pub envelope: Option<Envelope>,
}

impl Feature {
    /// Create a feature, deriving its envelope from the geometry.
    pub fn new(id: FeatureId, geometry: Option<Geometry<f64>>, properties: JsonObject) -> Self {
        let envelope = geometry.as_ref().and_then(Envelope::of);
        Self {
            id,
            geometry,
            properties,
            envelope,
        }
    }

    /// Look up a property value by key.
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }
}

/// An ordered sequence of features.
///
/// The raw payload's type discriminator is validated during ingestion; the
/// typed collection needs no runtime tag. Features are stored in id order,
/// so id lookup is positional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Arc<Feature>>,
}

impl FeatureCollection {
    /// Build a collection from already-normalized features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features: features.into_iter().map(Arc::new).collect(),
        }
    }

    /// The empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of features (including unindexable ones).
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate the features in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Feature>> {
        self.features.iter()
    }

    /// Look up a feature by its id.
    pub fn get(&self, id: FeatureId) -> Option<&Arc<Feature>> {
        self.features.get(id.0)
    }

    /// All features as a slice.
    pub fn features(&self) -> &[Arc<Feature>] {
        &self.features
    }
}
