//! Raw payload ingestion and normalization.

use std::sync::{Arc, RwLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use tracing::{debug, info};

use super::error::ParseError;
use super::feature::{Feature, FeatureCollection, FeatureId};

/// Owner of the normalized feature collection.
///
/// `ingest` accepts three payload shapes:
///
/// 1. a direct GeoJSON feature collection,
/// 2. a blob wrapper (`content`: base64 text with embedded whitespace,
///    `url`: must equal the configured source URL) whose decoded body is a
///    feature collection,
/// 3. anything else, for which ingestion succeeds with an empty
///    collection ("no usable geometry" is a valid collection of size
///    zero).
///
/// Decode and parse failures are [`ParseError`]s and leave the previously
/// stored collection untouched. A successful ingestion replaces the stored
/// collection outright (last-write-wins, no merge).
///
/// # Thread Safety
///
/// The current collection lives behind an `RwLock`d `Arc`: ingestion builds
/// the replacement outside the lock and swaps it in with a brief write
/// lock, so readers observe either the old or the new collection, never a
/// partial one.
pub struct GeometryStore {
    source_url: Option<String>,
    current: RwLock<Arc<FeatureCollection>>,
}

impl GeometryStore {
    /// Create a store with no collection yet.
    ///
    /// `source_url` is the URL the raw payload was requested from; blob
    /// wrappers addressed to any other URL are treated as unusable.
    pub fn new(source_url: Option<String>) -> Self {
        Self {
            source_url,
            current: RwLock::new(Arc::new(FeatureCollection::empty())),
        }
    }

    /// The configured source URL, if any.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Snapshot of the current collection.
    pub fn collection(&self) -> Arc<FeatureCollection> {
        Arc::clone(&self.current.read().expect("store lock poisoned"))
    }

    /// Number of features in the current collection.
    pub fn feature_count(&self) -> usize {
        self.collection().len()
    }

    /// Parse a raw payload and replace the stored collection.
    ///
    /// Returns the newly stored collection on success. On error the store
    /// is left exactly as it was.
    pub fn ingest(&self, raw: &[u8]) -> Result<Arc<FeatureCollection>, ParseError> {
        let payload: Value = serde_json::from_slice(raw)?;
        let collection = Arc::new(self.normalize(payload)?);

        let mut current = self.current.write().expect("store lock poisoned");
        *current = Arc::clone(&collection);
        drop(current);

        info!(features = collection.len(), "ingested feature collection");
        Ok(collection)
    }

    /// Classify the payload shape and normalize it into a collection.
    fn normalize(&self, payload: Value) -> Result<FeatureCollection, ParseError> {
        if let Some(content) = blob_content(&payload, self.source_url.as_deref()) {
            return decode_blob(content);
        }
        if is_feature_collection(&payload) {
            return collection_from_value(payload);
        }
        debug!("payload is not a recognized feature collection; treating as empty");
        Ok(FeatureCollection::empty())
    }
}

/// Extract the base64 body when the payload is a blob wrapper addressed to
/// our source URL.
///
/// A wrapper with a mismatched or missing `url` (or a non-textual
/// `content`) is not recognized as a blob at all; the caller falls
/// through to the direct feature-collection check rather than failing.
fn blob_content<'a>(payload: &'a Value, source_url: Option<&str>) -> Option<&'a str> {
    let content = payload.get("content")?.as_str()?;
    let url = payload.get("url")?.as_str()?;
    if source_url == Some(url) {
        Some(content)
    } else {
        debug!(url = url, "blob wrapper addressed to a different url");
        None
    }
}

fn is_feature_collection(payload: &Value) -> bool {
    payload.get("type").and_then(Value::as_str) == Some("FeatureCollection")
}

/// Decode a blob body: strip all whitespace, base64-decode, and parse the
/// decoded text as a feature collection.
///
/// Unlike the direct path, a decoded body that is not a feature collection
/// is a structure error: the wrapper explicitly claims to carry one.
fn decode_blob(content: &str) -> Result<FeatureCollection, ParseError> {
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let decoded = STANDARD.decode(&cleaned)?;
    let text = String::from_utf8(decoded)?;
    let payload: Value = serde_json::from_str(&text)?;
    if !is_feature_collection(&payload) {
        return Err(ParseError::Structure(
            "decoded blob is not a feature collection".to_string(),
        ));
    }
    collection_from_value(payload)
}

/// Parse a feature-collection value and normalize each feature, deriving
/// envelopes eagerly (the index build immediately follows ingestion).
fn collection_from_value(payload: Value) -> Result<FeatureCollection, ParseError> {
    let raw: geojson::FeatureCollection =
        serde_json::from_value(payload).map_err(|e| ParseError::Structure(e.to_string()))?;

    let mut features = Vec::with_capacity(raw.features.len());
    for (position, feature) in raw.features.into_iter().enumerate() {
        let geometry = match feature.geometry {
            Some(geometry) => Some(
                geo::Geometry::<f64>::try_from(geometry.value)
                    .map_err(|e| ParseError::Geometry(e.to_string()))?,
            ),
            None => None,
        };
        let properties = feature.properties.unwrap_or_default();
        features.push(Feature::new(FeatureId(position), geometry, properties));
    }
    Ok(FeatureCollection::new(features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SOURCE_URL: &str = "https://api.example.com/regions.geojson";

    fn store_with_url() -> GeometryStore {
        GeometryStore::new(Some(SOURCE_URL.to_string()))
    }

    fn sample_collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [7.26, 43.7]},
                    "properties": {"name": "nice"}
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]]
                    },
                    "properties": {"name": "square"}
                }
            ]
        })
    }

    /// Base64-encode a JSON value the way the blob transport does, with
    /// whitespace scattered through the body.
    fn encode_with_whitespace(payload: &Value) -> String {
        let mut encoded = STANDARD.encode(serde_json::to_vec(payload).expect("serialize fixture"));
        encoded.insert(16, '\n');
        encoded.insert(8, ' ');
        encoded.insert(0, '\n');
        encoded
    }

    fn blob_payload(payload: &Value, url: &str) -> Vec<u8> {
        let wrapper = json!({
            "content": encode_with_whitespace(payload),
            "url": url
        });
        serde_json::to_vec(&wrapper).expect("serialize wrapper")
    }

    // =========================================================================
    // Direct feature-collection payloads
    // =========================================================================

    #[test]
    fn test_ingest_direct_collection() {
        let store = store_with_url();
        let raw = serde_json::to_vec(&sample_collection()).unwrap();

        let collection = store.ingest(&raw).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(FeatureId(0)).unwrap().property("name"), Some(&json!("nice")));
        assert!(collection.get(FeatureId(1)).unwrap().envelope.is_some());
        assert_eq!(store.feature_count(), 2);
    }

    #[test]
    fn test_ingest_empty_collection() {
        let store = store_with_url();
        let raw = serde_json::to_vec(&json!({"type": "FeatureCollection", "features": []})).unwrap();

        let collection = store.ingest(&raw).unwrap();

        assert!(collection.is_empty());
        assert_eq!(store.feature_count(), 0);
    }

    #[test]
    fn test_ingest_null_geometry_feature_is_stored_without_envelope() {
        let store = store_with_url();
        let raw = serde_json::to_vec(&json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": {"name": "ghost"}}
            ]
        }))
        .unwrap();

        let collection = store.ingest(&raw).unwrap();

        assert_eq!(collection.len(), 1);
        let feature = collection.get(FeatureId(0)).unwrap();
        assert!(feature.geometry.is_none());
        assert!(feature.envelope.is_none());
        assert_eq!(feature.property("name"), Some(&json!("ghost")));
    }

    #[test]
    fn test_ingest_invalid_json_is_parse_error() {
        let store = store_with_url();
        let err = store.ingest(b"definitely not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_ingest_collection_with_malformed_features_is_structure_error() {
        let store = store_with_url();
        let raw =
            serde_json::to_vec(&json!({"type": "FeatureCollection", "features": 42})).unwrap();

        let err = store.ingest(&raw).unwrap_err();
        assert!(matches!(err, ParseError::Structure(_)));
    }

    // =========================================================================
    // Shape mismatch: silent degradation to empty
    // =========================================================================

    #[test]
    fn test_ingest_unrecognized_object_yields_empty() {
        let store = store_with_url();
        let raw = serde_json::to_vec(&json!({"type": "Topology", "objects": {}})).unwrap();

        let collection = store.ingest(&raw).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_ingest_non_object_payloads_yield_empty() {
        let store = store_with_url();

        assert!(store.ingest(b"[1, 2, 3]").unwrap().is_empty());
        assert!(store.ingest(b"\"hello\"").unwrap().is_empty());
        assert!(store.ingest(b"42").unwrap().is_empty());
        assert!(store.ingest(b"null").unwrap().is_empty());
    }

    // =========================================================================
    // Blob transport
    // =========================================================================

    #[test]
    fn test_ingest_blob_wrapper_round_trips() {
        let direct = store_with_url();
        let wrapped = store_with_url();

        let direct_collection = direct
            .ingest(&serde_json::to_vec(&sample_collection()).unwrap())
            .unwrap();
        let wrapped_collection = wrapped
            .ingest(&blob_payload(&sample_collection(), SOURCE_URL))
            .unwrap();

        assert_eq!(direct_collection.features(), wrapped_collection.features());
    }

    #[test]
    fn test_ingest_blob_with_mismatched_url_yields_empty() {
        let store = store_with_url();
        let raw = blob_payload(&sample_collection(), "https://api.example.com/other.geojson");

        let collection = store.ingest(&raw).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_ingest_blob_without_url_yields_empty() {
        let store = store_with_url();
        let wrapper = json!({"content": encode_with_whitespace(&sample_collection())});

        let collection = store.ingest(&serde_json::to_vec(&wrapper).unwrap()).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_ingest_blob_when_no_source_url_configured_yields_empty() {
        let store = GeometryStore::new(None);
        let raw = blob_payload(&sample_collection(), SOURCE_URL);

        let collection = store.ingest(&raw).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_mismatched_wrapper_falls_through_to_direct_check() {
        // A payload carrying content + wrong url + a valid collection body
        // takes the direct path instead of failing as a bad blob.
        let store = store_with_url();
        let mut payload = sample_collection();
        payload["content"] = json!("aGVsbG8=");
        payload["url"] = json!("https://api.example.com/other.geojson");

        let collection = store.ingest(&serde_json::to_vec(&payload).unwrap()).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_ingest_blob_with_malformed_base64_is_parse_error() {
        let store = store_with_url();
        let wrapper = json!({"content": "!!!not-base64!!!", "url": SOURCE_URL});

        let err = store.ingest(&serde_json::to_vec(&wrapper).unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Base64(_)));
    }

    #[test]
    fn test_ingest_blob_decoding_to_invalid_json_is_parse_error() {
        let store = store_with_url();
        let wrapper = json!({
            "content": STANDARD.encode(b"definitely not json"),
            "url": SOURCE_URL
        });

        let err = store.ingest(&serde_json::to_vec(&wrapper).unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_ingest_blob_decoding_to_non_collection_is_structure_error() {
        let store = store_with_url();
        let wrapper = json!({
            "content": STANDARD.encode(serde_json::to_vec(&json!({"type": "Topology"})).unwrap()),
            "url": SOURCE_URL
        });

        let err = store.ingest(&serde_json::to_vec(&wrapper).unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Structure(_)));
    }

    #[test]
    fn test_ingest_blob_decoding_to_non_utf8_is_parse_error() {
        let store = store_with_url();
        let wrapper = json!({
            "content": STANDARD.encode([0xff, 0xfe, 0xfd]),
            "url": SOURCE_URL
        });

        let err = store.ingest(&serde_json::to_vec(&wrapper).unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Utf8(_)));
    }

    // =========================================================================
    // State preservation and replacement
    // =========================================================================

    #[test]
    fn test_failed_ingest_preserves_previous_collection() {
        let store = store_with_url();
        store
            .ingest(&serde_json::to_vec(&sample_collection()).unwrap())
            .unwrap();
        assert_eq!(store.feature_count(), 2);

        let wrapper = json!({"content": "!!!", "url": SOURCE_URL});
        let result = store.ingest(&serde_json::to_vec(&wrapper).unwrap());

        assert!(result.is_err());
        assert_eq!(store.feature_count(), 2);
        assert_eq!(
            store.collection().get(FeatureId(0)).unwrap().property("name"),
            Some(&json!("nice"))
        );
    }

    #[test]
    fn test_reingest_replaces_collection() {
        let store = store_with_url();
        store
            .ingest(&serde_json::to_vec(&sample_collection()).unwrap())
            .unwrap();
        assert_eq!(store.feature_count(), 2);

        let replacement = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}, "properties": {"name": "origin"}}
            ]
        });
        store.ingest(&serde_json::to_vec(&replacement).unwrap()).unwrap();

        assert_eq!(store.feature_count(), 1);
        assert_eq!(
            store.collection().get(FeatureId(0)).unwrap().property("name"),
            Some(&json!("origin"))
        );
    }

    #[test]
    fn test_collection_snapshot_survives_replacement() {
        let store = store_with_url();
        store
            .ingest(&serde_json::to_vec(&sample_collection()).unwrap())
            .unwrap();

        let snapshot = store.collection();
        store
            .ingest(&serde_json::to_vec(&json!({"type": "FeatureCollection", "features": []})).unwrap())
            .unwrap();

        // The old snapshot is still intact for anyone holding it.
        assert_eq!(snapshot.len(), 2);
        assert_eq!(store.feature_count(), 0);
    }
}
