//! Bulk-loaded R-tree over feature envelopes.

use std::sync::Arc;

use rstar::{RTree, AABB};
use tracing::debug;

use crate::geometry::{Envelope, Feature, FeatureCollection};

use super::entry::IndexEntry;

/// Immutable spatial index over one feature collection.
///
/// Built in a single bulk load and never mutated afterwards; reingestion
/// builds a fresh index and the resolver swaps it in whole. Queries are
/// envelope tests only, so a hit means "candidate", not "contains the
/// point". Callers that need exact containment filter the candidates
/// themselves.
pub struct FeatureIndex {
    tree: RTree<IndexEntry>,
}

impl FeatureIndex {
    /// Index every feature in the collection that has an envelope.
    ///
    /// Features without geometry (or whose geometry has no extent) are
    /// left out; they remain in the store but can never be hit by a
    /// spatial query.
    pub fn build(collection: &FeatureCollection) -> Self {
        let entries: Vec<IndexEntry> = collection
            .iter()
            .filter_map(|feature| {
                feature
                    .envelope
                    .map(|envelope| IndexEntry::new(envelope, Arc::clone(feature)))
            })
            .collect();

        let skipped = collection.len() - entries.len();
        if skipped > 0 {
            debug!(skipped, "features without an envelope left unindexed");
        }

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Every feature whose envelope intersects `query`, boundary contact
    /// included, in feature-id order.
    pub fn query(&self, query: &Envelope) -> Vec<Arc<Feature>> {
        let aabb = AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
        let mut features: Vec<Arc<Feature>> = self
            .tree
            .locate_in_envelope_intersecting(&aabb)
            .map(|entry| Arc::clone(&entry.feature))
            .collect();
        features.sort_by_key(|feature| feature.id);
        features
    }

    /// Candidate lookup for a single point (a degenerate envelope).
    pub fn query_point(&self, x: f64, y: f64) -> Vec<Arc<Feature>> {
        self.query(&Envelope::point(x, y))
    }

    /// Number of indexed features.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
