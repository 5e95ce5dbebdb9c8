//! R-tree leaf entries.

use std::sync::Arc;

use rstar::{RTreeObject, AABB};

use crate::geometry::{Envelope, Feature};

/// One indexable feature together with the envelope it is filed under.
///
/// The envelope is copied out of the feature at build time so tree
/// traversal never chases the `Arc`.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub envelope: Envelope,
    pub feature: Arc<Feature>,
}

impl IndexEntry {
    pub fn new(envelope: Envelope, feature: Arc<Feature>) -> Self {
        Self { envelope, feature }
    }
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.envelope.min_x, self.envelope.min_y],
            [self.envelope.max_x, self.envelope.max_y],
        )
    }
}
