//! Readiness-gated query resolution.

use std::sync::{Arc, RwLock};

use geo::Intersects;
use tracing::trace;

use crate::geometry::Feature;
use crate::index::FeatureIndex;

use super::point::QueryPoint;

/// How a query's envelope candidates are narrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Envelope-level candidates only. Cheap, may over-approximate.
    CandidateSet,
    /// Exact geometry containment, at most one winner.
    SingleMatch,
}

/// What a query resolved to.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The single feature that geometrically contains the point.
    Match(Arc<Feature>),
    /// Envelope-level candidates in feature-id order, never empty.
    Candidates(Vec<Arc<Feature>>),
    /// No index installed yet, or nothing at the point.
    Empty,
}

impl Resolution {
    /// Collapse to a flat feature list.
    pub fn into_features(self) -> Vec<Arc<Feature>> {
        match self {
            Resolution::Match(feature) => vec![feature],
            Resolution::Candidates(features) => features,
            Resolution::Empty => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Resolution::Empty)
    }
}

/// Gate between pointer queries and the spatial index.
///
/// Starts without an index: every query resolves to
/// [`Resolution::Empty`] until one is installed. Installation replaces
/// the whole index under a brief write lock, so a resolver shared across
/// threads answers from either the old or the new index, never a torn
/// one.
#[derive(Default)]
pub struct QueryResolver {
    index: RwLock<Option<Arc<FeatureIndex>>>,
}

impl QueryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an index has been installed.
    pub fn is_ready(&self) -> bool {
        self.current().is_some()
    }

    /// Install a freshly built index, replacing any previous one.
    pub fn install(&self, index: Arc<FeatureIndex>) {
        let mut guard = self.index.write().expect("resolver lock poisoned");
        *guard = Some(index);
    }

    fn current(&self) -> Option<Arc<FeatureIndex>> {
        self.index.read().expect("resolver lock poisoned").clone()
    }

    /// Resolve a point against the current index.
    pub fn resolve(&self, point: QueryPoint, mode: ResolveMode) -> Resolution {
        let Some(index) = self.current() else {
            trace!("query before index ready resolves to empty");
            return Resolution::Empty;
        };

        let candidates = index.query(&point.envelope());
        match mode {
            ResolveMode::CandidateSet => {
                if candidates.is_empty() {
                    Resolution::Empty
                } else {
                    Resolution::Candidates(candidates)
                }
            }
            ResolveMode::SingleMatch => exact_match(point, candidates),
        }
    }
}

/// Narrow envelope candidates to the one feature that geometrically
/// contains the point.
///
/// Overlap ties go to the smallest envelope, then the lowest feature id,
/// so repeated queries at the same spot pick the same winner.
fn exact_match(point: QueryPoint, mut candidates: Vec<Arc<Feature>>) -> Resolution {
    candidates.sort_by(|a, b| {
        envelope_area(a)
            .total_cmp(&envelope_area(b))
            .then_with(|| a.id.cmp(&b.id))
    });

    let target = geo::Point::new(point.x, point.y);
    candidates
        .into_iter()
        .find(|feature| {
            feature
                .geometry
                .as_ref()
                .is_some_and(|geometry| geometry.intersects(&target))
        })
        .map_or(Resolution::Empty, Resolution::Match)
}

fn envelope_area(feature: &Feature) -> f64 {
    feature.envelope.map_or(f64::MAX, |envelope| envelope.area())
}
