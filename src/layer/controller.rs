//! The composite layer controller.

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::config::CompositeConfig;
use crate::geometry::{Feature, GeometryStore, ParseError};
use crate::index::FeatureIndex;
use crate::query::{QueryPoint, QueryResolver, Resolution, ResolveMode};
use crate::source::DataSource;

use super::display::{DisplayLayer, RenderedFeature};
use super::error::LayerError;
use super::events::{EventDispatcher, EventSource, LayerEvent, LayerEventKind};
use super::viewport::{PointerPosition, Viewport};

/// Lifecycle state of a composite layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// No index installed yet; pointer movement is ignored.
    NotReady,
    /// An index is installed; pointer movement drives the overlay.
    Ready,
}

/// A raster tile backdrop with a pointer-driven vector overlay.
///
/// The layer starts in [`LayerState::NotReady`]: the backdrop can be
/// mounted and pointer movement is silently ignored. Calling
/// [`load`](CompositeLayer::load) (or feeding bytes straight into
/// [`data_received`](CompositeLayer::data_received)) ingests a feature
/// payload, builds a spatial index over it, and moves the layer to
/// [`LayerState::Ready`]. From then on every pointer move replaces the
/// overlay display contents with the features under the pointer.
///
/// Each successful ingestion fires [`LayerEvent::DataLoaded`] and then
/// [`LayerEvent::IndexReady`] exactly once; each overlay replacement
/// fires [`LayerEvent::Refreshed`]. A failed ingestion fires nothing and
/// leaves the previous collection and index serving queries. Hosts
/// subscribe through the [`EventSource`] registration methods.
pub struct CompositeLayer {
    config: CompositeConfig,
    store: GeometryStore,
    resolver: QueryResolver,
    events: EventDispatcher,
    display: Arc<dyn DisplayLayer>,
}

impl CompositeLayer {
    /// Create a layer from its configuration and overlay display sink.
    pub fn new(config: CompositeConfig, display: Arc<dyn DisplayLayer>) -> Self {
        let store = GeometryStore::new(config.source_url().map(str::to_owned));
        Self {
            config,
            store,
            resolver: QueryResolver::new(),
            events: EventDispatcher::new(),
            display,
        }
    }

    /// Get the layer configuration.
    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LayerState {
        if self.resolver.is_ready() {
            LayerState::Ready
        } else {
            LayerState::NotReady
        }
    }

    /// Number of features in the current collection.
    pub fn feature_count(&self) -> usize {
        self.store.feature_count()
    }

    /// Fetch the feature payload from the configured source and ingest it.
    ///
    /// Without a configured source URL this is a quiet no-op: the layer
    /// serves the backdrop alone and never becomes ready.
    pub async fn load<S: DataSource>(&self, source: &S) -> Result<(), LayerError> {
        let Some(url) = self.config.source_url() else {
            debug!("no source url configured; skipping feature load");
            return Ok(());
        };

        let raw = source.fetch_raw(url).await?;
        self.data_received(&raw)?;
        Ok(())
    }

    /// Ingest a raw payload: parse, store, index, and announce readiness.
    ///
    /// Fires `DataLoaded` once the collection is stored and `IndexReady`
    /// once the index is installed. On a parse error neither fires and
    /// the previous collection and index stay live.
    pub fn data_received(&self, raw: &[u8]) -> Result<(), ParseError> {
        let collection = self.store.ingest(raw)?;
        self.events.fire(&LayerEvent::DataLoaded {
            features: collection.len(),
        });

        let index = FeatureIndex::build(&collection);
        let indexed = index.len();
        self.resolver.install(Arc::new(index));

        info!(features = collection.len(), indexed, "feature index ready");
        self.events.fire(&LayerEvent::IndexReady { indexed });
        Ok(())
    }

    /// React to pointer movement.
    ///
    /// Before the first index is ready this is ignored entirely. Once
    /// ready, every move replaces the overlay display contents with the
    /// features whose envelopes contain the pointer, the empty set
    /// included, and fires `Refreshed` with the rendered count.
    pub fn pointer_moved(&self, position: PointerPosition) {
        if !self.resolver.is_ready() {
            trace!("pointer move before index ready; ignoring");
            return;
        }

        let point = QueryPoint::from_lng_lat(position.lng, position.lat);
        let features = self
            .resolver
            .resolve(point, ResolveMode::CandidateSet)
            .into_features();
        let rendered: Vec<RenderedFeature> = features
            .iter()
            .map(|feature| RenderedFeature::encode(feature, self.config.feature_options()))
            .collect();
        let count = rendered.len();

        self.display.clear();
        self.display.add_features(rendered);

        trace!(
            lat = position.lat,
            lng = position.lng,
            rendered = count,
            "overlay refreshed"
        );
        self.events.fire(&LayerEvent::Refreshed { rendered: count });
    }

    /// The single feature geometrically containing the position, if any.
    ///
    /// Unlike the overlay refresh this runs the exact containment test,
    /// so a position inside a feature's envelope but outside its geometry
    /// returns `None`.
    pub fn feature_at(&self, position: PointerPosition) -> Option<Arc<Feature>> {
        let point = QueryPoint::from_lng_lat(position.lng, position.lat);
        match self.resolver.resolve(point, ResolveMode::SingleMatch) {
            Resolution::Match(feature) => Some(feature),
            _ => None,
        }
    }

    /// Every feature whose envelope contains the position.
    pub fn features_near(&self, position: PointerPosition) -> Vec<Arc<Feature>> {
        let point = QueryPoint::from_lng_lat(position.lng, position.lat);
        self.resolver
            .resolve(point, ResolveMode::CandidateSet)
            .into_features()
    }

    /// Mount the layer into a viewport: backdrop first, overlay above it.
    pub fn attach<V: Viewport>(&self, viewport: &mut V) {
        viewport.mount_backdrop(&self.config.tile_backdrop());
        viewport.mount_overlay(Arc::clone(&self.display));
        debug!("composite layer attached");
    }

    /// Unmount from a viewport, unwinding in reverse mount order.
    pub fn detach<V: Viewport>(&self, viewport: &mut V) {
        viewport.unmount_overlay();
        viewport.unmount_backdrop();
        debug!("composite layer detached");
    }
}

impl EventSource for CompositeLayer {
    fn on<F>(&self, kind: LayerEventKind, handler: F)
    where
        F: Fn(&LayerEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, handler);
    }

    fn once<F>(&self, kind: LayerEventKind, handler: F)
    where
        F: Fn(&LayerEvent) + Send + Sync + 'static,
    {
        self.events.once(kind, handler);
    }
}
