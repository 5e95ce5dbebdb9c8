//! Layer lifecycle events.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// The kinds of events a layer emits, used as registration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerEventKind {
    /// A payload was ingested into the geometry store.
    DataLoaded,
    /// A spatial index was built and installed.
    IndexReady,
    /// The overlay display contents were replaced.
    Refreshed,
}

/// A layer lifecycle event with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerEvent {
    /// Fired after each successful ingestion.
    DataLoaded { features: usize },
    /// Fired after the index built from an ingestion is installed.
    IndexReady { indexed: usize },
    /// Fired after a pointer move replaces the displayed features.
    Refreshed { rendered: usize },
}

impl LayerEvent {
    /// The kind this event dispatches under.
    pub fn kind(&self) -> LayerEventKind {
        match self {
            LayerEvent::DataLoaded { .. } => LayerEventKind::DataLoaded,
            LayerEvent::IndexReady { .. } => LayerEventKind::IndexReady,
            LayerEvent::Refreshed { .. } => LayerEventKind::Refreshed,
        }
    }
}

/// Capability for subscribing to [`LayerEvent`]s.
///
/// Implemented by layer types that emit lifecycle notifications. Handlers
/// registered for a kind run in registration order when an event of that
/// kind fires.
pub trait EventSource {
    /// Register a persistent handler for an event kind.
    fn on<F>(&self, kind: LayerEventKind, handler: F)
    where
        F: Fn(&LayerEvent) + Send + Sync + 'static;

    /// Register a handler that runs at most once.
    fn once<F>(&self, kind: LayerEventKind, handler: F)
    where
        F: Fn(&LayerEvent) + Send + Sync + 'static;
}

type Handler = Box<dyn Fn(&LayerEvent) + Send + Sync>;

struct Registration {
    handler: Handler,
    once: bool,
    consumed: AtomicBool,
}

/// Ordered, per-kind handler registry.
///
/// Handlers for a kind run in registration order. A `once` handler runs
/// at most one time and is dropped from the registry after it fires.
/// Dispatch snapshots the handler list and invokes it outside the
/// registry lock, so a handler may register further handlers without
/// deadlocking; handlers added mid-dispatch first see the next event.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Mutex<HashMap<LayerEventKind, Vec<Arc<Registration>>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a persistent handler for an event kind.
    pub fn on<F>(&self, kind: LayerEventKind, handler: F)
    where
        F: Fn(&LayerEvent) + Send + Sync + 'static,
    {
        self.register(kind, Box::new(handler), false);
    }

    /// Register a handler that runs at most once.
    pub fn once<F>(&self, kind: LayerEventKind, handler: F)
    where
        F: Fn(&LayerEvent) + Send + Sync + 'static,
    {
        self.register(kind, Box::new(handler), true);
    }

    fn register(&self, kind: LayerEventKind, handler: Handler, once: bool) {
        let mut handlers = self.handlers.lock().expect("event registry lock poisoned");
        handlers.entry(kind).or_default().push(Arc::new(Registration {
            handler,
            once,
            consumed: AtomicBool::new(false),
        }));
    }

    /// Dispatch an event to every handler registered for its kind.
    pub fn fire(&self, event: &LayerEvent) {
        let snapshot: Vec<Arc<Registration>> = {
            let handlers = self.handlers.lock().expect("event registry lock poisoned");
            handlers.get(&event.kind()).cloned().unwrap_or_default()
        };

        let mut any_consumed = false;
        for registration in &snapshot {
            if registration.once && registration.consumed.swap(true, Ordering::SeqCst) {
                continue;
            }
            (registration.handler)(event);
            if registration.once {
                any_consumed = true;
            }
        }

        if any_consumed {
            let mut handlers = self.handlers.lock().expect("event registry lock poisoned");
            if let Some(list) = handlers.get_mut(&event.kind()) {
                list.retain(|registration| {
                    !(registration.once && registration.consumed.load(Ordering::SeqCst))
                });
            }
        }
    }

    /// Number of handlers currently registered for a kind.
    pub fn handler_count(&self, kind: LayerEventKind) -> usize {
        let handlers = self.handlers.lock().expect("event registry lock poisoned");
        handlers.get(&kind).map_or(0, Vec::len)
    }
}
