//! Host viewport abstraction.

use std::sync::Arc;

use crate::config::TileBackdrop;

use super::display::DisplayLayer;

/// A pointer position in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub lat: f64,
    pub lng: f64,
}

impl PointerPosition {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The host map view a composite layer mounts into.
///
/// Mount order is backdrop first, then overlay, so the vector overlay
/// always sits above the raster tiles. Detaching unwinds in reverse.
pub trait Viewport {
    /// Mount the raster tile backdrop.
    fn mount_backdrop(&mut self, backdrop: &TileBackdrop);

    /// Unmount the raster tile backdrop.
    fn unmount_backdrop(&mut self);

    /// Mount the vector overlay.
    fn mount_overlay(&mut self, overlay: Arc<dyn DisplayLayer>);

    /// Unmount the vector overlay.
    fn unmount_overlay(&mut self);
}
