//! Render-engine seam.
//!
//! The map runtime (tiles, camera, drawing) lives outside this crate. The
//! overlay manager only tells a [`MapView`] *what* to add, update or remove;
//! every element the view creates is returned as an owned handle so it can be
//! removed later without querying the view.

use crate::models::{CirclePolygon, GeoPoint};

use super::style::{CircleStyle, MarkerStyle, PopupContent};

/// Handle to a polygon layer (and its backing source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerHandle(pub u64);

/// Handle to a marker with its attached popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// Handle to a free-standing popup anchored on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupHandle(pub u64);

/// Operations the overlay manager needs from the map runtime.
///
/// Implementations must be `Send` so a view can live behind the session's
/// mutex while requests are awaited on a multi-threaded runtime.
pub trait MapView: Send {
    fn add_polygon(&mut self, polygon: &CirclePolygon, style: &CircleStyle) -> LayerHandle;

    /// Replace geometry and style of an existing polygon in place.
    fn update_polygon(&mut self, layer: LayerHandle, polygon: &CirclePolygon, style: &CircleStyle);

    fn remove_polygon(&mut self, layer: LayerHandle);

    fn add_marker(&mut self, position: &GeoPoint, style: &MarkerStyle, popup: PopupContent) -> MarkerHandle;

    fn remove_marker(&mut self, marker: MarkerHandle);

    fn open_popup(&mut self, anchor: &GeoPoint, content: PopupContent) -> PopupHandle;

    fn close_popup(&mut self, popup: PopupHandle);

    fn fly_to(&mut self, center: &GeoPoint, zoom: f64);

    /// Release the underlying render context. No other call follows.
    fn release(&mut self);
}
