//! In-memory map view.
//!
//! This module provides a [`MapView`] that draws nothing and records every
//! element currently on the "map". It backs headless use of the engine and
//! all of the overlay tests: clone the view, hand one clone to the engine and
//! inspect the other.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{CirclePolygon, GeoPoint};

use super::style::{CircleStyle, MarkerStyle, PopupContent};
use super::view::{LayerHandle, MapView, MarkerHandle, PopupHandle};

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    pub handle: LayerHandle,
    pub polygon: CirclePolygon,
    pub style: CircleStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    pub handle: MarkerHandle,
    pub position: GeoPoint,
    pub style: MarkerStyle,
    pub popup: PopupContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupRecord {
    pub handle: PopupHandle,
    pub anchor: GeoPoint,
    pub content: PopupContent,
}

#[derive(Default)]
struct RecordingData {
    polygons: BTreeMap<LayerHandle, PolygonRecord>,
    markers: BTreeMap<MarkerHandle, MarkerRecord>,
    popups: BTreeMap<PopupHandle, PopupRecord>,
    camera: Option<(GeoPoint, f64)>,
    polygon_updates: usize,
    release_count: usize,
    next_id: u64,
}

impl RecordingData {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Map view that keeps its elements in memory.
#[derive(Clone, Default)]
pub struct RecordingMapView {
    data: Arc<Mutex<RecordingData>>,
}

impl RecordingMapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygon_count(&self) -> usize {
        self.data.lock().polygons.len()
    }

    pub fn polygons(&self) -> Vec<PolygonRecord> {
        self.data.lock().polygons.values().cloned().collect()
    }

    /// Number of in-place geometry/style updates.
    pub fn polygon_updates(&self) -> usize {
        self.data.lock().polygon_updates
    }

    pub fn marker_count(&self) -> usize {
        self.data.lock().markers.len()
    }

    /// Markers in creation order.
    pub fn markers(&self) -> Vec<MarkerRecord> {
        self.data.lock().markers.values().cloned().collect()
    }

    pub fn popups(&self) -> Vec<PopupRecord> {
        self.data.lock().popups.values().cloned().collect()
    }

    pub fn camera(&self) -> Option<(GeoPoint, f64)> {
        self.data.lock().camera.clone()
    }

    pub fn release_count(&self) -> usize {
        self.data.lock().release_count
    }

    pub fn is_released(&self) -> bool {
        self.release_count() > 0
    }
}

impl MapView for RecordingMapView {
    fn add_polygon(&mut self, polygon: &CirclePolygon, style: &CircleStyle) -> LayerHandle {
        let mut data = self.data.lock();
        let handle = LayerHandle(data.next_id());
        data.polygons.insert(
            handle,
            PolygonRecord {
                handle,
                polygon: polygon.clone(),
                style: style.clone(),
            },
        );
        handle
    }

    fn update_polygon(&mut self, layer: LayerHandle, polygon: &CirclePolygon, style: &CircleStyle) {
        let mut data = self.data.lock();
        data.polygon_updates += 1;
        match data.polygons.get_mut(&layer) {
            Some(record) => {
                record.polygon = polygon.clone();
                record.style = style.clone();
            }
            None => log::warn!("update of unknown polygon layer {:?}", layer),
        }
    }

    fn remove_polygon(&mut self, layer: LayerHandle) {
        self.data.lock().polygons.remove(&layer);
    }

    fn add_marker(&mut self, position: &GeoPoint, style: &MarkerStyle, popup: PopupContent) -> MarkerHandle {
        let mut data = self.data.lock();
        let handle = MarkerHandle(data.next_id());
        data.markers.insert(
            handle,
            MarkerRecord {
                handle,
                position: position.clone(),
                style: style.clone(),
                popup,
            },
        );
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.data.lock().markers.remove(&marker);
    }

    fn open_popup(&mut self, anchor: &GeoPoint, content: PopupContent) -> PopupHandle {
        let mut data = self.data.lock();
        let handle = PopupHandle(data.next_id());
        data.popups.insert(
            handle,
            PopupRecord {
                handle,
                anchor: anchor.clone(),
                content,
            },
        );
        handle
    }

    fn close_popup(&mut self, popup: PopupHandle) {
        self.data.lock().popups.remove(&popup);
    }

    fn fly_to(&mut self, center: &GeoPoint, zoom: f64) {
        self.data.lock().camera = Some((center.clone(), zoom));
    }

    fn release(&mut self) {
        self.data.lock().release_count += 1;
    }
}
