//! Map overlays owned by the engine.
//!
//! - `view`: the [`MapView`] trait the map runtime implements
//! - `manager`: [`OverlayLayerManager`], sole owner of the drawn elements
//! - `style`: circle/marker styles and popup content
//! - `recording`: in-memory [`MapView`] for headless use and tests

pub mod manager;
pub mod recording;
pub mod style;
pub mod view;

pub use manager::{OverlayLayerManager, OverlayState};
pub use recording::RecordingMapView;
pub use style::{CircleStyle, MarkerPalette, MarkerStyle, PopupContent};
pub use view::{LayerHandle, MapView, MarkerHandle, PopupHandle};
