pub mod marker;
pub mod viewport;

pub use marker::{format_price, Marker, Popup, PriceTier};
pub use viewport::{Bounds, ViewConfig, Viewport};

use uuid::Uuid;

use crate::models::{LatLng, ListingRecord};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

pub type MarkerId = Uuid;

/// The map-tile library, seen from the dashboard.
pub trait MapSurface: Send {
    fn add_marker(&mut self, marker: &Marker) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32, max_zoom: u8);
}

/// Owns the live markers and the viewport of one map surface.
pub struct MapAdapter {
    surface: Box<dyn MapSurface>,
    markers: Vec<MarkerId>,
    config: ViewConfig,
    currency: String,
    viewport: Viewport,
}

impl MapAdapter {
    pub fn new(surface: Box<dyn MapSurface>, config: ViewConfig, currency: impl Into<String>) -> Self {
        Self {
            surface,
            markers: Vec::new(),
            viewport: Viewport::CityWide {
                center: config.default_center,
                zoom: config.default_zoom,
            },
            config,
            currency: currency.into(),
        }
    }

    /// Replaces every marker with one per placeable record. Returns the number
    /// of markers now on the map.
    pub fn add_listings(&mut self, records: &[ListingRecord]) -> usize {
        self.clear_markers();

        for record in records {
            if let Some(marker) = Marker::from_listing(record, &self.currency) {
                let id = self.surface.add_marker(&marker);
                self.markers.push(id);
            }
        }

        log_debug!(
            "Placed {} markers for {} listings",
            self.markers.len(),
            records.len()
        );
        self.markers.len()
    }

    /// Removes all markers. Calling it on an empty map is a no-op.
    pub fn clear_markers(&mut self) {
        for id in self.markers.drain(..) {
            self.surface.remove_marker(id);
        }
    }

    /// Frames the records' coordinates. Returns false, leaving the view
    /// untouched, when none of them has a position.
    pub fn fit_to_listings(&mut self, records: &[ListingRecord]) -> bool {
        let Some(bounds) = Bounds::of_listings(records) else {
            return false;
        };

        self.surface
            .fit_bounds(bounds, self.config.fit_padding_px, self.config.fit_max_zoom);
        self.viewport = Viewport::Fitted {
            bounds,
            padding_px: self.config.fit_padding_px,
            max_zoom: self.config.fit_max_zoom,
        };
        true
    }

    /// Back to the default city-wide centre and zoom.
    pub fn reset_view(&mut self) {
        self.surface
            .set_view(self.config.default_center, self.config.default_zoom);
        self.viewport = Viewport::CityWide {
            center: self.config.default_center,
            zoom: self.config.default_zoom,
        };
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
