use serde::Serialize;

use crate::models::{LatLng, ListingRecord};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Smallest box containing every positioned record; `None` if none has coordinates.
    pub fn of_listings(records: &[ListingRecord]) -> Option<Self> {
        let mut positions = records.iter().filter_map(ListingRecord::position);
        let first = positions.next()?;

        Some(positions.fold(
            Bounds {
                south_west: first,
                north_east: first,
            },
            |bounds, point| Bounds {
                south_west: LatLng {
                    lat: bounds.south_west.lat.min(point.lat),
                    lng: bounds.south_west.lng.min(point.lng),
                },
                north_east: LatLng {
                    lat: bounds.north_east.lat.max(point.lat),
                    lng: bounds.north_east.lng.max(point.lng),
                },
            },
        ))
    }
}

/// Viewport behaviour: where "the whole city" is and how a fit is padded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub fit_padding_px: u32,
    pub fit_max_zoom: u8,
}

/// What the map is currently framing.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Viewport {
    CityWide { center: LatLng, zoom: u8 },
    Fitted { bounds: Bounds, padding_px: u32, max_zoom: u8 },
}
