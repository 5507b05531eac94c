use serde::{Deserialize, Serialize};

use crate::api::lenient;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum RoomType {
    #[serde(rename = "Entire home/apt")]
    EntireHome,
    #[serde(rename = "Private room")]
    PrivateRoom,
    #[serde(rename = "Shared room")]
    SharedRoom,
    #[serde(rename = "Hotel room")]
    HotelRoom,
    #[default]
    Unknown,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::EntireHome,
        RoomType::PrivateRoom,
        RoomType::SharedRoom,
        RoomType::HotelRoom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::EntireHome => "Entire home/apt",
            RoomType::PrivateRoom => "Private room",
            RoomType::SharedRoom => "Shared room",
            RoomType::HotelRoom => "Hotel room",
            RoomType::Unknown => "Unknown",
        }
    }

    /// Maps a server label onto the closed set; anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        RoomType::ALL
            .into_iter()
            .find(|room_type| room_type.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or(RoomType::Unknown)
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One listing as returned by the listing query. Every field is optional on the
/// wire and decoded leniently so one malformed record never rejects a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ListingRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::room_type")]
    pub room_type: RoomType,
    #[serde(
        default,
        rename = "neighbourhood_cleansed",
        alias = "neighbourhood",
        deserialize_with = "lenient::opt_string"
    )]
    pub neighbourhood: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub host_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub host_name: Option<String>,
    #[serde(
        default,
        rename = "review_scores_rating",
        deserialize_with = "lenient::opt_f64"
    )]
    pub rating: Option<f64>,
    #[serde(
        default,
        rename = "number_of_reviews",
        deserialize_with = "lenient::opt_u64"
    )]
    pub review_count: Option<u64>,
}

impl ListingRecord {
    /// Price when it is known and positive; zero and negatives mean "unknown".
    pub fn known_price(&self) -> Option<f64> {
        self.price.filter(|price| price.is_finite() && *price > 0.0)
    }

    pub fn position(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(LatLng { lat, lng })
            }
            _ => None,
        }
    }

    /// Whether the record may be drawn on the map and used for price aggregation.
    pub fn is_mappable(&self) -> bool {
        self.position().is_some() && self.known_price().is_some()
    }

    /// Price of a mappable record; unpositioned records never feed price averages.
    pub fn mappable_price(&self) -> Option<f64> {
        self.position().and(self.known_price())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed listing")
    }

    pub fn neighbourhood_name(&self) -> &str {
        self.neighbourhood.as_deref().unwrap_or("Unknown")
    }
}
