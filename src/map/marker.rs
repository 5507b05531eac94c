use maud::html;
use serde::Serialize;

use crate::models::{LatLng, ListingRecord};

pub const HIGH_PRICE_THRESHOLD: f64 = 300.0;
pub const MID_PRICE_THRESHOLD: f64 = 150.0;

/// Price bucket used to colour a marker.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PriceTier {
    High,
    Mid,
    Low,
    Neutral,
}

impl PriceTier {
    pub fn for_price(price: Option<f64>) -> Self {
        match price {
            Some(price) if price > HIGH_PRICE_THRESHOLD => PriceTier::High,
            Some(price) if price > MID_PRICE_THRESHOLD => PriceTier::Mid,
            Some(price) if price.is_finite() => PriceTier::Low,
            _ => PriceTier::Neutral,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PriceTier::High => "#e74c3c",
            PriceTier::Mid => "#f39c12",
            PriceTier::Low => "#27ae60",
            PriceTier::Neutral => "#95a5a6",
        }
    }
}

/// Detail content shown when a marker is clicked.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub title: String,
    pub neighbourhood: String,
    pub price: String,
    pub room_type: String,
    pub rating: Option<String>,
    pub review_count: Option<u64>,
}

impl Popup {
    pub fn to_html(&self) -> String {
        html! {
            div class="listing-popup" {
                h4 { (self.title) }
                p { strong { "Neighbourhood: " } (self.neighbourhood) }
                p { strong { "Price: " } (self.price) " / night" }
                p { strong { "Room type: " } (self.room_type) }
                @if let Some(rating) = &self.rating {
                    p { strong { "Rating: " } (rating) }
                }
                @if let Some(reviews) = self.review_count {
                    p { strong { "Reviews: " } (reviews) }
                }
            }
        }
        .into_string()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub listing_id: String,
    pub position: LatLng,
    pub tier: PriceTier,
    pub color: &'static str,
    pub popup: Popup,
}

impl Marker {
    /// `None` for records that cannot be placed: no coordinates or no known price.
    pub fn from_listing(record: &ListingRecord, currency: &str) -> Option<Self> {
        let position = record.position()?;
        let price = record.known_price()?;
        let tier = PriceTier::for_price(Some(price));

        Some(Self {
            listing_id: record.id.clone(),
            position,
            tier,
            color: tier.color(),
            popup: Popup {
                title: record.display_name().to_string(),
                neighbourhood: record.neighbourhood_name().to_string(),
                price: format_price(currency, price),
                room_type: record.room_type.as_str().to_string(),
                rating: record.rating.map(|rating| format!("{rating:.1}")),
                review_count: record.review_count,
            },
        })
    }
}

pub fn format_price(currency: &str, price: f64) -> String {
    format!("{currency}{price:.0}")
}
