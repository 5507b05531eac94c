//! Response envelopes of the data service. Only the fields the dashboard reads
//! are declared; everything else in the payload is ignored.

use chrono::NaiveDate;
use serde::Deserialize;

use super::lenient;
use crate::models::{
    HostAggregate, ListingRecord, NeighbourhoodSentiment, OccupancyPoint, PriceStats,
    RoomTypeAggregate, SentimentAggregate, WordFrequencyEntry,
};

#[derive(Debug, Deserialize, Default)]
pub struct ListingsEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub listings: Vec<ListingRecord>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NeighbourhoodsEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub neighbourhoods: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RoomTypesEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub room_types: Vec<String>,
}

pub type PriceStatsEnvelope = PriceStats;

#[derive(Debug, Deserialize, Default)]
pub struct RoomTypeDistributionEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub distribution: Vec<RoomTypeAggregate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TopHostsEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub top_hosts: Vec<HostAggregate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SentimentEnvelope {
    #[serde(default)]
    pub sentiment: SentimentAggregate,
}

#[derive(Debug, Deserialize, Default)]
pub struct SentimentByNeighbourhoodEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub neighbourhoods: Vec<NeighbourhoodSentiment>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WordFrequencyEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub words: Vec<WordFrequencyEntry>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OccupancyEnvelope {
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub by_month: Vec<MonthlyOccupancy>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HealthEnvelope {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MonthlyOccupancy {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub occupancy_rate: f64,
}

impl MonthlyOccupancy {
    /// Turns a `YYYY-MM` bucket into a chart point labelled `Mon YYYY`.
    pub fn into_point(self) -> OccupancyPoint {
        let month = NaiveDate::parse_from_str(&format!("{}-01", self.month), "%Y-%m-%d")
            .map(|date| date.format("%b %Y").to_string())
            .unwrap_or(self.month);

        OccupancyPoint {
            month,
            rate: self.occupancy_rate.clamp(0.0, 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn occupancy_bucket_is_relabelled() {
        let point = MonthlyOccupancy {
            month: "2024-03".into(),
            occupancy_rate: 71.4,
        }
        .into_point();
        assert_eq!(point.month, "Mar 2024");
        assert_eq!(point.rate, 71.4);

        let odd = MonthlyOccupancy {
            month: "spring".into(),
            occupancy_rate: 140.0,
        }
        .into_point();
        assert_eq!(odd.month, "spring");
        assert_eq!(odd.rate, 100.0);
    }

    #[test]
    fn listings_envelope_keeps_good_records() {
        let envelope: ListingsEnvelope = serde_json::from_value(json!({
            "city": "london",
            "count": 3,
            "listings": [
                { "id": "1", "price": 120 },
                { "id": "2", "price": "85.00", "room_type": null },
                7
            ]
        }))
        .unwrap();
        assert_eq!(envelope.listings.len(), 2);
        assert_eq!(envelope.listings[1].price, Some(85.0));
    }

    #[test]
    fn top_hosts_carry_optional_rating() {
        let envelope: TopHostsEnvelope = serde_json::from_value(json!({
            "top_hosts": [
                {
                    "_id": 42,
                    "host_name": "Ana",
                    "listing_count": 9,
                    "avg_price": 140.5,
                    "avg_rating": 4.81
                },
                { "_id": "7", "host_name": "Ben", "listing_count": "3", "avg_price": null }
            ]
        }))
        .unwrap();
        assert_eq!(envelope.top_hosts[0].host_id, "42");
        assert_eq!(envelope.top_hosts[0].avg_rating, Some(4.81));
        assert_eq!(envelope.top_hosts[1].listing_count, 3);
        assert_eq!(envelope.top_hosts[1].avg_rating, None);
    }

    #[test]
    fn empty_body_decodes_to_defaults() {
        let envelope: SentimentEnvelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(envelope.sentiment.total(), 0);
        let words: WordFrequencyEnvelope =
            serde_json::from_value(json!({ "words": null })).unwrap();
        assert!(words.words.is_empty());
    }
}
