//! Derived summaries. None of these are persisted; they are rebuilt from the
//! current listing set (or a fresh server answer) on every filter epoch.

use serde::{Deserialize, Serialize};

use crate::api::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostAggregate {
    #[serde(rename = "_id", default, deserialize_with = "lenient::label_or_unknown")]
    pub host_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub host_name: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub listing_count: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub avg_price: f64,
    /// Mean review score over the host's rated listings.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomTypeAggregate {
    #[serde(rename = "_id", default, deserialize_with = "lenient::label_or_unknown")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    #[default]
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SentimentBucket {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub percentage: f64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SentimentAggregate {
    #[serde(default)]
    pub positive: SentimentBucket,
    #[serde(default)]
    pub neutral: SentimentBucket,
    #[serde(default)]
    pub negative: SentimentBucket,
}

impl SentimentAggregate {
    pub fn bucket(&self, label: SentimentLabel) -> &SentimentBucket {
        match label {
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Neutral => &self.neutral,
            SentimentLabel::Negative => &self.negative,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive.count + self.neutral.count + self.negative.count
    }
}

/// One row of the sentiment-by-neighbourhood breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NeighbourhoodSentiment {
    #[serde(default, deserialize_with = "lenient::string")]
    pub neighbourhood: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_reviews: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub positive: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub positive_pct: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub neutral: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub neutral_pct: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub negative: u64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub negative_pct: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub avg_sentiment_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PriceSummary {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub avg_price: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub min_price: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub max_price: f64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NeighbourhoodPrice {
    #[serde(rename = "_id", default, deserialize_with = "lenient::label_or_unknown")]
    pub neighbourhood: String,
    #[serde(flatten)]
    pub summary: PriceSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PriceStats {
    #[serde(default)]
    pub overall: PriceSummary,
    #[serde(default, deserialize_with = "lenient::tolerant_vec")]
    pub by_neighbourhood: Vec<NeighbourhoodPrice>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OccupancySource {
    Server,
    Synthetic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyPoint {
    pub month: String,
    pub rate: f64,
}

/// Monthly occupancy plus where it came from. Synthetic series have the same
/// shape as server ones; only `source` tells them apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySeries {
    pub source: OccupancySource,
    pub points: Vec<OccupancyPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordFrequencyEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub word: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_stats_rows_flatten_summary() {
        let stats: PriceStats = serde_json::from_value(json!({
            "overall": { "avg_price": "142.5", "min_price": 10, "max_price": 900, "count": 3 },
            "by_neighbourhood": [
                { "_id": "Westminster", "avg_price": 250.0, "min_price": 80, "max_price": 900, "count": 2 },
                { "_id": null, "avg_price": 40, "count": "1" }
            ]
        }))
        .unwrap();

        assert_eq!(stats.overall.avg_price, 142.5);
        assert_eq!(stats.by_neighbourhood.len(), 2);
        assert_eq!(stats.by_neighbourhood[0].neighbourhood, "Westminster");
        assert_eq!(stats.by_neighbourhood[1].neighbourhood, "Unknown");
        assert_eq!(stats.by_neighbourhood[1].summary.count, 1);
        assert_eq!(stats.by_neighbourhood[1].summary.min_price, 0.0);
    }

    #[test]
    fn sentiment_total_sums_buckets() {
        let sentiment: SentimentAggregate = serde_json::from_value(json!({
            "positive": { "count": 100 },
            "neutral": { "count": 20 },
            "negative": { "count": 5 }
        }))
        .unwrap();
        assert_eq!(sentiment.total(), 125);
        assert_eq!(sentiment.bucket(SentimentLabel::Neutral).count, 20);
        assert_eq!(sentiment.positive.avg_score, None);
    }
}
