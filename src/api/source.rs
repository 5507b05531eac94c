use async_trait::async_trait;

use super::responses::MonthlyOccupancy;
use super::FetchError;
use crate::models::{
    FilterCriteria, HostAggregate, ListingRecord, NeighbourhoodSentiment, PriceStats,
    RoomTypeAggregate, SentimentAggregate, SentimentLabel, WordFrequencyEntry,
};

/// Parameters of the word-frequency endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct WordQuery {
    pub sentiment: Option<SentimentLabel>,
    pub neighbourhood: Option<String>,
    pub limit: u32,
}

impl WordQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", self.limit.to_string())];
        if let Some(sentiment) = self.sentiment {
            pairs.push(("sentiment", sentiment.as_str().to_string()));
        }
        if let Some(neighbourhood) = &self.neighbourhood {
            pairs.push(("neighbourhood", neighbourhood.clone()));
        }
        pairs
    }
}

/// Raw access to the remote data service for one city. Implementations
/// report every failure; the facade decides what to substitute.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn listings(&self, criteria: &FilterCriteria) -> Result<Vec<ListingRecord>, FetchError>;

    async fn neighbourhoods(&self) -> Result<Vec<String>, FetchError>;

    async fn room_types(&self) -> Result<Vec<String>, FetchError>;

    async fn price_stats(&self) -> Result<PriceStats, FetchError>;

    async fn room_type_distribution(&self) -> Result<Vec<RoomTypeAggregate>, FetchError>;

    async fn top_hosts(&self, limit: u32) -> Result<Vec<HostAggregate>, FetchError>;

    async fn sentiment(&self) -> Result<SentimentAggregate, FetchError>;

    async fn sentiment_by_neighbourhood(&self) -> Result<Vec<NeighbourhoodSentiment>, FetchError>;

    async fn word_frequency(&self, query: &WordQuery)
        -> Result<Vec<WordFrequencyEntry>, FetchError>;

    async fn occupancy(&self) -> Result<Vec<MonthlyOccupancy>, FetchError>;

    async fn health(&self) -> Result<String, FetchError>;
}
