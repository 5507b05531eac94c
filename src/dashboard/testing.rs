//! In-memory data service with scripted answers and per-call gates, so tests
//! can hold one listing fetch open while a later one completes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::api::responses::MonthlyOccupancy;
use crate::api::{DataSource, FetchError, WordQuery};
use crate::models::{
    FilterCriteria, HostAggregate, ListingRecord, NeighbourhoodSentiment, PriceStats,
    RoomTypeAggregate, RoomType, SentimentAggregate, WordFrequencyEntry,
};

#[derive(Default)]
pub struct ScriptedSource {
    pub listings: Vec<ListingRecord>,
    pub fail_catalog: bool,
    pub price_stats: PriceStats,
    pub room_type_distribution: Vec<RoomTypeAggregate>,
    pub top_hosts: Vec<HostAggregate>,
    pub sentiment: SentimentAggregate,
    pub sentiment_by_neighbourhood: Vec<NeighbourhoodSentiment>,
    pub words: Vec<WordFrequencyEntry>,
    pub occupancy: Vec<MonthlyOccupancy>,
    listing_gates: Mutex<VecDeque<Arc<Notify>>>,
    word_gates: Mutex<VecDeque<Arc<Notify>>>,
    listing_calls: Mutex<Vec<FilterCriteria>>,
    word_calls: Mutex<Vec<WordQuery>>,
}

impl ScriptedSource {
    pub fn new(listings: Vec<ListingRecord>) -> Self {
        Self {
            listings,
            ..Default::default()
        }
    }

    /// The next listing fetch waits until the returned gate is notified.
    pub fn hold_next_listings(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.listing_gates.lock().unwrap().push_back(gate.clone());
        gate
    }

    pub fn hold_next_words(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.word_gates.lock().unwrap().push_back(gate.clone());
        gate
    }

    pub fn listing_calls(&self) -> Vec<FilterCriteria> {
        self.listing_calls.lock().unwrap().clone()
    }

    pub fn word_calls(&self) -> Vec<WordQuery> {
        self.word_calls.lock().unwrap().clone()
    }

    fn matches(record: &ListingRecord, criteria: &FilterCriteria) -> bool {
        if let Some(name) = criteria.selected_neighbourhood() {
            if record.neighbourhood.as_deref() != Some(name) {
                return false;
            }
        }
        if let Some(label) = criteria.room_type.as_deref() {
            if record.room_type != RoomType::from_label(label) {
                return false;
            }
        }
        let price = record.price.unwrap_or(0.0);
        if criteria.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if criteria.max_price.is_some_and(|max| price > max) {
            return false;
        }
        true
    }
}

async fn pass_gate(gates: &Mutex<VecDeque<Arc<Notify>>>) {
    let gate = gates.lock().unwrap().pop_front();
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn listings(&self, criteria: &FilterCriteria) -> Result<Vec<ListingRecord>, FetchError> {
        self.listing_calls.lock().unwrap().push(criteria.clone());
        pass_gate(&self.listing_gates).await;

        let limit = criteria.limit.unwrap_or(u32::MAX) as usize;
        Ok(self
            .listings
            .iter()
            .filter(|record| Self::matches(record, criteria))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn neighbourhoods(&self) -> Result<Vec<String>, FetchError> {
        if self.fail_catalog {
            return Err(FetchError::Network("connection refused".into()));
        }
        Ok(self
            .listings
            .iter()
            .filter_map(|record| record.neighbourhood.clone())
            .collect())
    }

    async fn room_types(&self) -> Result<Vec<String>, FetchError> {
        Ok(RoomType::ALL.iter().map(|kind| kind.as_str().to_string()).collect())
    }

    async fn price_stats(&self) -> Result<PriceStats, FetchError> {
        Ok(self.price_stats.clone())
    }

    async fn room_type_distribution(&self) -> Result<Vec<RoomTypeAggregate>, FetchError> {
        Ok(self.room_type_distribution.clone())
    }

    async fn top_hosts(&self, limit: u32) -> Result<Vec<HostAggregate>, FetchError> {
        Ok(self.top_hosts.iter().take(limit as usize).cloned().collect())
    }

    async fn sentiment(&self) -> Result<SentimentAggregate, FetchError> {
        Ok(self.sentiment.clone())
    }

    async fn sentiment_by_neighbourhood(&self) -> Result<Vec<NeighbourhoodSentiment>, FetchError> {
        Ok(self.sentiment_by_neighbourhood.clone())
    }

    async fn word_frequency(
        &self,
        query: &WordQuery,
    ) -> Result<Vec<WordFrequencyEntry>, FetchError> {
        self.word_calls.lock().unwrap().push(query.clone());
        pass_gate(&self.word_gates).await;
        Ok(self.words.clone())
    }

    async fn occupancy(&self) -> Result<Vec<MonthlyOccupancy>, FetchError> {
        Ok(self.occupancy.clone())
    }

    async fn health(&self) -> Result<String, FetchError> {
        Ok("healthy".into())
    }
}
