use std::sync::Arc;

use super::source::{DataSource, WordQuery};
use super::FetchError;
use crate::models::{
    FilterCriteria, HostAggregate, ListingRecord, NeighbourhoodSentiment, OccupancyPoint,
    PriceStats, RoomTypeAggregate, SentimentAggregate, WordFrequencyEntry,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Filter panel options loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub neighbourhoods: Vec<String>,
    pub room_types: Vec<String>,
}

/// Every sub-fetch the controller performs goes through here. A failed call
/// is logged and replaced by an empty/zeroed value so one broken endpoint
/// never stalls a refresh.
#[derive(Clone)]
pub struct DataFacade {
    source: Arc<dyn DataSource>,
}

fn degrade<T: Default>(endpoint: &str, err: FetchError) -> T {
    log_warn!("{endpoint} fetch failed, using empty result: {err}");
    T::default()
}

impl DataFacade {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// The one mandatory load: without neighbourhoods the filter panel is
    /// unusable, so this failure is reported instead of swallowed.
    pub async fn load_catalog(&self) -> Result<Catalog, FetchError> {
        let mut neighbourhoods = self.source.neighbourhoods().await?;
        neighbourhoods.retain(|name| !name.trim().is_empty());
        neighbourhoods.sort();
        neighbourhoods.dedup();

        let mut room_types = self
            .source
            .room_types()
            .await
            .unwrap_or_else(|err| degrade("room-types", err));
        room_types.retain(|label| !label.trim().is_empty());

        log_info!(
            "Catalog loaded: {} neighbourhoods, {} room types",
            neighbourhoods.len(),
            room_types.len()
        );

        Ok(Catalog {
            neighbourhoods,
            room_types,
        })
    }

    pub async fn health(&self) -> Option<String> {
        match self.source.health().await {
            Ok(status) => Some(status),
            Err(err) => {
                log_warn!("health check failed: {err}");
                None
            }
        }
    }

    pub async fn listings(&self, criteria: &FilterCriteria) -> Vec<ListingRecord> {
        self.source
            .listings(criteria)
            .await
            .unwrap_or_else(|err| degrade("listings", err))
    }

    pub async fn price_stats(&self) -> PriceStats {
        self.source
            .price_stats()
            .await
            .unwrap_or_else(|err| degrade("price-stats", err))
    }

    pub async fn room_type_distribution(&self) -> Vec<RoomTypeAggregate> {
        self.source
            .room_type_distribution()
            .await
            .unwrap_or_else(|err| degrade("room-type-distribution", err))
    }

    pub async fn top_hosts(&self, limit: u32) -> Vec<HostAggregate> {
        self.source
            .top_hosts(limit)
            .await
            .unwrap_or_else(|err| degrade("top-hosts", err))
    }

    pub async fn sentiment(&self) -> SentimentAggregate {
        self.source
            .sentiment()
            .await
            .unwrap_or_else(|err| degrade("sentiment", err))
    }

    pub async fn sentiment_by_neighbourhood(&self) -> Vec<NeighbourhoodSentiment> {
        self.source
            .sentiment_by_neighbourhood()
            .await
            .unwrap_or_else(|err| degrade("sentiment-by-neighbourhood", err))
    }

    pub async fn word_frequency(&self, query: &WordQuery) -> Vec<WordFrequencyEntry> {
        let mut words: Vec<WordFrequencyEntry> = self
            .source
            .word_frequency(query)
            .await
            .unwrap_or_else(|err| degrade("wordcloud", err));
        words.retain(|entry| !entry.word.is_empty());
        words
    }

    /// Server-side monthly occupancy, already relabelled. Empty means the
    /// caller must substitute its own series.
    pub async fn occupancy(&self) -> Vec<OccupancyPoint> {
        let months = self
            .source
            .occupancy()
            .await
            .unwrap_or_else(|err| degrade("occupancy", err));
        months.into_iter().map(|month| month.into_point()).collect()
    }
}
