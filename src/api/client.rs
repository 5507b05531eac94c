use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Instant;

use super::responses::{
    HealthEnvelope, ListingsEnvelope, MonthlyOccupancy, NeighbourhoodsEnvelope, OccupancyEnvelope,
    PriceStatsEnvelope, RoomTypeDistributionEnvelope, RoomTypesEnvelope,
    SentimentByNeighbourhoodEnvelope, SentimentEnvelope, TopHostsEnvelope, WordFrequencyEnvelope,
};
use super::source::{DataSource, WordQuery};
use super::FetchError;
use crate::models::{
    FilterCriteria, HostAggregate, ListingRecord, NeighbourhoodSentiment, PriceStats,
    RoomTypeAggregate, SentimentAggregate, WordFrequencyEntry,
};
use crate::settings::DashboardSettings;

const ENABLE_LOGS: bool = true;

use crate::log_debug;

const USER_AGENT: &str = concat!("innsight-dashboard/", env!("CARGO_PKG_VERSION"));

/// `DataSource` backed by the InnSight HTTP/JSON service.
#[derive(Clone)]
pub struct HttpDataSource {
    client: Client,
    base_url: String,
    city: String,
}

impl HttpDataSource {
    pub fn new(settings: &DashboardSettings) -> Result<Self, FetchError> {
        if settings.city.trim().is_empty() {
            return Err(FetchError::Config("city must not be empty".into()));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| FetchError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            city: settings.city.clone(),
        })
    }

    fn listings_url(&self, suffix: &str) -> String {
        format!("{}/api/listings/{}{}", self.base_url, self.city, suffix)
    }

    fn analytics_url(&self, suffix: &str) -> String {
        format!("{}/api/analytics/{}{}", self.base_url, self.city, suffix)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, FetchError> {
        let start = Instant::now();

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        log_debug!(
            "GET {} ({} bytes) in {:?}",
            url,
            text.len(),
            start.elapsed()
        );

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn listings(&self, criteria: &FilterCriteria) -> Result<Vec<ListingRecord>, FetchError> {
        let envelope: ListingsEnvelope = self
            .get_json(&self.listings_url(""), &criteria.query_pairs())
            .await?;
        Ok(envelope.listings)
    }

    async fn neighbourhoods(&self) -> Result<Vec<String>, FetchError> {
        let envelope: NeighbourhoodsEnvelope = self
            .get_json(&self.listings_url("/neighbourhoods"), &[])
            .await?;
        Ok(envelope.neighbourhoods)
    }

    async fn room_types(&self) -> Result<Vec<String>, FetchError> {
        let envelope: RoomTypesEnvelope = self
            .get_json(&self.listings_url("/room-types"), &[])
            .await?;
        Ok(envelope.room_types)
    }

    async fn price_stats(&self) -> Result<PriceStats, FetchError> {
        let envelope: PriceStatsEnvelope = self
            .get_json(&self.analytics_url("/price-stats"), &[])
            .await?;
        Ok(envelope)
    }

    async fn room_type_distribution(&self) -> Result<Vec<RoomTypeAggregate>, FetchError> {
        let envelope: RoomTypeDistributionEnvelope = self
            .get_json(&self.analytics_url("/room-type-distribution"), &[])
            .await?;
        Ok(envelope.distribution)
    }

    async fn top_hosts(&self, limit: u32) -> Result<Vec<HostAggregate>, FetchError> {
        let envelope: TopHostsEnvelope = self
            .get_json(
                &self.analytics_url("/top-hosts"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(envelope.top_hosts)
    }

    async fn sentiment(&self) -> Result<SentimentAggregate, FetchError> {
        let envelope: SentimentEnvelope = self
            .get_json(&self.analytics_url("/sentiment"), &[])
            .await?;
        Ok(envelope.sentiment)
    }

    async fn sentiment_by_neighbourhood(&self) -> Result<Vec<NeighbourhoodSentiment>, FetchError> {
        let envelope: SentimentByNeighbourhoodEnvelope = self
            .get_json(&self.analytics_url("/sentiment/by-neighbourhood"), &[])
            .await?;
        Ok(envelope.neighbourhoods)
    }

    async fn word_frequency(
        &self,
        query: &WordQuery,
    ) -> Result<Vec<WordFrequencyEntry>, FetchError> {
        let envelope: WordFrequencyEnvelope = self
            .get_json(&self.analytics_url("/wordcloud"), &query.query_pairs())
            .await?;
        Ok(envelope.words)
    }

    async fn occupancy(&self) -> Result<Vec<MonthlyOccupancy>, FetchError> {
        let envelope: OccupancyEnvelope = self
            .get_json(&self.analytics_url("/occupancy"), &[])
            .await?;
        Ok(envelope.by_month)
    }

    async fn health(&self) -> Result<String, FetchError> {
        let url = format!("{}/health", self.base_url);
        let envelope: HealthEnvelope = self.get_json(&url, &[]).await?;
        Ok(envelope.status)
    }
}
