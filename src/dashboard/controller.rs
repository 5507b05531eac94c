use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::state::{DashboardState, QuickSummary};
use crate::aggregation::{
    positive_percentage, price_summary, room_type_distribution, sentiment_for_neighbourhood,
    synthetic_occupancy, top_hosts, top_neighbourhoods_by_price,
};
use crate::api::{DataFacade, WordQuery};
use crate::charts::{ChartAdapter, ChartDataset, ChartKind, ChartSurface};
use crate::map::{MapAdapter, MapSurface, ViewConfig, Viewport};
use crate::models::{
    FilterCriteria, HostAggregate, ListingRecord, NeighbourhoodPrice, OccupancySeries,
    OccupancySource, RoomTypeAggregate, SentimentAggregate, SentimentLabel, ViewScope,
    WordFrequencyEntry,
};
use crate::presentation::PanelSurface;
use crate::settings::DashboardSettings;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info};

/// What happened to one controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RefreshOutcome {
    /// Results reached the map and charts.
    Applied,
    /// A newer operation started first; results were dropped.
    Stale,
    /// A pending refresh will draw the change once its records arrive.
    Deferred,
    /// Startup data could not be loaded; the user was notified.
    Unavailable,
}

/// The three drawing targets the controller owns.
pub struct Surfaces {
    pub map: Box<dyn MapSurface>,
    pub charts: Box<dyn ChartSurface>,
    pub panel: Box<dyn PanelSurface>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub epoch: u64,
    pub criteria: FilterCriteria,
    pub scope: ViewScope,
    pub listing_count: usize,
    pub word_sentiment: SentimentLabel,
    pub summary: Option<QuickSummary>,
    pub hosts: Vec<HostAggregate>,
    pub notice: Option<String>,
    pub viewport: Viewport,
    pub marker_count: usize,
    pub chart_titles: Vec<(ChartKind, String)>,
}

struct Dashboard {
    state: DashboardState,
    map: MapAdapter,
    charts: ChartAdapter,
    panel: Box<dyn PanelSurface>,
}

struct ChartData {
    price_by_area: Vec<NeighbourhoodPrice>,
    room_types: Vec<RoomTypeAggregate>,
    occupancy: OccupancySeries,
    hosts: Vec<HostAggregate>,
    words: Vec<WordFrequencyEntry>,
}

/// Single owner of the filter criteria, the current record set and every live
/// marker and chart. Clones share the same dashboard.
///
/// Each refresh takes a new epoch before its first fetch and re-checks it
/// after every fetch, so a slow response from a superseded filter is dropped
/// instead of painted over a newer one.
#[derive(Clone)]
pub struct DashboardController {
    facade: DataFacade,
    settings: Arc<DashboardSettings>,
    inner: Arc<Mutex<Dashboard>>,
}

impl DashboardController {
    pub fn new(facade: DataFacade, settings: DashboardSettings, surfaces: Surfaces) -> Self {
        let view = ViewConfig {
            default_center: settings.default_center,
            default_zoom: settings.default_zoom,
            fit_padding_px: settings.fit_padding_px,
            fit_max_zoom: settings.fit_max_zoom,
        };

        let dashboard = Dashboard {
            state: DashboardState::new(),
            map: MapAdapter::new(surfaces.map, view, settings.currency_symbol.clone()),
            charts: ChartAdapter::new(surfaces.charts),
            panel: surfaces.panel,
        };

        Self {
            facade,
            settings: Arc::new(settings),
            inner: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Loads the filter options, then draws the city-wide view. A failed
    /// option load leaves an empty shell and one notification.
    pub async fn initialize(&self) -> RefreshOutcome {
        if let Some(status) = self.facade.health().await {
            log_info!("Data service status: {status}");
        }

        match self.facade.load_catalog().await {
            Ok(catalog) => {
                let mut guard = self.inner.lock().await;
                guard.panel.show_catalog(&catalog);
                guard.state.catalog = catalog;
            }
            Err(err) => {
                log_error!("Initial data load failed: {err}");
                let message = format!("Could not load dashboard data: {err}");
                let mut guard = self.inner.lock().await;
                guard.panel.notify(&message);
                guard.state.notice = Some(message);
                return RefreshOutcome::Unavailable;
            }
        }

        self.refresh(|_| FilterCriteria::unscoped()).await
    }

    pub async fn apply_filter(&self, criteria: FilterCriteria) -> RefreshOutcome {
        self.refresh(|_| criteria).await
    }

    pub async fn reset_filter(&self) -> RefreshOutcome {
        self.refresh(|_| FilterCriteria::unscoped()).await
    }

    /// Dropdown change: the other criteria of the latest request stay as they
    /// are, even if that request has not landed yet.
    pub async fn select_neighbourhood(&self, neighbourhood: Option<String>) -> RefreshOutcome {
        self.refresh(|requested| FilterCriteria {
            neighbourhood,
            ..requested.clone()
        })
        .await
    }

    /// Refetches and redraws only the word-frequency chart.
    pub async fn select_word_cloud_sentiment(&self, sentiment: SentimentLabel) -> RefreshOutcome {
        let (committed, word_epoch, scope) = {
            let mut guard = self.inner.lock().await;
            guard.state.word_sentiment = sentiment;
            let word_epoch = guard.state.begin_word_epoch();
            if guard.state.refresh_pending() {
                log_debug!(
                    "Word sentiment set to {}; pending refresh will draw it",
                    sentiment.as_str()
                );
                return RefreshOutcome::Deferred;
            }
            (guard.state.committed_epoch, word_epoch, guard.state.scope.clone())
        };

        let words = self
            .facade
            .word_frequency(&self.word_query(&scope, sentiment))
            .await;

        let mut guard = self.inner.lock().await;
        if !guard.state.is_current(committed) || guard.state.word_epoch != word_epoch {
            log_debug!("Discarding stale word cloud for {}", sentiment.as_str());
            return RefreshOutcome::Stale;
        }

        guard
            .charts
            .draw(&ChartDataset::WordFrequency { sentiment, words }, &scope);
        RefreshOutcome::Applied
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let guard = self.inner.lock().await;
        let state = &guard.state;

        DashboardSnapshot {
            epoch: state.committed_epoch,
            criteria: state.criteria.clone(),
            scope: state.scope.clone(),
            listing_count: state.listings.len(),
            word_sentiment: state.word_sentiment,
            summary: state.summary.clone(),
            hosts: state.hosts.clone(),
            notice: state.notice.clone(),
            viewport: guard.map.viewport(),
            marker_count: guard.map.marker_count(),
            chart_titles: ChartKind::ALL
                .iter()
                .filter_map(|kind| {
                    guard
                        .charts
                        .title(*kind)
                        .map(|title| (*kind, title.to_string()))
                })
                .collect(),
        }
    }

    /// Fetch, summarise, map, chart, in that order, all from one record set.
    /// `build` derives the new criteria from the latest requested ones under
    /// the same lock that issues the epoch.
    async fn refresh<F>(&self, build: F) -> RefreshOutcome
    where
        F: FnOnce(&FilterCriteria) -> FilterCriteria,
    {
        let (epoch, criteria) = {
            let mut guard = self.inner.lock().await;
            let criteria = build(&guard.state.requested_criteria)
                .normalized(self.settings.listing_limit, self.settings.max_listing_limit);
            (guard.state.begin_epoch(criteria.clone()), criteria)
        };
        let scope = criteria.scope();
        log_debug!("Epoch {epoch}: refreshing {:?}", scope);

        let listings = self.facade.listings(&criteria).await;
        let sentiment = self.sentiment_for(&scope).await;

        let (word_sentiment, word_epoch) = {
            let mut guard = self.inner.lock().await;
            let dashboard = &mut *guard;
            if !dashboard.state.is_current(epoch) {
                log_debug!("Discarding {} listings of stale epoch {epoch}", listings.len());
                return RefreshOutcome::Stale;
            }

            let summary = QuickSummary {
                listing_count: listings.len(),
                average_price: price_summary(&listings).avg_price,
                positive_percentage: positive_percentage(&sentiment),
                scope: scope.clone(),
            };
            dashboard.panel.show_summary(&summary);
            dashboard
                .state
                .commit(epoch, criteria, listings.clone(), summary);

            dashboard.map.add_listings(&listings);
            match scope {
                ViewScope::Scoped(_) => {
                    dashboard.map.fit_to_listings(&listings);
                }
                ViewScope::Unscoped => dashboard.map.reset_view(),
            }

            (dashboard.state.word_sentiment, dashboard.state.word_epoch)
        };

        let data = self.chart_data(&scope, &listings, word_sentiment).await;

        let mut guard = self.inner.lock().await;
        let dashboard = &mut *guard;
        if !dashboard.state.is_current(epoch) {
            log_debug!("Discarding charts of stale epoch {epoch}");
            return RefreshOutcome::Stale;
        }

        dashboard.panel.show_hosts(&data.hosts);
        dashboard.state.hosts = data.hosts;

        let charts = &mut dashboard.charts;
        charts.draw(&ChartDataset::PriceByArea(data.price_by_area), &scope);
        charts.draw(&ChartDataset::RoomTypes(data.room_types), &scope);
        charts.draw(&ChartDataset::Sentiment(sentiment), &scope);
        charts.draw(&ChartDataset::Occupancy(data.occupancy), &scope);
        if dashboard.state.word_epoch == word_epoch {
            charts.draw(
                &ChartDataset::WordFrequency {
                    sentiment: word_sentiment,
                    words: data.words,
                },
                &scope,
            );
        }

        log_info!(
            "Epoch {epoch} applied: {} listings, {} markers",
            listings.len(),
            dashboard.map.marker_count()
        );
        RefreshOutcome::Applied
    }

    async fn sentiment_for(&self, scope: &ViewScope) -> SentimentAggregate {
        match scope {
            ViewScope::Unscoped => self.facade.sentiment().await,
            ViewScope::Scoped(name) => {
                let rows = self.facade.sentiment_by_neighbourhood().await;
                sentiment_for_neighbourhood(&rows, name)
            }
        }
    }

    /// City-wide slices come from the server and fall back to the aggregator
    /// when it answers empty. A neighbourhood slice is always computed locally.
    async fn chart_data(
        &self,
        scope: &ViewScope,
        listings: &[ListingRecord],
        word_sentiment: SentimentLabel,
    ) -> ChartData {
        let host_limit = self.settings.top_hosts as usize;

        let (price_by_area, room_types, occupancy, hosts) = match scope {
            ViewScope::Unscoped => {
                let stats = self.facade.price_stats().await;
                let price_by_area = top_neighbourhoods_by_price(
                    &stats.by_neighbourhood,
                    self.settings.top_neighbourhoods,
                );

                let mut room_types = self.facade.room_type_distribution().await;
                if room_types.is_empty() {
                    room_types = room_type_distribution(listings);
                }

                let mut hosts = self.facade.top_hosts(self.settings.top_hosts).await;
                if hosts.is_empty() {
                    hosts = top_hosts(listings, host_limit);
                }

                let points = self.facade.occupancy().await;
                let occupancy = if points.is_empty() {
                    synthetic_occupancy(None)
                } else {
                    OccupancySeries {
                        source: OccupancySource::Server,
                        points,
                    }
                };

                (price_by_area, room_types, occupancy, hosts)
            }
            ViewScope::Scoped(name) => {
                let summary = price_summary(listings);
                let price_by_area = if summary.count == 0 {
                    Vec::new()
                } else {
                    vec![NeighbourhoodPrice {
                        neighbourhood: name.clone(),
                        summary,
                    }]
                };

                (
                    price_by_area,
                    room_type_distribution(listings),
                    synthetic_occupancy(Some(name)),
                    top_hosts(listings, host_limit),
                )
            }
        };

        let words = self
            .facade
            .word_frequency(&self.word_query(scope, word_sentiment))
            .await;

        ChartData {
            price_by_area,
            room_types,
            occupancy,
            hosts,
            words,
        }
    }

    fn word_query(&self, scope: &ViewScope, sentiment: SentimentLabel) -> WordQuery {
        WordQuery {
            sentiment: Some(sentiment),
            neighbourhood: scope.neighbourhood().map(str::to_string),
            limit: self.settings.word_limit,
        }
    }
}
