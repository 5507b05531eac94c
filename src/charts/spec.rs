//! Dataset → drawable chart description. Titles and colours depend only on
//! the chart kind and the view scope.

use serde::Serialize;

use super::palette::{line_color, sentiment_color, series_colors, HIGHLIGHT, PALETTE};
use super::wordcloud::{scale_words, WordGlyph};
use crate::models::{
    NeighbourhoodPrice, OccupancySeries, OccupancySource, RoomTypeAggregate, SentimentAggregate,
    SentimentLabel, ViewScope, WordFrequencyEntry,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    PriceByArea,
    RoomType,
    Sentiment,
    Occupancy,
    WordFrequency,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::PriceByArea,
        ChartKind::RoomType,
        ChartKind::Sentiment,
        ChartKind::Occupancy,
        ChartKind::WordFrequency,
    ];
}

/// Input for one chart redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartDataset {
    PriceByArea(Vec<NeighbourhoodPrice>),
    RoomTypes(Vec<RoomTypeAggregate>),
    Sentiment(SentimentAggregate),
    Occupancy(OccupancySeries),
    WordFrequency {
        sentiment: SentimentLabel,
        words: Vec<WordFrequencyEntry>,
    },
}

impl ChartDataset {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartDataset::PriceByArea(_) => ChartKind::PriceByArea,
            ChartDataset::RoomTypes(_) => ChartKind::RoomType,
            ChartDataset::Sentiment(_) => ChartKind::Sentiment,
            ChartDataset::Occupancy(_) => ChartKind::Occupancy,
            ChartDataset::WordFrequency { .. } => ChartKind::WordFrequency,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartBody {
    Bar {
        labels: Vec<String>,
        values: Vec<f64>,
        colors: Vec<String>,
    },
    Doughnut {
        labels: Vec<String>,
        values: Vec<f64>,
        colors: Vec<String>,
    },
    Line {
        labels: Vec<String>,
        values: Vec<f64>,
        color: String,
        synthetic: bool,
    },
    WordCloud {
        words: Vec<WordGlyph>,
        colors: Vec<String>,
    },
    NoData {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub body: ChartBody,
}

pub fn chart_title(kind: ChartKind, scope: &ViewScope, sentiment: SentimentLabel) -> String {
    match (kind, scope.neighbourhood()) {
        (ChartKind::PriceByArea, None) => "Top Neighbourhoods by Average Price".into(),
        (ChartKind::PriceByArea, Some(name)) => format!("Average Price in {name}"),
        (ChartKind::RoomType, None) => "Room Type Distribution".into(),
        (ChartKind::RoomType, Some(name)) => format!("Room Types in {name}"),
        (ChartKind::Sentiment, None) => "Review Sentiment (City-wide)".into(),
        (ChartKind::Sentiment, Some(name)) => format!("Review Sentiment in {name}"),
        (ChartKind::Occupancy, None) => "Monthly Occupancy Rate".into(),
        (ChartKind::Occupancy, Some(name)) => format!("Monthly Occupancy in {name}"),
        (ChartKind::WordFrequency, None) => {
            format!("Common Words in {} Reviews", sentiment.title())
        }
        (ChartKind::WordFrequency, Some(name)) => {
            format!("Common Words in {} Reviews: {name}", sentiment.title())
        }
    }
}

fn no_data(message: &str) -> ChartBody {
    ChartBody::NoData {
        message: message.to_string(),
    }
}

pub fn build_spec(dataset: &ChartDataset, scope: &ViewScope) -> ChartSpec {
    let kind = dataset.kind();

    let (sentiment, body) = match dataset {
        ChartDataset::PriceByArea(rows) => {
            let body = if rows.is_empty() {
                no_data("No price data for the current selection")
            } else {
                ChartBody::Bar {
                    labels: rows.iter().map(|row| row.neighbourhood.clone()).collect(),
                    values: rows
                        .iter()
                        .map(|row| (row.summary.avg_price * 100.0).round() / 100.0)
                        .collect(),
                    colors: series_colors(scope, rows.len()),
                }
            };
            (SentimentLabel::default(), body)
        }
        ChartDataset::RoomTypes(groups) => {
            let body = if groups.is_empty() {
                no_data("No listings match the current filters")
            } else {
                ChartBody::Doughnut {
                    labels: groups.iter().map(|group| group.label.clone()).collect(),
                    values: groups.iter().map(|group| group.percentage).collect(),
                    colors: series_colors(scope, groups.len()),
                }
            };
            (SentimentLabel::default(), body)
        }
        ChartDataset::Sentiment(sentiment) => {
            let body = if sentiment.total() == 0 {
                no_data("No reviews with sentiment for the current selection")
            } else {
                ChartBody::Doughnut {
                    labels: SentimentLabel::ALL
                        .iter()
                        .map(|label| label.title().to_string())
                        .collect(),
                    values: SentimentLabel::ALL
                        .iter()
                        .map(|label| sentiment.bucket(*label).count as f64)
                        .collect(),
                    colors: SentimentLabel::ALL
                        .iter()
                        .map(|label| match scope {
                            ViewScope::Scoped(_) => HIGHLIGHT.to_string(),
                            ViewScope::Unscoped => sentiment_color(*label).to_string(),
                        })
                        .collect(),
                }
            };
            (SentimentLabel::default(), body)
        }
        ChartDataset::Occupancy(series) => {
            let body = if series.points.is_empty() {
                no_data("No occupancy data available")
            } else {
                ChartBody::Line {
                    labels: series.points.iter().map(|p| p.month.clone()).collect(),
                    values: series.points.iter().map(|p| p.rate).collect(),
                    color: line_color(scope).to_string(),
                    synthetic: series.source == OccupancySource::Synthetic,
                }
            };
            (SentimentLabel::default(), body)
        }
        ChartDataset::WordFrequency { sentiment, words } => {
            let body = if words.is_empty() {
                no_data("No words found for the current selection")
            } else {
                ChartBody::WordCloud {
                    words: scale_words(words),
                    colors: match scope {
                        ViewScope::Scoped(_) => vec![HIGHLIGHT.to_string()],
                        ViewScope::Unscoped => PALETTE.iter().map(|c| c.to_string()).collect(),
                    },
                }
            };
            (*sentiment, body)
        }
    };

    ChartSpec {
        kind,
        title: chart_title(kind, scope, sentiment),
        body,
    }
}
