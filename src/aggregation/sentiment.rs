use super::percentage;
use crate::models::{NeighbourhoodSentiment, SentimentAggregate, SentimentBucket};

/// Builds an aggregate from raw label counts with one-decimal percentages.
pub fn sentiment_from_counts(positive: u64, neutral: u64, negative: u64) -> SentimentAggregate {
    let total = positive + neutral + negative;
    let bucket = |count| SentimentBucket {
        count,
        percentage: percentage(count, total),
        avg_score: None,
    };

    SentimentAggregate {
        positive: bucket(positive),
        neutral: bucket(neutral),
        negative: bucket(negative),
    }
}

/// Share of positive reviews, recomputed from the counts so it never depends
/// on a percentage the server may have left out.
pub fn positive_percentage(sentiment: &SentimentAggregate) -> f64 {
    percentage(sentiment.positive.count, sentiment.total())
}

/// The breakdown for one neighbourhood, zeroed when the server has no row for it.
pub fn sentiment_for_neighbourhood(
    rows: &[NeighbourhoodSentiment],
    neighbourhood: &str,
) -> SentimentAggregate {
    rows.iter()
        .find(|row| row.neighbourhood == neighbourhood)
        .map(|row| sentiment_from_counts(row.positive, row.neutral, row.negative))
        .unwrap_or_default()
}
