use crate::models::{ListingRecord, NeighbourhoodPrice, PriceSummary};

/// Average/min/max over positioned listings with a known positive price. A set
/// with no such listing yields an all-zero summary.
pub fn price_summary(records: &[ListingRecord]) -> PriceSummary {
    let mut prices = records.iter().filter_map(ListingRecord::mappable_price);

    let Some(first) = prices.next() else {
        return PriceSummary::default();
    };

    let (sum, min, max, count) = prices.fold(
        (first, first, first, 1u64),
        |(sum, min, max, count), price| (sum + price, min.min(price), max.max(price), count + 1),
    );

    PriceSummary {
        avg_price: sum / count as f64,
        min_price: min,
        max_price: max,
        count,
    }
}

/// The `n` most expensive neighbourhoods by average price. Equal averages keep
/// the server's order.
pub fn top_neighbourhoods_by_price(
    rows: &[NeighbourhoodPrice],
    n: usize,
) -> Vec<NeighbourhoodPrice> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.summary.avg_price.total_cmp(&a.summary.avg_price));
    sorted.truncate(n);
    sorted
}
