use std::collections::HashMap;

use crate::models::{HostAggregate, ListingRecord};

pub const DEFAULT_TOP_HOSTS: usize = 10;

/// Bucket for records that carry no host id.
pub const UNKNOWN_HOST_ID: &str = "unknown";

struct HostTally {
    host_id: String,
    host_name: Option<String>,
    listing_count: u64,
    price_sum: f64,
    price_count: u64,
    rating_sum: f64,
    rating_count: u64,
}

/// Ranks hosts by how many of the supplied listings they own.
///
/// Average price only uses positioned listings with a known positive price and
/// is 0 when a host has none. Every listing counts toward the listing count. Ordering is non-increasing by listing count; equal counts
/// keep the order in which the hosts were first encountered.
pub fn top_hosts(records: &[ListingRecord], limit: usize) -> Vec<HostAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<HostTally> = Vec::new();

    for record in records {
        let host_id = record
            .host_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(UNKNOWN_HOST_ID);

        let slot = *index.entry(host_id).or_insert_with(|| {
            tallies.push(HostTally {
                host_id: host_id.to_string(),
                host_name: None,
                listing_count: 0,
                price_sum: 0.0,
                price_count: 0,
                rating_sum: 0.0,
                rating_count: 0,
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.listing_count += 1;
        if tally.host_name.is_none() {
            tally.host_name = record.host_name.clone();
        }
        if let Some(price) = record.mappable_price() {
            tally.price_sum += price;
            tally.price_count += 1;
        }
        if let Some(rating) = record.rating.filter(|rating| rating.is_finite()) {
            tally.rating_sum += rating;
            tally.rating_count += 1;
        }
    }

    // `sort_by` is stable, which keeps first-encounter order among ties.
    tallies.sort_by(|a, b| b.listing_count.cmp(&a.listing_count));

    tallies
        .into_iter()
        .take(limit)
        .map(|tally| HostAggregate {
            host_name: tally
                .host_name
                .unwrap_or_else(|| format!("Host {}", tally.host_id)),
            avg_price: if tally.price_count > 0 {
                tally.price_sum / tally.price_count as f64
            } else {
                0.0
            },
            avg_rating: (tally.rating_count > 0)
                .then(|| tally.rating_sum / tally.rating_count as f64),
            listing_count: tally.listing_count,
            host_id: tally.host_id,
        })
        .collect()
}
