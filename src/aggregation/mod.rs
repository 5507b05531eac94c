//! Pure statistics over an in-memory listing set. Used whenever the server has
//! no endpoint for the exact slice on screen (a selected neighbourhood, or an
//! empty server answer). Nothing here reads or writes shared state.

pub mod hosts;
pub mod occupancy;
pub mod prices;
pub mod room_types;
pub mod sentiment;

pub use hosts::{top_hosts, DEFAULT_TOP_HOSTS, UNKNOWN_HOST_ID};
pub use occupancy::{synthetic_occupancy, SEASONAL_BASELINE};
pub use prices::{price_summary, top_neighbourhoods_by_price};
pub use room_types::room_type_distribution;
pub use sentiment::{positive_percentage, sentiment_from_counts, sentiment_for_neighbourhood};

/// Rounds half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}
