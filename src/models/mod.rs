pub mod aggregates;
pub mod filter;
pub mod listing;

pub use aggregates::{
    HostAggregate, NeighbourhoodPrice, NeighbourhoodSentiment, OccupancyPoint, OccupancySeries,
    OccupancySource, PriceStats, PriceSummary, RoomTypeAggregate, SentimentAggregate,
    SentimentBucket, SentimentLabel, WordFrequencyEntry,
};
pub use filter::{FilterCriteria, ViewScope, DEFAULT_LISTING_LIMIT, MAX_LISTING_LIMIT};
pub use listing::{LatLng, ListingRecord, RoomType};
