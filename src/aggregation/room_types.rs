use std::collections::HashMap;

use super::percentage;
use crate::models::{ListingRecord, RoomTypeAggregate};

/// Groups the supplied records by room-type label. Percentages are relative to
/// `records.len()`, not to the city total. Groups come back largest first,
/// ties in first-seen order.
pub fn room_type_distribution(records: &[ListingRecord]) -> Vec<RoomTypeAggregate> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<&'static str> = Vec::new();
    let mut counts: HashMap<&'static str, u64> = HashMap::new();

    for record in records {
        let label = record.room_type.as_str();
        let count = counts.entry(label).or_insert_with(|| {
            order.push(label);
            0
        });
        *count += 1;
    }

    let total = records.len() as u64;
    let mut groups: Vec<RoomTypeAggregate> = order
        .into_iter()
        .map(|label| {
            let count = counts[label];
            RoomTypeAggregate {
                label: label.to_string(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
