use chrono::Month;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::round1;
use crate::models::{OccupancyPoint, OccupancySeries, OccupancySource};

/// Hand-tuned occupancy rates for January..December, peaking in August.
pub const SEASONAL_BASELINE: [f64; 12] = [
    58.0, 61.0, 66.0, 71.0, 76.0, 83.0, 89.0, 92.0, 81.0, 72.0, 64.0, 70.0,
];

/// Largest offset applied to a month when a neighbourhood is selected.
pub const MAX_PERTURBATION: f64 = 8.0;

/// Stand-in series used when the server has no calendar data.
///
/// Without a neighbourhood the baseline is returned unchanged. With one, each
/// month is shifted by up to ±`MAX_PERTURBATION`, drawn from an RNG seeded by
/// the neighbourhood name, so the same name always yields the same curve.
pub fn synthetic_occupancy(neighbourhood: Option<&str>) -> OccupancySeries {
    let mut rng = neighbourhood
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| StdRng::seed_from_u64(stable_seed(name)));

    let points = SEASONAL_BASELINE
        .iter()
        .enumerate()
        .map(|(index, baseline)| {
            let offset = rng
                .as_mut()
                .map(|rng| rng.gen_range(-MAX_PERTURBATION..=MAX_PERTURBATION))
                .unwrap_or(0.0);

            OccupancyPoint {
                month: month_label(index),
                rate: round1((baseline + offset).clamp(0.0, 100.0)),
            }
        })
        .collect();

    OccupancySeries {
        source: OccupancySource::Synthetic,
        points,
    }
}

fn month_label(index: usize) -> String {
    Month::try_from(index as u8 + 1)
        .map(|month| month.name()[..3].to_string())
        .unwrap_or_else(|_| format!("M{}", index + 1))
}

/// FNV-1a; `DefaultHasher` output is not guaranteed across Rust releases.
fn stable_seed(name: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    name.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}
