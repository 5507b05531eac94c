use serde::Serialize;

use crate::models::WordFrequencyEntry;

pub const MIN_FONT_PX: f64 = 12.0;
pub const MAX_FONT_PX: f64 = 48.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WordGlyph {
    pub word: String,
    pub count: u64,
    pub font_px: f64,
}

/// Linear emphasis: the most frequent word gets `MAX_FONT_PX`, a count of
/// zero gets `MIN_FONT_PX`.
pub fn scale_words(words: &[WordFrequencyEntry]) -> Vec<WordGlyph> {
    let max_count = words.iter().map(|entry| entry.count).max().unwrap_or(0);

    words
        .iter()
        .map(|entry| {
            let ratio = if max_count == 0 {
                0.0
            } else {
                entry.count as f64 / max_count as f64
            };
            WordGlyph {
                word: entry.word.clone(),
                count: entry.count,
                font_px: ((MIN_FONT_PX + ratio * (MAX_FONT_PX - MIN_FONT_PX)) * 10.0).round() / 10.0,
            }
        })
        .collect()
}
