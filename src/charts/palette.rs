use crate::models::{SentimentLabel, ViewScope};

/// Single colour used for every element of a neighbourhood-scoped chart.
pub const HIGHLIGHT: &str = "#FF5A5F";

/// Fixed palette for city-wide charts, cycled when a chart has more items.
pub const PALETTE: [&str; 10] = [
    "#FF5A5F", "#00A699", "#FC642D", "#484848", "#767676", "#3498db", "#9b59b6", "#2ecc71",
    "#f1c40f", "#e67e22",
];

pub fn sentiment_color(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "#2ecc71",
        SentimentLabel::Neutral => "#f1c40f",
        SentimentLabel::Negative => "#e74c3c",
    }
}

/// Colours for `count` chart items. Depends only on the scope, never on the data.
pub fn series_colors(scope: &ViewScope, count: usize) -> Vec<String> {
    (0..count)
        .map(|index| match scope {
            ViewScope::Scoped(_) => HIGHLIGHT.to_string(),
            ViewScope::Unscoped => PALETTE[index % PALETTE.len()].to_string(),
        })
        .collect()
}

pub fn line_color(scope: &ViewScope) -> &'static str {
    match scope {
        ViewScope::Scoped(_) => HIGHLIGHT,
        ViewScope::Unscoped => PALETTE[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_view_uses_one_colour() {
        let colors = series_colors(&ViewScope::Scoped("Camden".into()), 4);
        assert!(colors.iter().all(|c| c == HIGHLIGHT));
    }

    #[test]
    fn unscoped_palette_cycles() {
        let colors = series_colors(&ViewScope::Unscoped, 12);
        assert_eq!(colors[0], PALETTE[0]);
        assert_eq!(colors[10], PALETTE[0]);
        assert_eq!(colors[11], PALETTE[1]);
    }
}
