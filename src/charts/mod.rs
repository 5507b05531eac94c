pub mod palette;
pub mod spec;
pub mod wordcloud;

pub use spec::{build_spec, chart_title, ChartBody, ChartDataset, ChartKind, ChartSpec};
pub use wordcloud::{scale_words, WordGlyph};

use std::collections::HashMap;
use uuid::Uuid;

use crate::models::ViewScope;

const ENABLE_LOGS: bool = true;

use crate::log_debug;

pub type ChartHandle = Uuid;

/// The chart-rendering library, seen from the dashboard.
pub trait ChartSurface: Send {
    fn create_chart(&mut self, spec: &ChartSpec) -> ChartHandle;
    fn dispose_chart(&mut self, handle: ChartHandle);
}

struct LiveChart {
    handle: ChartHandle,
    spec: ChartSpec,
}

/// Holds at most one live chart per `ChartKind`. Every redraw disposes the
/// previous instance of that kind before creating the new one.
pub struct ChartAdapter {
    surface: Box<dyn ChartSurface>,
    live: HashMap<ChartKind, LiveChart>,
}

impl ChartAdapter {
    pub fn new(surface: Box<dyn ChartSurface>) -> Self {
        Self {
            surface,
            live: HashMap::new(),
        }
    }

    pub fn draw(&mut self, dataset: &ChartDataset, scope: &ViewScope) -> ChartHandle {
        let spec = build_spec(dataset, scope);
        let kind = spec.kind;

        if let Some(previous) = self.live.remove(&kind) {
            self.surface.dispose_chart(previous.handle);
        }

        let handle = self.surface.create_chart(&spec);
        log_debug!("Drew {:?} chart '{}' as {}", kind, spec.title, handle);
        self.live.insert(kind, LiveChart { handle, spec });
        handle
    }

    pub fn spec(&self, kind: ChartKind) -> Option<&ChartSpec> {
        self.live.get(&kind).map(|chart| &chart.spec)
    }

    pub fn title(&self, kind: ChartKind) -> Option<&str> {
        self.spec(kind).map(|spec| spec.title.as_str())
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SentimentLabel, WordFrequencyEntry};
    use crate::presentation::recording::RecordingCharts;

    fn words(n: u64) -> ChartDataset {
        ChartDataset::WordFrequency {
            sentiment: SentimentLabel::Positive,
            words: (0..n)
                .map(|i| WordFrequencyEntry {
                    word: format!("w{i}"),
                    count: i + 1,
                })
                .collect(),
        }
    }

    #[test]
    fn redraw_disposes_previous_instance() {
        let surface = RecordingCharts::default();
        let mut adapter = ChartAdapter::new(Box::new(surface.clone()));

        let first = adapter.draw(&words(3), &ViewScope::Unscoped);
        let second = adapter.draw(&words(5), &ViewScope::Unscoped);

        assert_ne!(first, second);
        assert_eq!(adapter.live_count(), 1);
        assert_eq!(surface.disposed(), vec![first]);
        assert_eq!(surface.live_count(), 1);
        assert_eq!(
            surface.live_spec(ChartKind::WordFrequency).as_ref(),
            adapter.spec(ChartKind::WordFrequency)
        );
    }

    #[test]
    fn kinds_are_tracked_independently() {
        let surface = RecordingCharts::default();
        let mut adapter = ChartAdapter::new(Box::new(surface.clone()));

        adapter.draw(&words(2), &ViewScope::Unscoped);
        adapter.draw(&ChartDataset::RoomTypes(Vec::new()), &ViewScope::Unscoped);
        assert_eq!(adapter.live_count(), 2);
        assert!(surface.disposed().is_empty());
        assert_eq!(surface.live_count(), 2);
    }

    #[test]
    fn titles_follow_scope() {
        let surface = RecordingCharts::default();
        let mut adapter = ChartAdapter::new(Box::new(surface));

        adapter.draw(&words(1), &ViewScope::Scoped("Hackney".into()));
        assert_eq!(
            adapter.title(ChartKind::WordFrequency),
            Some("Common Words in Positive Reviews: Hackney")
        );

        adapter.draw(&words(1), &ViewScope::Unscoped);
        assert_eq!(
            adapter.title(ChartKind::WordFrequency),
            Some("Common Words in Positive Reviews")
        );
    }
}
