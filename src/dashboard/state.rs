use serde::Serialize;

use crate::api::Catalog;
use crate::models::{FilterCriteria, HostAggregate, ListingRecord, SentimentLabel, ViewScope};

/// Headline figures shown above the charts.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickSummary {
    pub listing_count: usize,
    pub average_price: f64,
    pub positive_percentage: f64,
    pub scope: ViewScope,
}

/// Everything the controller owns between filter events.
///
/// `issued_epoch` is bumped when a refresh starts; `committed_epoch` is the
/// refresh whose record set is currently on screen. A refresh may only write
/// here while its epoch is still the issued one.
///
/// `requested_criteria` belongs to the issued epoch and `criteria` to the
/// committed one. Partial edits build on the requested value so a pending
/// filter is never lost.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub issued_epoch: u64,
    pub committed_epoch: u64,
    pub word_epoch: u64,
    pub requested_criteria: FilterCriteria,
    pub criteria: FilterCriteria,
    pub scope: ViewScope,
    pub listings: Vec<ListingRecord>,
    pub word_sentiment: SentimentLabel,
    pub summary: Option<QuickSummary>,
    pub hosts: Vec<HostAggregate>,
    pub catalog: Catalog,
    pub notice: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_epoch(&mut self, criteria: FilterCriteria) -> u64 {
        self.requested_criteria = criteria;
        self.issued_epoch += 1;
        self.issued_epoch
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.issued_epoch == epoch
    }

    /// True while a started refresh has not yet replaced the record set.
    pub fn refresh_pending(&self) -> bool {
        self.committed_epoch != self.issued_epoch
    }

    pub fn begin_word_epoch(&mut self) -> u64 {
        self.word_epoch += 1;
        self.word_epoch
    }

    pub fn commit(
        &mut self,
        epoch: u64,
        criteria: FilterCriteria,
        listings: Vec<ListingRecord>,
        summary: QuickSummary,
    ) {
        self.committed_epoch = epoch;
        self.scope = criteria.scope();
        self.criteria = criteria;
        self.listings = listings;
        self.summary = Some(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_epoch_supersedes_older() {
        let mut state = DashboardState::new();
        let first = state.begin_epoch(FilterCriteria::for_neighbourhood("Camden"));
        let second = state.begin_epoch(FilterCriteria::for_neighbourhood("Hackney"));

        assert!(!state.is_current(first));
        assert!(state.is_current(second));
        assert!(state.refresh_pending());
        assert_eq!(
            state.requested_criteria.scope(),
            ViewScope::Scoped("Hackney".into())
        );
        assert_eq!(state.criteria, FilterCriteria::default());
    }

    #[test]
    fn commit_records_scope_from_criteria() {
        let mut state = DashboardState::new();
        let criteria = FilterCriteria::for_neighbourhood("Camden");
        let epoch = state.begin_epoch(criteria.clone());
        state.commit(
            epoch,
            criteria.clone(),
            Vec::new(),
            QuickSummary {
                listing_count: 0,
                average_price: 0.0,
                positive_percentage: 0.0,
                scope: criteria.scope(),
            },
        );

        assert_eq!(state.scope, ViewScope::Scoped("Camden".into()));
        assert!(!state.refresh_pending());
    }
}
