use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use super::PanelSurface;
use crate::api::Catalog;
use crate::charts::{ChartHandle, ChartKind, ChartSpec, ChartSurface};
use crate::dashboard::QuickSummary;
use crate::map::{Bounds, Marker, MapSurface, MarkerId};
use crate::models::{HostAggregate, LatLng};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    AddMarker { id: MarkerId, listing_id: String },
    RemoveMarker { id: MarkerId },
    SetView { center: LatLng, zoom: u8 },
    FitBounds { bounds: Bounds, padding_px: u32, max_zoom: u8 },
}

#[derive(Default)]
struct MapLog {
    live: Vec<(MarkerId, Marker)>,
    calls: Vec<MapCall>,
}

/// Map surface that keeps every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingMap {
    log: Arc<Mutex<MapLog>>,
}

impl RecordingMap {
    pub fn live_markers(&self) -> Vec<Marker> {
        lock(&self.log).live.iter().map(|(_, marker)| marker.clone()).collect()
    }

    pub fn calls(&self) -> Vec<MapCall> {
        lock(&self.log).calls.clone()
    }

    pub fn last_view_call(&self) -> Option<MapCall> {
        lock(&self.log)
            .calls
            .iter()
            .rev()
            .find(|call| matches!(call, MapCall::SetView { .. } | MapCall::FitBounds { .. }))
            .cloned()
    }
}

impl MapSurface for RecordingMap {
    fn add_marker(&mut self, marker: &Marker) -> MarkerId {
        let id = Uuid::new_v4();
        let mut log = lock(&self.log);
        log.live.push((id, marker.clone()));
        log.calls.push(MapCall::AddMarker {
            id,
            listing_id: marker.listing_id.clone(),
        });
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        let mut log = lock(&self.log);
        log.live.retain(|(live_id, _)| *live_id != id);
        log.calls.push(MapCall::RemoveMarker { id });
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        lock(&self.log).calls.push(MapCall::SetView { center, zoom });
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32, max_zoom: u8) {
        lock(&self.log).calls.push(MapCall::FitBounds {
            bounds,
            padding_px,
            max_zoom,
        });
    }
}

#[derive(Default)]
struct ChartLog {
    live: HashMap<ChartHandle, ChartSpec>,
    created: Vec<ChartSpec>,
    disposed: Vec<ChartHandle>,
}

#[derive(Clone, Default)]
pub struct RecordingCharts {
    log: Arc<Mutex<ChartLog>>,
}

impl RecordingCharts {
    pub fn live_count(&self) -> usize {
        lock(&self.log).live.len()
    }

    pub fn disposed(&self) -> Vec<ChartHandle> {
        lock(&self.log).disposed.clone()
    }

    pub fn created(&self) -> Vec<ChartSpec> {
        lock(&self.log).created.clone()
    }

    /// The chart currently on screen for `kind`, if any.
    pub fn live_spec(&self, kind: ChartKind) -> Option<ChartSpec> {
        lock(&self.log)
            .live
            .values()
            .find(|spec| spec.kind == kind)
            .cloned()
    }

    pub fn live_title(&self, kind: ChartKind) -> Option<String> {
        self.live_spec(kind).map(|spec| spec.title)
    }
}

impl ChartSurface for RecordingCharts {
    fn create_chart(&mut self, spec: &ChartSpec) -> ChartHandle {
        let handle = Uuid::new_v4();
        let mut log = lock(&self.log);
        log.live.insert(handle, spec.clone());
        log.created.push(spec.clone());
        handle
    }

    fn dispose_chart(&mut self, handle: ChartHandle) {
        let mut log = lock(&self.log);
        log.live.remove(&handle);
        log.disposed.push(handle);
    }
}

#[derive(Default)]
struct PanelLog {
    catalogs: Vec<Catalog>,
    summaries: Vec<QuickSummary>,
    hosts: Vec<Vec<HostAggregate>>,
    notices: Vec<String>,
}

#[derive(Clone, Default)]
pub struct RecordingPanel {
    log: Arc<Mutex<PanelLog>>,
}

impl RecordingPanel {
    pub fn catalogs(&self) -> Vec<Catalog> {
        lock(&self.log).catalogs.clone()
    }

    pub fn summaries(&self) -> Vec<QuickSummary> {
        lock(&self.log).summaries.clone()
    }

    pub fn last_summary(&self) -> Option<QuickSummary> {
        lock(&self.log).summaries.last().cloned()
    }

    pub fn last_hosts(&self) -> Option<Vec<HostAggregate>> {
        lock(&self.log).hosts.last().cloned()
    }

    pub fn notices(&self) -> Vec<String> {
        lock(&self.log).notices.clone()
    }
}

impl PanelSurface for RecordingPanel {
    fn show_catalog(&mut self, catalog: &Catalog) {
        lock(&self.log).catalogs.push(catalog.clone());
    }

    fn show_summary(&mut self, summary: &QuickSummary) {
        lock(&self.log).summaries.push(summary.clone());
    }

    fn show_hosts(&mut self, hosts: &[HostAggregate]) {
        lock(&self.log).hosts.push(hosts.to_vec());
    }

    fn notify(&mut self, message: &str) {
        lock(&self.log).notices.push(message.to_string());
    }
}
