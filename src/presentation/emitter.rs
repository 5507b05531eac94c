use std::io::Write;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use uuid::Uuid;

use super::PanelSurface;
use crate::api::Catalog;
use crate::charts::{ChartHandle, ChartSpec, ChartSurface};
use crate::dashboard::QuickSummary;
use crate::map::{Bounds, Marker, MapSurface, MarkerId};
use crate::models::{HostAggregate, LatLng};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

#[derive(Serialize)]
struct EventLine<'a, T: Serialize> {
    event: &'a str,
    payload: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerAddedEvent<'a> {
    id: MarkerId,
    marker: &'a Marker,
    popup_html: String,
}

#[derive(Serialize)]
struct HandleEvent {
    id: Uuid,
}

#[derive(Serialize)]
struct ViewSetEvent {
    center: LatLng,
    zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoundsFittedEvent {
    bounds: Bounds,
    padding_px: u32,
    max_zoom: u8,
}

#[derive(Serialize)]
struct ChartCreatedEvent<'a> {
    id: ChartHandle,
    spec: &'a ChartSpec,
}

#[derive(Serialize)]
struct NotificationEvent<'a> {
    message: &'a str,
}

/// Writes every surface call as one JSON line (`{"event", "payload"}`) so a
/// front end on the other side of a pipe can replay it. Clones share the
/// writer, so one emitter can back the map, the charts and the panel.
#[derive(Clone)]
pub struct EventEmitter {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl EventEmitter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn emit<T: Serialize>(&self, event: &str, payload: T) {
        let line = match serde_json::to_string(&EventLine { event, payload }) {
            Ok(line) => line,
            Err(err) => {
                log_warn!("failed to serialise {event} event: {err}");
                return;
            }
        };

        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let written = writeln!(out, "{line}");
        if let Err(err) = written.and_then(|()| out.flush()) {
            log_warn!("failed to emit {event}: {err}");
        }
    }
}

impl MapSurface for EventEmitter {
    fn add_marker(&mut self, marker: &Marker) -> MarkerId {
        let id = Uuid::new_v4();
        self.emit(
            "marker-added",
            MarkerAddedEvent {
                id,
                marker,
                popup_html: marker.popup.to_html(),
            },
        );
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.emit("marker-removed", HandleEvent { id });
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.emit("view-set", ViewSetEvent { center, zoom });
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32, max_zoom: u8) {
        self.emit(
            "bounds-fitted",
            BoundsFittedEvent {
                bounds,
                padding_px,
                max_zoom,
            },
        );
    }
}

impl ChartSurface for EventEmitter {
    fn create_chart(&mut self, spec: &ChartSpec) -> ChartHandle {
        let id = Uuid::new_v4();
        self.emit("chart-created", ChartCreatedEvent { id, spec });
        id
    }

    fn dispose_chart(&mut self, handle: ChartHandle) {
        self.emit("chart-disposed", HandleEvent { id: handle });
    }
}

impl PanelSurface for EventEmitter {
    fn show_catalog(&mut self, catalog: &Catalog) {
        self.emit("catalog-loaded", catalog);
    }

    fn show_summary(&mut self, summary: &QuickSummary) {
        self.emit("summary-updated", summary);
    }

    fn show_hosts(&mut self, hosts: &[HostAggregate]) {
        self.emit("hosts-updated", hosts);
    }

    fn notify(&mut self, message: &str) {
        self.emit("notification", NotificationEvent { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViewScope;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    #[test]
    fn each_call_is_one_json_line() {
        let buffer = SharedBuffer::default();
        let mut emitter = EventEmitter::new(Box::new(buffer.clone()));

        emitter.set_view(LatLng { lat: 51.5, lng: -0.12 }, 11);
        emitter.notify("Could not load listings");
        emitter.show_summary(&QuickSummary {
            listing_count: 2,
            average_price: 120.0,
            positive_percentage: 80.0,
            scope: ViewScope::Unscoped,
        });

        let lines = buffer.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["event"], "view-set");
        assert_eq!(lines[0]["payload"]["zoom"], 11);
        assert_eq!(lines[1]["payload"]["message"], "Could not load listings");
        assert_eq!(lines[2]["event"], "summary-updated");
        assert_eq!(lines[2]["payload"]["positivePercentage"], 80.0);
    }

    #[test]
    fn handles_are_unique_per_call() {
        let buffer = SharedBuffer::default();
        let mut emitter = EventEmitter::new(Box::new(buffer.clone()));
        let spec = ChartSpec {
            kind: crate::charts::ChartKind::Sentiment,
            title: "Review Sentiment (City-wide)".into(),
            body: crate::charts::ChartBody::NoData {
                message: "none".into(),
            },
        };

        let first = emitter.create_chart(&spec);
        let second = emitter.create_chart(&spec);
        emitter.dispose_chart(first);

        assert_ne!(first, second);
        let lines = buffer.lines();
        assert_eq!(lines[0]["payload"]["spec"]["title"], "Review Sentiment (City-wide)");
        assert_eq!(lines[2]["event"], "chart-disposed");
        assert_eq!(lines[2]["payload"]["id"], first.to_string());
    }
}
