//! Everything the dashboard draws goes through three surfaces: the map
//! (`crate::map::MapSurface`), the charts (`crate::charts::ChartSurface`) and
//! the side panel defined here.

pub mod emitter;
#[cfg(test)]
pub mod recording;

pub use emitter::EventEmitter;

use crate::api::Catalog;
use crate::dashboard::QuickSummary;
use crate::models::HostAggregate;

pub trait PanelSurface: Send {
    fn show_catalog(&mut self, catalog: &Catalog);
    fn show_summary(&mut self, summary: &QuickSummary);
    fn show_hosts(&mut self, hosts: &[HostAggregate]);
    /// User-visible message, used only when startup data could not be loaded.
    fn notify(&mut self, message: &str);
}
