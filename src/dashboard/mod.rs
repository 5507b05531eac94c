pub mod commands;
pub mod controller;
pub mod state;
#[cfg(test)]
pub mod testing;

pub use commands::{dispatch_loop, DashboardCommand};
pub use controller::{DashboardController, DashboardSnapshot, RefreshOutcome, Surfaces};
pub use state::{DashboardState, QuickSummary};
