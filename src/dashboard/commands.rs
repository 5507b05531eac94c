use serde::{Deserialize, Serialize};
use tokio::{sync::mpsc, task::JoinSet};
use tokio_util::sync::CancellationToken;

use super::{DashboardController, RefreshOutcome};
use crate::models::{FilterCriteria, SentimentLabel};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// The operations the presentation layer may trigger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum DashboardCommand {
    ApplyFilter {
        #[serde(default)]
        criteria: FilterCriteria,
    },
    ResetFilter,
    SelectNeighbourhood {
        #[serde(default)]
        neighbourhood: Option<String>,
    },
    SelectWordCloudSentiment {
        sentiment: SentimentLabel,
    },
}

impl DashboardCommand {
    pub async fn execute(self, controller: &DashboardController) -> RefreshOutcome {
        match self {
            DashboardCommand::ApplyFilter { criteria } => controller.apply_filter(criteria).await,
            DashboardCommand::ResetFilter => controller.reset_filter().await,
            DashboardCommand::SelectNeighbourhood { neighbourhood } => {
                controller.select_neighbourhood(neighbourhood).await
            }
            DashboardCommand::SelectWordCloudSentiment { sentiment } => {
                controller.select_word_cloud_sentiment(sentiment).await
            }
        }
    }
}

/// Runs every received command on its own task so a later command can
/// overtake a slow one; the controller's epochs decide which result shows.
///
/// Returns once the sender side is dropped and in-flight commands finish, or
/// immediately when `cancel_token` fires.
pub async fn dispatch_loop(
    controller: DashboardController,
    mut commands: mpsc::Receiver<DashboardCommand>,
    cancel_token: CancellationToken,
) {
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            received = commands.recv() => {
                let Some(command) = received else {
                    break;
                };
                log_debug!("Dispatching {:?}", command);
                let controller = controller.clone();
                in_flight.spawn(async move { command.execute(&controller).await });
            }
            Some(finished) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(err) = finished {
                    log_warn!("dashboard command task failed: {err}");
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("command loop shutting down");
                in_flight.abort_all();
                return;
            }
        }
    }

    while let Some(finished) = in_flight.join_next().await {
        if let Err(err) = finished {
            log_warn!("dashboard command task failed: {err}");
        }
    }
    log_info!("command channel closed");
}
