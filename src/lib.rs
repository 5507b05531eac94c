pub mod aggregation;
pub mod api;
pub mod charts;
pub mod dashboard;
pub mod map;
pub mod models;
pub mod presentation;
pub mod settings;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;

use api::{DataFacade, HttpDataSource};
use dashboard::{dispatch_loop, DashboardCommand, DashboardController, Surfaces};
use presentation::EventEmitter;
use settings::{DashboardSettings, SettingsStore};
use utils::logging::init_logging;

const ENABLE_LOGS: bool = true;

const COMMAND_BUFFER: usize = 32;

/// Reads one JSON command per stdin line and writes one JSON event per
/// surface call to stdout until stdin closes or the process is interrupted.
pub fn run() -> Result<()> {
    init_logging();
    log_info!("InnSight dashboard starting up...");

    let store = SettingsStore::from_env().context("failed to load dashboard settings")?;
    if let Some(path) = store.path() {
        log_info!("Using settings file {}", path.display());
    }

    // One thread: fetches interleave, aggregation and drawing never run in parallel.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(serve(store.settings()))
}

async fn serve(settings: DashboardSettings) -> Result<()> {
    let source = HttpDataSource::new(&settings).context("failed to build data service client")?;
    log_info!(
        "Serving city '{}' from {}",
        settings.city,
        settings.api_base_url
    );

    let emitter = EventEmitter::stdout();
    let controller = DashboardController::new(
        DataFacade::new(Arc::new(source)),
        settings,
        Surfaces {
            map: Box::new(emitter.clone()),
            charts: Box::new(emitter.clone()),
            panel: Box::new(emitter),
        },
    );

    let outcome = controller.initialize().await;
    log_info!("Initial load finished: {:?}", outcome);

    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let cancel_token = CancellationToken::new();
    let worker = tokio::spawn(dispatch_loop(controller, rx, cancel_token.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command from stdin")? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<DashboardCommand>(line) {
                    Ok(command) => {
                        if tx.send(command).await.is_err() {
                            log_warn!("command loop stopped, dropping remaining input");
                            break;
                        }
                    }
                    Err(err) => log_warn!("Ignoring malformed command {line:?}: {err}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log_info!("Interrupted, shutting down");
                cancel_token.cancel();
                break;
            }
        }
    }

    drop(tx);
    worker.await.context("command loop panicked")?;
    log_info!("InnSight dashboard stopped");
    Ok(())
}
