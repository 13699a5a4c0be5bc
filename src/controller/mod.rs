use crate::client::types::{BinRecord, SearchQuery};
use crate::client::ApiClient;
use crate::error::DashboardError;
use crate::poller::{PollerState, StatusPoller};
use crate::status::{DashboardStatus, StatusCell};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Configuration for the dashboard client
#[derive(Clone)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: crate::DEFAULT_API_BASE_URL.to_string(),
            poll_interval: Duration::from_millis(crate::DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Facade over the pipeline backend: a one-time resumability probe at
/// attach, idempotent job control, search passthrough and status
/// subscription for UI consumers.
///
/// Control operations never flip the local `is_running` flags - the next
/// poll cycle is the sole source of truth, so issuing "start" while already
/// running (or "stop" while stopped) cannot corrupt local state.
pub struct DashboardController {
    client: Arc<ApiClient>,
    status: Arc<StatusCell>,
    poller: Arc<StatusPoller>,
}

impl DashboardController {
    /// Attach to the backend: probe resumability once, then start polling.
    pub async fn attach(config: DashboardConfig) -> Self {
        let client = Arc::new(ApiClient::new(config.api_base_url));
        let status = Arc::new(StatusCell::new());
        let poller = Arc::new(StatusPoller::new(
            client.clone(),
            status.clone(),
            config.poll_interval,
        ));

        let controller = Self {
            client,
            status,
            poller,
        };
        controller.probe_resumability().await;
        controller.poller.start();
        controller
    }

    /// One-shot startup probe seeding the resumable flag and bank totals.
    /// Failure is a definitive "not resumable": never offer to resume on an
    /// indeterminate backend state. Not retried.
    async fn probe_resumability(&self) {
        match self.client.check_resumable().await {
            Ok(info) => {
                self.status.apply(|dashboard| {
                    dashboard.scraping.resumable = info.resumable;
                    dashboard.scraping.total_banks = info.total;
                    dashboard.scraping.processed_banks = info.processed;
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "resumability probe failed");
                self.status
                    .apply(|dashboard| dashboard.scraping.resumable = false);
            }
        }
    }

    /// Start URL collection when stopped, stop it when running.
    pub async fn toggle_url_collection(&self) {
        let running = self.status.snapshot().url_collection.is_running;
        let result = if running {
            self.client.stop_url_collection().await
        } else {
            self.client.start_url_collection().await
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, "URL collection toggle request failed");
        }
        self.poller.poke();
    }

    /// Start scraping, optionally resuming from saved progress.
    pub async fn start_scraping(&self, resume: bool) {
        if let Err(err) = self.client.start_scraping(resume).await {
            tracing::warn!(error = %err, "scraping start request failed");
        }
        self.poller.poke();
    }

    /// Stop scraping when running, otherwise start a fresh run. Resuming is
    /// an explicit action via [`Self::start_scraping`], never inferred from
    /// a toggle.
    pub async fn toggle_scraping(&self) {
        if self.status.snapshot().scraping.is_running {
            if let Err(err) = self.client.stop_scraping().await {
                tracing::warn!(error = %err, "scraping stop request failed");
            }
            self.poller.poke();
        } else {
            self.start_scraping(false).await;
        }
    }

    /// Clear the backend's saved scraping progress.
    pub async fn reset_scraping_state(&self) {
        if let Err(err) = self.client.reset_scraping().await {
            tracing::warn!(error = %err, "scraping state reset request failed");
        }
        self.poller.poke();
    }

    /// Search stored bank identifier records.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<BinRecord>, DashboardError> {
        self.client.search(query).await
    }

    /// Latest reconciled status snapshot.
    pub fn status(&self) -> DashboardStatus {
        self.status.snapshot()
    }

    /// Subscribe to status changes.
    pub fn subscribe(&self) -> watch::Receiver<DashboardStatus> {
        self.status.subscribe()
    }

    /// Current poll driver state.
    pub fn poller_state(&self) -> PollerState {
        self.poller.state()
    }

    /// Tear down the poll driver.
    pub fn shutdown(&self) {
        self.poller.shutdown();
    }
}
