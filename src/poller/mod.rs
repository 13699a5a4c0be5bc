use crate::client::ApiClient;
use crate::error::DashboardError;
use crate::status::{merge, StatusCell};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Lifecycle of the poll driver. Terminal per activation cycle, restartable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
}

enum CycleOutcome {
    Active,
    AllIdle,
}

/// Periodic driver that fetches all live status resources concurrently,
/// feeds the status cell and stops itself once no subsystem is active.
pub struct StatusPoller {
    client: Arc<ApiClient>,
    status: Arc<StatusCell>,
    poll_interval: Duration,
    state: Arc<Mutex<PollerState>>,
    refresh: Arc<Notify>,
    shutdown: Arc<Notify>,
}

impl StatusPoller {
    pub fn new(client: Arc<ApiClient>, status: Arc<StatusCell>, poll_interval: Duration) -> Self {
        Self {
            client,
            status,
            poll_interval,
            state: Arc::new(Mutex::new(PollerState::Idle)),
            refresh: Arc::new(Notify::new()),
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn state(&self) -> PollerState {
        *self.state.lock().unwrap()
    }

    /// Start polling: one immediate fetch cycle, then one per interval.
    /// No-op when already polling.
    pub fn start(&self) {
        self.activate(false);
    }

    /// Ensure polling is active and force one fetch cycle outside the timer
    /// cadence, so control actions surface without waiting a full period.
    pub fn poke(&self) {
        self.activate(true);
    }

    fn activate(&self, force_refresh: bool) {
        let mut state = self.state.lock().unwrap();
        if *state == PollerState::Polling {
            if force_refresh {
                self.refresh.notify_one();
            }
            return;
        }
        *state = PollerState::Polling;
        drop(state);

        // A freshly spawned task polls immediately, which covers any forced
        // refresh as well.
        self.spawn_poll_task();
    }

    fn spawn_poll_task(&self) {
        let client = self.client.clone();
        let status = self.status.clone();
        let state = self.state.clone();
        let refresh = self.refresh.clone();
        let shutdown = self.shutdown.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                let cycle = tokio::select! {
                    _ = ticker.tick() => Self::run_cycle(&client, &status).await,
                    _ = refresh.notified() => Self::run_cycle(&client, &status).await,
                    _ = shutdown.notified() => break,
                };

                match cycle {
                    Ok(CycleOutcome::AllIdle) => break,
                    Ok(CycleOutcome::Active) => {}
                    Err(err) => {
                        // Fail soft: skip this cycle, keep the timer armed.
                        tracing::warn!(error = %err, "status poll cycle failed");
                    }
                }
            }

            *state.lock().unwrap() = PollerState::Idle;
        });
    }

    /// One fetch-merge-evaluate pass. The three requests run concurrently;
    /// if any of them fails nothing is assigned. The URL partial merge is
    /// applied before the scraping full merge, within a single notification.
    async fn run_cycle(
        client: &Arc<ApiClient>,
        status: &Arc<StatusCell>,
    ) -> Result<CycleOutcome, DashboardError> {
        let (stats, url_update, progress) = tokio::try_join!(
            client.get_stats(),
            client.get_url_status(),
            client.get_scraping_progress(),
        )?;

        let now = Utc::now();
        let mut any_running = false;
        status.apply(|dashboard| {
            dashboard.stats = stats;
            merge::merge_url_status(&mut dashboard.url_collection, url_update);
            merge::merge_scraping_status(&mut dashboard.scraping, progress, now);
            any_running = dashboard.url_collection.is_running || dashboard.scraping.is_running;
        });

        if any_running {
            Ok(CycleOutcome::Active)
        } else {
            Ok(CycleOutcome::AllIdle)
        }
    }

    /// Explicit teardown. Releases the timer on the next select point.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.shutdown.notify_one();
    }
}
