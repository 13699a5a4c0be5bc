pub mod estimate;
pub mod merge;

use crate::client::types::BankStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Live status of the per-country URL discovery job.
///
/// Created all-zero at attach and only ever updated through the partial
/// merge in [`merge::merge_url_status`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlCollectionStatus {
    pub is_running: bool,
    pub total_countries: u64,
    pub processed_countries: u64,
    pub current_country: String,
    pub collected_urls: u64,
    pub failed_countries: Vec<String>,
}

/// Live status of the per-bank scraping job.
///
/// `resumable`, `total_banks` and `processed_banks` are seeded once by the
/// startup probe; every poll tick replaces all fields wholesale and then
/// recomputes `rate` and `eta` locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingStatus {
    pub is_running: bool,
    pub resumable: bool,
    pub total_banks: u64,
    pub processed_banks: u64,
    pub processed_bins: u64,
    pub current_bank: String,
    pub completion_percentage: f64,
    pub failed_urls: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
    /// Banks per minute, derived locally. Never trusted from the server.
    pub rate: String,
    /// Estimated time remaining, derived locally. Never trusted from the server.
    pub eta: String,
}

impl Default for ScrapingStatus {
    fn default() -> Self {
        Self {
            is_running: false,
            resumable: false,
            total_banks: 0,
            processed_banks: 0,
            processed_bins: 0,
            current_bank: String::new(),
            completion_percentage: 0.0,
            failed_urls: Vec::new(),
            start_time: None,
            last_update: None,
            rate: "0".to_string(),
            eta: estimate::CALCULATING.to_string(),
        }
    }
}

/// The complete reconciled dashboard state.
///
/// The two subsystem statuses are independently owned and updated; neither
/// gates the other's polling or display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatus {
    pub stats: BankStats,
    pub url_collection: UrlCollectionStatus,
    pub scraping: ScrapingStatus,
}

/// Shared status cell with explicit change notification.
///
/// Mutation goes through [`StatusCell::apply`], which updates the state in
/// place and wakes every subscriber. Only the poll task and the attach-time
/// probe call it, so writes never interleave mid-cycle.
pub struct StatusCell {
    tx: watch::Sender<DashboardStatus>,
}

impl StatusCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DashboardStatus::default());
        Self { tx }
    }

    /// Subscribe to status changes. The receiver always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<DashboardStatus> {
        self.tx.subscribe()
    }

    /// Point-in-time copy of the current status.
    pub fn snapshot(&self) -> DashboardStatus {
        self.tx.borrow().clone()
    }

    /// Mutate the status in place and notify subscribers.
    pub(crate) fn apply(&self, update: impl FnOnce(&mut DashboardStatus)) {
        self.tx.send_modify(update);
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}
