//! # BIN Dashboard Client
//!
//! Client-side control and observability layer for the BIN scraping pipeline.
//!
//! ## Features
//!
//! - REST client for the pipeline backend (status, control, search)
//! - Status polling every 1 second with concurrent per-resource fetches
//! - Partial-merge reconciliation for URL collection, full-merge for scraping
//! - Locally derived throughput rate and ETA (server values never trusted)
//! - Idempotent start/stop/resume job control with resumability probing
//! - Watch-based status subscription for UI consumers

pub mod client;
pub mod status;
pub mod poller;
pub mod controller;
pub mod error;

pub use client::types::{BankStats, BinRecord, SearchQuery};
pub use client::ApiClient;
pub use controller::{DashboardConfig, DashboardController};
pub use error::DashboardError;
pub use poller::PollerState;
pub use status::{DashboardStatus, ScrapingStatus, UrlCollectionStatus};

/// Default dashboard API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Default status poll period in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
