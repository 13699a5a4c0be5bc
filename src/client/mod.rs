pub mod types;

use crate::error::DashboardError;
use serde::de::DeserializeOwned;
use types::*;

/// REST client for the pipeline backend's dashboard API
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http_client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let response = self.http_client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| DashboardError::BackendUnavailable(format!("Failed to connect: {}", e)))?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn post(&self, path: &str) -> Result<(), DashboardError> {
        self.http_client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| DashboardError::BackendUnavailable(format!("Failed to connect: {}", e)))?
            .error_for_status()?;

        Ok(())
    }

    /// Check whether an interrupted scraping job can be resumed
    pub async fn check_resumable(&self) -> Result<ResumableInfo, DashboardError> {
        self.get_json("/scraping/resumable").await
    }

    /// Get aggregate bank statistics
    pub async fn get_stats(&self) -> Result<BankStats, DashboardError> {
        self.get_json("/stats").await
    }

    /// Get URL-collection status - the backend may send a partial payload
    pub async fn get_url_status(&self) -> Result<UrlStatusUpdate, DashboardError> {
        self.get_json("/urls/status").await
    }

    /// Get the full scraping progress payload
    pub async fn get_scraping_progress(&self) -> Result<ScrapingProgress, DashboardError> {
        self.get_json("/scraping/progress").await
    }

    /// Start URL collection
    pub async fn start_url_collection(&self) -> Result<(), DashboardError> {
        self.post("/urls/collect/start").await
    }

    /// Stop URL collection
    pub async fn stop_url_collection(&self) -> Result<(), DashboardError> {
        self.post("/urls/collect/stop").await
    }

    /// Start scraping, optionally resuming from saved progress
    pub async fn start_scraping(&self, resume: bool) -> Result<(), DashboardError> {
        self.http_client
            .post(format!("{}/scraping/start", self.base_url))
            .json(&StartScrapingRequest { resume })
            .send()
            .await
            .map_err(|e| DashboardError::BackendUnavailable(format!("Failed to connect: {}", e)))?
            .error_for_status()?;

        Ok(())
    }

    /// Stop scraping
    pub async fn stop_scraping(&self) -> Result<(), DashboardError> {
        self.post("/scraping/stop").await
    }

    /// Reset the backend's saved scraping state
    pub async fn reset_scraping(&self) -> Result<(), DashboardError> {
        self.post("/scraping/reset").await
    }

    /// Search stored bank identifier records
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<BinRecord>, DashboardError> {
        let response = self.http_client
            .get(format!("{}/search", self.base_url))
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| DashboardError::BackendUnavailable(format!("Failed to connect: {}", e)))?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
