use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate counters computed by the backend. Read-only snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankStats {
    pub total_banks: u64,
    pub processed_banks: u64,
    pub completion_percentage: f64,
}

/// Response of the one-time resumability probe.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumableInfo {
    pub resumable: bool,
    pub total: u64,
    pub processed: u64,
}

/// Partial URL-collection payload. Absent keys stay `None` and leave the
/// local field untouched; unknown keys are dropped at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlStatusUpdate {
    pub is_running: Option<bool>,
    pub total_countries: Option<u64>,
    pub processed_countries: Option<u64>,
    pub current_country: Option<String>,
    pub collected_urls: Option<u64>,
    pub failed_countries: Option<Vec<String>>,
}

/// Full scraping progress payload. Every field defaults on absence, so a key
/// missing from the payload overwrites the local value with the default.
/// Server-supplied `rate`/`eta` keys, if any, are dropped here. `resumable`
/// is seeded by the startup probe and never carried by this payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScrapingProgress {
    pub is_running: bool,
    pub total_banks: u64,
    pub processed_banks: u64,
    pub processed_bins: u64,
    pub current_bank: String,
    pub completion_percentage: f64,
    pub failed_urls: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}

/// JSON body of the scraping start request.
#[derive(Debug, Clone, Serialize)]
pub struct StartScrapingRequest {
    pub resume: bool,
}

/// Search filters. Empty fields are omitted from the request.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub bin: String,
    pub bank: String,
    pub country: String,
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.bin.is_empty() {
            params.push(("bin_prefix", self.bin.clone()));
        }
        if !self.bank.is_empty() {
            params.push(("bank", self.bank.clone()));
        }
        if !self.country.is_empty() {
            params.push(("country", self.country.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// One matched bank identifier record. Opaque passthrough from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinRecord {
    pub bin: String,
    pub country: String,
    pub bank: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resumable_info_deserialization() {
        let json = r#"{
            "resumable": true,
            "total": 500,
            "processed": 120,
            "remaining": 380
        }"#;

        let info: ResumableInfo = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(info.resumable);
        assert_eq!(info.total, 500);
        assert_eq!(info.processed, 120);
    }

    #[test]
    fn test_bank_stats_ignores_unknown_fields() {
        let json = r#"{
            "total_banks": 200,
            "processed_banks": 50,
            "completion_percentage": 25.0,
            "scraping_status": {"is_running": true}
        }"#;

        let stats: BankStats = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(stats.total_banks, 200);
        assert_eq!(stats.processed_banks, 50);
        assert_eq!(stats.completion_percentage, 25.0);
    }

    #[test]
    fn test_url_status_update_partial_payload() {
        let json = r#"{
            "is_running": true,
            "collected_urls": 42,
            "not_a_known_key": 3
        }"#;

        let update: UrlStatusUpdate = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(update.is_running, Some(true));
        assert_eq!(update.collected_urls, Some(42));
        assert_eq!(update.current_country, None);
        assert_eq!(update.failed_countries, None);
    }

    #[test]
    fn test_scraping_progress_defaults_missing_fields() {
        let json = r#"{
            "is_running": true,
            "total_banks": 500,
            "processed_banks": 100,
            "rate": "999.9",
            "eta": "1h"
        }"#;

        let progress: ScrapingProgress = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(progress.is_running);
        assert_eq!(progress.total_banks, 500);
        assert_eq!(progress.current_bank, "");
        assert_eq!(progress.start_time, None);
        assert!(progress.failed_urls.is_empty());
    }

    #[test]
    fn test_scraping_progress_parses_timestamps() {
        let json = r#"{
            "is_running": true,
            "start_time": "2025-01-01T12:00:00Z",
            "last_update": "2025-01-01T12:05:30Z"
        }"#;

        let progress: ScrapingProgress = serde_json::from_str(json).expect("Failed to deserialize");
        let start = progress.start_time.expect("start_time missing");
        let update = progress.last_update.expect("last_update missing");
        assert_eq!((update - start).num_seconds(), 330);
    }

    #[test]
    fn test_start_scraping_request_serialization() {
        let request = StartScrapingRequest { resume: true };

        let serialized = serde_json::to_string(&request).expect("Failed to serialize");
        assert_eq!(serialized, r#"{"resume":true}"#);
    }

    #[test]
    fn test_search_query_skips_empty_filters() {
        let query = SearchQuery {
            bin: "411".to_string(),
            bank: String::new(),
            country: "France".to_string(),
            limit: None,
        };

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("bin_prefix", "411".to_string()),
                ("country", "France".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_query_includes_limit() {
        let query = SearchQuery {
            limit: Some(10),
            ..Default::default()
        };

        assert_eq!(query.to_params(), vec![("limit", "10".to_string())]);
    }

    #[test]
    fn test_bin_record_deserialization() {
        let json = r#"{
            "bin": "411111",
            "country": "France",
            "bank": "BNP Paribas",
            "brand": "Visa",
            "type": "debit",
            "level": "classic"
        }"#;

        let record: BinRecord = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(record.bin, "411111");
        assert_eq!(record.card_type, "debit");
    }
}
