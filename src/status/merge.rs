use super::estimate;
use super::{ScrapingStatus, UrlCollectionStatus};
use crate::client::types::{ScrapingProgress, UrlStatusUpdate};
use chrono::{DateTime, Utc};

/// Applies a partial URL-collection payload: only keys present in the
/// payload overwrite, every other field keeps its current value. Protects
/// the model from a partial or malformed payload wiping known fields.
pub fn merge_url_status(current: &mut UrlCollectionStatus, update: UrlStatusUpdate) {
    if let Some(is_running) = update.is_running {
        current.is_running = is_running;
    }
    if let Some(total_countries) = update.total_countries {
        current.total_countries = total_countries;
    }
    if let Some(processed_countries) = update.processed_countries {
        current.processed_countries = processed_countries;
    }
    if let Some(current_country) = update.current_country {
        current.current_country = current_country;
    }
    if let Some(collected_urls) = update.collected_urls {
        current.collected_urls = collected_urls;
    }
    if let Some(failed_countries) = update.failed_countries {
        current.failed_countries = failed_countries;
    }
}

/// Replaces every scraping field wholesale from the progress payload, then
/// recomputes `rate` and `eta` from the just-merged state. Derived values
/// the server may have sent never survive this merge. `resumable` is owned
/// by the startup probe and is left untouched.
pub fn merge_scraping_status(
    current: &mut ScrapingStatus,
    progress: ScrapingProgress,
    now: DateTime<Utc>,
) {
    current.is_running = progress.is_running;
    current.total_banks = progress.total_banks;
    current.processed_banks = progress.processed_banks;
    current.processed_bins = progress.processed_bins;
    current.current_bank = progress.current_bank;
    current.completion_percentage = progress.completion_percentage;
    current.failed_urls = progress.failed_urls;
    current.start_time = progress.start_time;
    current.last_update = progress.last_update;

    let derived = estimate::estimate(current, now);
    current.rate = derived.rate;
    current.eta = derived.eta;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_partial_merge_preserves_absent_fields() {
        let mut current = UrlCollectionStatus {
            is_running: true,
            current_country: "France".to_string(),
            collected_urls: 10,
            ..Default::default()
        };

        // Payload carries collected_urls and an unknown key, nothing else.
        let update: UrlStatusUpdate =
            serde_json::from_str(r#"{"collected_urls": 25, "unknown_key": 1}"#).unwrap();
        merge_url_status(&mut current, update);

        assert_eq!(current.collected_urls, 25);
        assert!(current.is_running);
        assert_eq!(current.current_country, "France");
    }

    #[test]
    fn test_partial_merge_overwrites_present_fields() {
        let mut current = UrlCollectionStatus {
            is_running: true,
            total_countries: 10,
            processed_countries: 3,
            ..Default::default()
        };

        merge_url_status(
            &mut current,
            UrlStatusUpdate {
                is_running: Some(false),
                processed_countries: Some(10),
                failed_countries: Some(vec!["Narnia".to_string()]),
                ..Default::default()
            },
        );

        assert!(!current.is_running);
        assert_eq!(current.processed_countries, 10);
        assert_eq!(current.total_countries, 10);
        assert_eq!(current.failed_countries, vec!["Narnia".to_string()]);
    }

    #[test]
    fn test_full_merge_recomputes_derived_fields() {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let now = start + chrono::Duration::seconds(60);

        let mut current = ScrapingStatus {
            rate: "stale".to_string(),
            eta: "stale".to_string(),
            ..Default::default()
        };

        let progress: ScrapingProgress = serde_json::from_value(serde_json::json!({
            "is_running": true,
            "total_banks": 500,
            "processed_banks": 100,
            "start_time": start.to_rfc3339(),
            "rate": "server-says-9000",
            "eta": "server-says-never"
        }))
        .unwrap();
        merge_scraping_status(&mut current, progress, now);

        assert_eq!(current.rate, "100.0");
        assert_eq!(current.eta, "4m");
    }

    #[test]
    fn test_full_merge_overwrites_with_defaults_on_absence() {
        let mut current = ScrapingStatus {
            current_bank: "BNP Paribas".to_string(),
            processed_bins: 999,
            failed_urls: vec!["http://example.com".to_string()],
            ..Default::default()
        };

        let progress: ScrapingProgress =
            serde_json::from_str(r#"{"is_running": false}"#).unwrap();
        merge_scraping_status(&mut current, progress, Utc::now());

        assert_eq!(current.current_bank, "");
        assert_eq!(current.processed_bins, 0);
        assert!(current.failed_urls.is_empty());
        assert_eq!(current.rate, "0");
        assert_eq!(current.eta, estimate::CALCULATING);
    }

    #[test]
    fn test_full_merge_preserves_probe_seeded_resumable() {
        let mut current = ScrapingStatus {
            resumable: true,
            ..Default::default()
        };

        let progress: ScrapingProgress = serde_json::from_str(
            r#"{"is_running": true, "total_banks": 500, "processed_banks": 120}"#,
        )
        .unwrap();
        merge_scraping_status(&mut current, progress, Utc::now());

        assert!(current.resumable);
        assert_eq!(current.total_banks, 500);
    }
}
