use super::ScrapingStatus;
use chrono::{DateTime, Utc};

/// Placeholder shown until enough progress exists to derive an estimate.
pub const CALCULATING: &str = "Calculating...";

/// Derived throughput figures for the scraping subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub rate: String,
    pub eta: String,
}

/// Derives the display rate (banks per minute) and the estimated time
/// remaining from a progress snapshot.
///
/// Both figures require a known `start_time` and at least one processed
/// bank; until then the placeholders are returned. The caller supplies
/// `now`, keeping this a pure function of its inputs.
///
/// `remaining` is signed on purpose: a total that shrinks between polls, or
/// `processed_banks` overtaking `total_banks`, yields a negative ETA.
pub fn estimate(progress: &ScrapingStatus, now: DateTime<Utc>) -> Estimate {
    let start_time = match progress.start_time {
        Some(t) if progress.processed_banks > 0 => t,
        _ => {
            return Estimate {
                rate: "0".to_string(),
                eta: CALCULATING.to_string(),
            }
        }
    };

    let elapsed_ms = (now - start_time).num_milliseconds() as f64;
    let elapsed_minutes = elapsed_ms / 1000.0 / 60.0;
    let rate = format!("{:.1}", progress.processed_banks as f64 / elapsed_minutes);

    // ETA is computed in seconds, independently of the display rate.
    let elapsed_seconds = elapsed_ms / 1000.0;
    let per_second = progress.processed_banks as f64 / elapsed_seconds;
    let eta = if per_second == 0.0 {
        CALCULATING.to_string()
    } else {
        let remaining = progress.total_banks as f64 - progress.processed_banks as f64;
        format_duration(remaining / per_second)
    };

    Estimate { rate, eta }
}

/// Formats a duration in seconds as a coarse `s`/`m`/`h` figure.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{}s", seconds.round() as i64)
    } else if seconds < 3600.0 {
        format!("{}m", (seconds / 60.0).round() as i64)
    } else {
        format!("{}h", (seconds / 3600.0).round() as i64)
    }
}
