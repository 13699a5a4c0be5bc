use bin_dashboard::client::types::SearchQuery;
use bin_dashboard::{DashboardConfig, DashboardController};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    println!("Attaching to BIN dashboard backend...");
    let controller = DashboardController::attach(DashboardConfig::default()).await;

    let status = controller.status();
    println!(
        "Resumable: {} ({}/{} banks processed)",
        status.scraping.resumable, status.scraping.processed_banks, status.scraping.total_banks
    );

    watch_progress(&controller).await;
    run_search(&controller).await;

    controller.shutdown();
    println!("Detached.");
}

async fn watch_progress(controller: &DashboardController) {
    println!("Watching status updates...");
    let mut updates = controller.subscribe();

    for _ in 0..5 {
        match tokio::time::timeout(Duration::from_secs(2), updates.changed()).await {
            Ok(Ok(())) => {
                let status = updates.borrow().clone();
                println!(
                    "  urls: {}/{} countries ({}) | scraping: {}/{} banks, rate {}, eta {}",
                    status.url_collection.processed_countries,
                    status.url_collection.total_countries,
                    if status.url_collection.is_running {
                        "running"
                    } else {
                        "stopped"
                    },
                    status.scraping.processed_banks,
                    status.scraping.total_banks,
                    status.scraping.rate,
                    status.scraping.eta,
                );
            }
            _ => break,
        }
    }
}

async fn run_search(controller: &DashboardController) {
    let query = SearchQuery {
        bin: "4".to_string(),
        ..Default::default()
    };

    match controller.search(&query).await {
        Ok(results) => {
            println!("Search returned {} records", results.len());
            for record in results.iter().take(5) {
                println!(
                    "  {} - {} ({}, {} {})",
                    record.bin, record.bank, record.country, record.brand, record.card_type
                );
            }
        }
        Err(err) => println!("Search failed: {}", err),
    }
}
