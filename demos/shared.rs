use std::path::Path;

use corkboard::aggregate;
use corkboard::cache::Cache;
use corkboard::client::Client;
use corkboard::RestProvider;

const CACHE_FILE: &str = "demo_cache/corkboard.json";

/// Initializes a provider against the configured backend, and refreshes the current month
pub async fn initial_refresh() -> RestProvider {
    let api_base = corkboard::config::API_BASE_URL.lock().unwrap().clone();
    println!("This will use the backend at {} (set CORKBOARD_API_URL to use another one).", api_base);

    let client = Client::new(&api_base).unwrap();
    let cache_path = Path::new(CACHE_FILE);
    let cache = match Cache::from_file(&cache_path) {
        Ok(cache) => cache,
        Err(err) => {
            log::warn!("Invalid cache file: {}. Using a default cache", err);
            Cache::new(&cache_path)
        }
    };
    let mut provider = RestProvider::new(client, cache);

    let today = chrono::Local::now().date_naive();
    let (start, end) = aggregate::month_bounds(today);
    println!("Refreshing [{} ; {}]...", start, end);
    println!("Depending on your RUST_LOG value, you may see more or less details about the progress.");
    if provider.refresh(&start, &end).await == false {
        log::warn!("Refresh did not complete, see the previous log lines for more info. The cached tasks will be used.");
    }
    if let Some(parent) = cache_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    provider.local().save_to_file();

    provider
}
