//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Base URL of the todo REST endpoint (the `/todos` routes hang under it).
/// It is seeded from the `CORKBOARD_API_URL` environment variable when that is set.
/// Feel free to override it when initing this library.
pub static API_BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    let url = std::env::var("CORKBOARD_API_URL")
        .unwrap_or_else(|_| String::from("http://localhost:4000/api/v1"));
    Arc::new(Mutex::new(url))
});

/// Where [`Cache::cache_file`](crate::cache::Cache::cache_file) points by default.
/// Feel free to override it when initing this library.
pub static CACHE_FILE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(String::from("~/.config/corkboard/cache.json"))));
