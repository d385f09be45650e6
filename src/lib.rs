//! This crate provides a way to consume a REST todo-list backend.
//!
//! It provides a REST client in the [`client`] module, that can be used as a stand-alone module.
//!
//! Because the connection to the backend may be slow (or down), and a user-friendly app usually wants to display something right on startup, this crate also provides a local store for already-fetched tasks in the [`cache`] module.
//!
//! These two "data sources" (actual client and local cache) can be used together in a [`Provider`](provider::Provider). \
//! A `Provider` abstracts these two sources by merging them together into one virtual source. \
//! It refreshes the cache from the backend, and writes changes through to both.
//!
//! The [`aggregate`] module holds the pure routines the daily, calendar and statistics
//! views are made of (per-day grouping, the 30-day rolling summary, completion counts).

pub mod traits;

mod task;
pub use task::NewTask;
pub use task::Task;
pub use task::TaskId;
pub mod aggregate;
pub mod provider;
pub use provider::Provider;

pub mod client;
pub mod cache;

pub mod mock_behaviour;

pub mod config;
pub mod utils;

/// The usual provider: an actual REST backend, mirrored into a local file cache
pub type RestProvider = Provider<cache::Cache, client::Client>;
