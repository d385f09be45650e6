//! Scenario tests that simulate a provider between a local cache and a server.
//! Note that these use a second cache to "mock" the server.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use corkboard::cache::Cache;
use corkboard::mock_behaviour::MockBehaviour;
use corkboard::traits::TaskSource;
use corkboard::{NewTask, Provider, Task};

type TestProvider = Provider<Cache, Cache>;

/// A date window that covers every task the tests below create
const ALL_TIME: (&str, &str) = ("2020-01-01", "2030-01-01");

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn task(text: &str, completed: bool, date: &str) -> Task {
    Task::new(text.to_string(), completed, date.to_string())
}

/// Build a provider whose "server" already knows `server_tasks`.
/// Both caches get their backing file in `dir`, nothing touches the working directory
fn test_provider(dir: &tempfile::TempDir, server_tasks: Vec<Task>) -> TestProvider {
    let mut remote = Cache::new(&dir.path().join("remote.json"));
    for task in server_tasks {
        remote.put_task(task);
    }
    let local = Cache::new(&dir.path().join("local.json"));
    Provider::new(remote, local)
}

#[tokio::test]
async fn test_initial_refresh() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let mut provider = test_provider(&dir, vec![
        task("buy milk",         true,  "2024-03-15"),
        task("buy bread",        false, "2024-03-15"),
        task("water the plants", true,  "2024-03-14"),
    ]);

    assert!(provider.last_refresh().is_none());
    assert!(provider.refresh(ALL_TIME.0, ALL_TIME.1).await);

    assert!(provider.local().has_same_observable_content_as(provider.remote()));
    assert!(provider.last_refresh().is_some());

    let today = provider.tasks_for_date("2024-03-15").await;
    assert_eq!(today.len(), 2);
}

#[tokio::test]
async fn test_refresh_only_touches_the_requested_window() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let mut provider = test_provider(&dir, vec![
        task("in the window",  false, "2024-03-10"),
        task("out of the window", false, "2023-12-31"),
    ]);

    assert!(provider.refresh("2024-03-01", "2024-03-31").await);

    assert_eq!(provider.tasks_for_date("2024-03-10").await.len(), 1);
    // The out-of-window task was not fetched
    assert_eq!(provider.tasks_for_date("2023-12-31").await.len(), 0);
}

#[tokio::test]
async fn test_refresh_replaces_stale_local_tasks() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();

    // The same logical task, completed on the server but not in the (stale) local copy
    let stale = task("pay the rent", false, "2024-03-12");
    let mut completed_on_server = stale.clone();
    completed_on_server.set_completed(true);

    let mut remote = Cache::new(&dir.path().join("remote.json"));
    remote.put_task(completed_on_server);
    remote.put_task(task("created on the server", false, "2024-03-13"));

    let mut local = Cache::new(&dir.path().join("local.json"));
    local.put_task(stale);
    local.put_task(task("deleted on the server", true, "2024-03-12"));

    let mut provider = Provider::new(remote, local);
    assert!(provider.refresh(ALL_TIME.0, ALL_TIME.1).await);

    // The server version won, wholesale
    assert!(provider.local().has_same_observable_content_as(provider.remote()));

    let march_12 = provider.tasks_for_date("2024-03-12").await;
    assert_eq!(march_12.len(), 1);
    assert_eq!(march_12[0].text(), "pay the rent");
    assert!(march_12[0].completed());
    assert_eq!(provider.tasks_for_date("2024-03-13").await.len(), 1);
}

#[tokio::test]
async fn test_mutations_reach_both_ends() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let mut provider = test_provider(&dir, Vec::new());

    let created = provider.add_task(NewTask::new("call the bank", "2024-03-15")).await.unwrap();
    assert_eq!(provider.tasks_for_date("2024-03-15").await.len(), 1);
    assert_eq!(provider.remote().tasks_for_date("2024-03-15").await.unwrap().len(), 1);

    provider.set_completion(created.id(), true).await.unwrap();
    assert!(provider.tasks_for_date("2024-03-15").await[0].completed());
    assert!(provider.remote().tasks_for_date("2024-03-15").await.unwrap()[0].completed());

    provider.delete_task(created.id()).await.unwrap();
    assert!(provider.tasks_for_date("2024-03-15").await.is_empty());
    assert!(provider.remote().tasks_for_date("2024-03-15").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_keeps_cached_tasks() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();

    let mut remote = Cache::new(&dir.path().join("remote.json"));
    remote.put_task(task("buy milk", false, "2024-03-15"));
    // The first fetch succeeds, everything afterwards fails
    remote.set_mock_behaviour(Some(Arc::new(Mutex::new(MockBehaviour {
        tasks_between_behaviour: (1, u32::MAX),
        add_task_behaviour: (0, u32::MAX),
        ..MockBehaviour::default()
    }))));

    let local = Cache::new(&dir.path().join("local.json"));
    let mut provider = Provider::new(remote, local);

    assert!(provider.refresh(ALL_TIME.0, ALL_TIME.1).await);
    let first_refresh = provider.last_refresh();

    // The server is now "down": the refresh fails, the cached tasks survive
    assert!(provider.refresh(ALL_TIME.0, ALL_TIME.1).await == false);
    assert_eq!(provider.last_refresh(), first_refresh);
    let cached = provider.tasks_for_date("2024-03-15").await;
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].text(), "buy milk");

    // Mutations do report the failure, and nothing half-lands locally
    let result = provider.add_task(NewTask::new("will not make it", "2024-03-15")).await;
    assert!(result.is_err());
    assert_eq!(provider.tasks_for_date("2024-03-15").await.len(), 1);
}

#[tokio::test]
async fn test_stats_over_the_cached_window() {
    let _ = env_logger::builder().is_test(true).try_init();

    let reference_date = day("2024-03-15");
    let dir = tempfile::tempdir().unwrap();
    let mut provider = test_provider(&dir, vec![
        task("buy milk",         true,  "2024-03-15"),
        task("buy bread",        false, "2024-03-15"),
        task("water the plants", true,  "2024-03-14"),
        task("way too old",      true,  "2024-01-01"),
    ]);

    assert!(provider.refresh(ALL_TIME.0, ALL_TIME.1).await);

    let stats = provider.daily_stats(reference_date).await;
    assert_eq!(stats.len(), corkboard::aggregate::ROLLING_WINDOW_DAYS);
    let today_stat = stats.iter().find(|s| s.date == "2024-03-15").unwrap();
    assert_eq!((today_stat.total, today_stat.completed), (2, 1));
    let yesterday_stat = stats.iter().find(|s| s.date == "2024-03-14").unwrap();
    assert_eq!((yesterday_stat.total, yesterday_stat.completed), (1, 1));
    // The January task is outside the rolling window
    let counted: u32 = stats.iter().map(|s| s.total).sum();
    assert_eq!(counted, 3);

    let summary = provider.completion_summary("2024-03-14", "2024-03-15").await;
    assert_eq!((summary.completed, summary.pending), (2, 1));
}
