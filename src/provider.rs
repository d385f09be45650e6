//! This module abstracts the remote backend and the local cache, and merges them into a
//! single virtual source
//!
//! Reads are served from the local store, so views stay fast (and alive) when the
//! backend is slow or down. A [`Provider::refresh`] fetches a date window from the
//! remote source and makes it the authoritative content of that window locally.
//! Mutations are written through: the backend first, then the local mirror.

use std::error::Error;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::aggregate::{self, DailySummary, StatusSummary, ROLLING_WINDOW_DAYS};
use crate::task::{NewTask, Task, TaskId};
use crate::traits::{TaskSource, TaskStore};

/// A data source that combines a remote [`TaskSource`] and a local [`TaskStore`], keeping
/// the local one a mirror of the remote one.
///
/// `remote` is usually a [`Client`](crate::client::Client), `local` is usually a
/// [`Cache`](crate::cache::Cache). In tests the remote is conveniently mocked by a
/// second `Cache`. In case both ends disagree, the remote always wins: a refresh simply
/// replaces the local copy of the refreshed window
pub struct Provider<L, R>
where
    L: TaskStore + Sync + Send,
    R: TaskSource + Sync + Send,
{
    /// The remote source (usually a server)
    remote: R,
    /// The local store
    local: L,
}

impl<L, R> Provider<L, R>
where
    L: TaskStore + Sync + Send,
    R: TaskSource + Sync + Send,
{
    pub fn new(remote: R, local: L) -> Self {
        Self { remote, local }
    }

    /// Returns the data source described as `local`
    pub fn local(&self) -> &L { &self.local }
    /// Returns the data source described as `local`
    pub fn local_mut(&mut self) -> &mut L { &mut self.local }
    /// Returns the data source described as `remote`.
    ///
    /// Apart from tests, there are very few (if any) reasons to access `remote` directly:
    /// the read methods of this provider serve the (much faster) local store, and
    /// [`Provider::refresh`] is how the store catches up with the remote end
    pub fn remote(&self) -> &R { &self.remote }

    /// Returns the last time a refresh succeeded (or None in case none ever did)
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.local.last_refresh()
    }

    /// Fetch the tasks of the inclusive `[start, end]` date window from the remote
    /// source, and replace the local copy of that window with them.
    ///
    /// It returns whether the refresh succeeded (details are logged using the `log::*`
    /// macros). On failure the local store is left untouched, so cached tasks keep being
    /// served; simply run this function again later
    pub async fn refresh(&mut self, start: &str, end: &str) -> bool {
        log::info!("Starting a refresh of [{} ; {}]", start, end);

        let fetched = match self.remote.tasks_between(start, end).await {
            Err(err) => {
                log::warn!("Unable to fetch tasks from the server: {}. Keeping the cached tasks this time.", err);
                return false;
            },
            Ok(tasks) => tasks,
        };

        if let Err(err) = self.local.replace_between(start, end, fetched).await {
            log::warn!("Unable to store the fetched tasks: {}", err);
            return false;
        }

        self.local.update_last_refresh(None);
        log::info!("Refresh ended");
        true
    }

    /// The locally-known tasks of one `YYYY-MM-DD` day.
    ///
    /// Store errors are not propagated to the caller: they are logged, and degrade to an
    /// empty list, so that a view never crashes over its data layer
    pub async fn tasks_for_date(&self, date: &str) -> Vec<Task> {
        match self.local.tasks_for_date(date).await {
            Ok(tasks) => tasks,
            Err(err) => {
                log::warn!("Unable to read the tasks of {} from the local store: {}", date, err);
                Vec::new()
            },
        }
    }

    /// The locally-known tasks of the inclusive `[start, end]` date range.
    ///
    /// Same error convention as [`Provider::tasks_for_date`]
    pub async fn tasks_between(&self, start: &str, end: &str) -> Vec<Task> {
        match self.local.tasks_between(start, end).await {
            Ok(tasks) => tasks,
            Err(err) => {
                log::warn!("Unable to read the tasks of [{} ; {}] from the local store: {}", start, end, err);
                Vec::new()
            },
        }
    }

    /// Create a task on the backend, and mirror it in the local store.
    ///
    /// The remote error (carrying the backend's human-readable message) propagates to
    /// the caller. A local store failure is only logged: the next refresh heals it
    pub async fn add_task(&mut self, draft: NewTask) -> Result<Task, Box<dyn Error>> {
        let task = self.remote.add_task(draft).await?;
        if let Err(err) = self.local.upsert_task(task.clone()).await {
            log::error!("Unable to store the new task {} locally: {}", task.id(), err);
        }
        Ok(task)
    }

    /// Set or clear the completion flag of a task, on the backend then locally.
    ///
    /// Same error convention as [`Provider::add_task`]
    pub async fn set_completion(&mut self, id: &TaskId, completed: bool) -> Result<(), Box<dyn Error>> {
        self.remote.set_completion(id, completed).await?;
        if let Err(err) = self.local.set_completion(id, completed).await {
            log::error!("Unable to update task {} locally: {}", id, err);
        }
        Ok(())
    }

    /// Delete a task, on the backend then locally.
    ///
    /// Same error convention as [`Provider::add_task`]
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        self.remote.delete_task(id).await?;
        if let Err(err) = self.local.delete_task(id).await {
            log::error!("Unable to delete task {} locally: {}", id, err);
        }
        Ok(())
    }

    /// The 30-day rolling summary ending at `reference_date`, over the locally-known
    /// tasks (run a [`Provider::refresh`] of that window first to get current numbers)
    pub async fn daily_stats(&self, reference_date: NaiveDate) -> Vec<DailySummary> {
        let start = aggregate::format_day(reference_date - Duration::days(ROLLING_WINDOW_DAYS as i64 - 1));
        let end = aggregate::format_day(reference_date);
        let tasks = self.tasks_between(&start, &end).await;
        aggregate::rolling_daily_stats(&tasks, reference_date)
    }

    /// The completed/pending split of the locally-known tasks of `[start, end]`
    pub async fn completion_summary(&self, start: &str, end: &str) -> StatusSummary {
        let tasks = self.tasks_between(start, end).await;
        let completed = tasks.iter().filter(|task| task.completed()).count() as i64;
        aggregate::status_summary(tasks.len() as i64, completed)
    }
}
