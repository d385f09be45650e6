use std::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::task::{NewTask, Task, TaskId};

/// A source of to-do tasks (the REST backend, or a local copy of it)
#[async_trait(?Send)]
pub trait TaskSource {
    /// Returns the tasks assigned to exactly this `YYYY-MM-DD` day.
    /// This function may trigger a request (that can be a long process, or that can even fail, e.g. in case of a remote server)
    async fn tasks_for_date(&self, date: &str) -> Result<Vec<Task>, Box<dyn Error>>;

    /// Returns the tasks of the inclusive `[start, end]` date range.
    /// Range membership is a lexicographic comparison on the `YYYY-MM-DD` strings, which is also how the backend filters
    async fn tasks_between(&self, start: &str, end: &str) -> Result<Vec<Task>, Box<dyn Error>>;

    /// Accept a task draft. The source assigns the identifier and the timestamps, and
    /// returns the fully-formed task
    async fn add_task(&mut self, draft: NewTask) -> Result<Task, Box<dyn Error>>;

    /// Set or clear the completion flag of an existing task
    async fn set_completion(&mut self, id: &TaskId, completed: bool) -> Result<(), Box<dyn Error>>;

    /// Remove a task
    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>>;
}

/// A task source that additionally keeps a local, rewritable copy of the data
/// (e.g. a [`Cache`](crate::cache::Cache)), so that a [`Provider`](crate::provider::Provider)
/// can mirror a remote source into it
#[async_trait(?Send)]
pub trait TaskStore: TaskSource {
    /// Replace every stored task of the inclusive `[start, end]` range with `tasks`.
    /// This is what a refresh does after fetching a window from the server: the fetched
    /// payload is authoritative for that window
    async fn replace_between(&mut self, start: &str, end: &str, tasks: Vec<Task>) -> Result<(), Box<dyn Error>>;

    /// Insert a task, or overwrite the stored task carrying the same id
    async fn upsert_task(&mut self, task: Task) -> Result<(), Box<dyn Error>>;

    /// Returns the last time this store successfully refreshed from a remote source
    /// (or None in case it has never been refreshed)
    fn last_refresh(&self) -> Option<DateTime<Utc>>;

    /// Update the last refresh timestamp to now, or to a custom time in case `timepoint` is `Some`
    fn update_last_refresh(&mut self, timepoint: Option<DateTime<Utc>>);
}
