//! This module provides a local cache for already-fetched tasks
//!
//! The connection to the backend may be slow (or down), and an app usually wants to
//! display something on startup. A [`Cache`] keeps the last fetched tasks in a plain
//! JSON file, and can serve them again without any network round-trip. It implements
//! the same [`TaskSource`](crate::traits::TaskSource) trait as the actual
//! [`Client`](crate::client::Client), which also makes it a convenient stand-in for a
//! server in tests.

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mock_behaviour::MockBehaviour;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::{TaskSource, TaskStore};
use crate::utils::keys_are_the_same;

/// A task source that stores its tasks in a local file
#[derive(Debug)]
pub struct Cache {
    backing_file: PathBuf,
    data: CachedData,

    /// When this cache plays the role of a remote server in tests, operations consult
    /// this hook first, so that tests can make them fail on demand. It stays `None` in
    /// regular use
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    tasks: HashMap<TaskId, Task>,
    last_refresh: Option<DateTime<Utc>>,
}

impl PartialEq for Cache {
    fn eq(&self, other: &Self) -> bool {
        self.backing_file == other.backing_file
            && self.data == other.data
    }
}

impl Cache {
    /// Get the default path to the cache file (see [`crate::config::CACHE_FILE`])
    pub fn cache_file() -> PathBuf {
        PathBuf::from(crate::config::CACHE_FILE.lock().unwrap().clone())
    }

    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_file: PathBuf::from(path),
            data,
            mock_behaviour: None,
        })
    }

    /// Initialize a cache with the default contents
    pub fn new(path: &Path) -> Self {
        Self{
            backing_file: PathBuf::from(path),
            data: CachedData::default(),
            mock_behaviour: None,
        }
    }

    /// Store the current Cache to its backing file
    pub fn save_to_file(&self) {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.data) {
            log::warn!("Unable to serialize: {}", err);
            return;
        };
    }

    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    /// Insert a fully-formed task directly, bypassing the draft workflow.
    /// This is how tests seed a cache that mocks a server
    pub fn put_task(&mut self, task: Task) {
        self.data.tasks.insert(task.id().clone(), task);
    }

    /// Compares the tasks of two Caches, ignoring their timestamps
    ///
    /// This is not a complete equality test: the backing file, the last refresh date and
    /// the task timestamps may differ
    pub fn has_same_observable_content_as(&self, other: &Self) -> bool {
        if keys_are_the_same(&self.data.tasks, &other.data.tasks) == false {
            return false;
        }

        self.data.tasks.iter()
            .all(|(id, task)| match other.data.tasks.get(id) {
                None => false,
                Some(other_task) => task.has_same_observable_content_as(other_task),
            })
    }
}

/// Tasks are returned in a deterministic order (by date, then creation time, then id),
/// since a `HashMap` on its own would shuffle them on every call
fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| {
        (a.date(), a.created_at(), a.id().as_str())
            .cmp(&(b.date(), b.created_at(), b.id().as_str()))
    });
    tasks
}

#[async_trait(?Send)]
impl TaskSource for Cache {
    async fn tasks_for_date(&self, date: &str) -> Result<Vec<Task>, Box<dyn Error>> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock().unwrap().can_fetch_tasks_for_date()?;
        }

        Ok(sorted(self.data.tasks.values()
            .filter(|task| task.date() == date)
            .cloned()
            .collect()))
    }

    async fn tasks_between(&self, start: &str, end: &str) -> Result<Vec<Task>, Box<dyn Error>> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock().unwrap().can_fetch_tasks_between()?;
        }

        Ok(sorted(self.data.tasks.values()
            .filter(|task| start <= task.date() && task.date() <= end)
            .cloned()
            .collect()))
    }

    async fn add_task(&mut self, draft: NewTask) -> Result<Task, Box<dyn Error>> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock().unwrap().can_add_task()?;
        }

        let task = draft.into_task();
        self.data.tasks.insert(task.id().clone(), task.clone());
        Ok(task)
    }

    async fn set_completion(&mut self, id: &TaskId, completed: bool) -> Result<(), Box<dyn Error>> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock().unwrap().can_set_completion()?;
        }

        match self.data.tasks.get_mut(id) {
            None => Err(format!("No task {} in this source", id).into()),
            Some(task) => {
                task.set_completed(completed);
                Ok(())
            },
        }
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        if let Some(mock) = &self.mock_behaviour {
            mock.lock().unwrap().can_delete_task()?;
        }

        if let None = self.data.tasks.remove(id) {
            return Err(format!("No task {} in this source", id).into());
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskStore for Cache {
    async fn replace_between(&mut self, start: &str, end: &str, tasks: Vec<Task>) -> Result<(), Box<dyn Error>> {
        self.data.tasks.retain(|_, task| task.date() < start || end < task.date());
        for task in tasks {
            self.data.tasks.insert(task.id().clone(), task);
        }
        Ok(())
    }

    async fn upsert_task(&mut self, task: Task) -> Result<(), Box<dyn Error>> {
        self.data.tasks.insert(task.id().clone(), task);
        Ok(())
    }

    fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.data.last_refresh
    }

    fn update_last_refresh(&mut self, timepoint: Option<DateTime<Utc>>) {
        self.data.last_refresh = Some(timepoint.unwrap_or_else(Utc::now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");

        let mut cache = Cache::new(&cache_path);
        cache.put_task(Task::new("buy milk".to_string(), false, "2024-03-15".to_string()));
        cache.put_task(Task::new("water the plants".to_string(), true, "2024-03-14".to_string()));
        cache.update_last_refresh(None);

        cache.save_to_file();

        let retrieved_cache = Cache::from_file(&cache_path).unwrap();
        assert_eq!(cache, retrieved_cache);
    }

    #[tokio::test]
    async fn range_reads_are_inclusive_and_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = Cache::new(&dir.path().join("cache.json"));

        cache.put_task(Task::new("before".to_string(), false, "2024-02-29".to_string()));
        cache.put_task(Task::new("first day".to_string(), false, "2024-03-01".to_string()));
        cache.put_task(Task::new("in between".to_string(), true, "2024-03-10".to_string()));
        cache.put_task(Task::new("last day".to_string(), false, "2024-03-31".to_string()));
        cache.put_task(Task::new("after".to_string(), false, "2024-04-01".to_string()));

        let range = cache.tasks_between("2024-03-01", "2024-03-31").await.unwrap();
        let dates: Vec<&str> = range.iter().map(|task| task.date()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-10", "2024-03-31"]);

        let single_day = cache.tasks_for_date("2024-03-10").await.unwrap();
        assert_eq!(single_day.len(), 1);
        assert_eq!(single_day[0].text(), "in between");
    }
}
