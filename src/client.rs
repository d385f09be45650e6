//! This module provides a client to connect to the todo REST backend

use std::error::Error;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskSource;

/// The error payload of the backend.
/// Current revisions send `{"message": ...}`, older ones `{"error": ...}`; both are accepted
#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(alias = "error")]
    message: String,
}

/// A task source that fetches its data from a REST backend
pub struct Client {
    api_base: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client for the backend rooted at `api_base`
    /// (e.g. `http://localhost:4000/api/v1`, see [`crate::config::API_BASE_URL`]).
    /// This does not start a connection
    pub fn new<S: AsRef<str>>(api_base: S) -> Result<Self, Box<dyn Error>> {
        // A trailing slash matters to Url::join, add it on behalf of the caller
        let mut base = api_base.as_ref().trim_end_matches('/').to_string();
        base.push('/');
        let api_base = Url::parse(&base)?;

        Ok(Self{
            api_base,
            http: reqwest::Client::new(),
        })
    }

    fn todos_url(&self) -> Result<Url, Box<dyn Error>> {
        Ok(self.api_base.join("todos")?)
    }

    fn todo_url(&self, id: &TaskId) -> Result<Url, Box<dyn Error>> {
        Ok(self.api_base.join(&format!("todos/{}", id))?)
    }

    /// Turn a non-2xx response into the human-readable message the backend sent
    async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, Box<dyn Error>> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = match res.json::<ApiMessage>().await {
            Ok(payload) => payload.message,
            Err(_) => format!("HTTP error {}", status),
        };
        log::debug!("The server answered {}: {}", status, message);
        Err(message.into())
    }

    async fn fetch_tasks(&self, query: &[(&str, &str)]) -> Result<Vec<Task>, Box<dyn Error>> {
        let res = self.http.get(self.todos_url()?)
            .query(query)
            .send()
            .await?;

        let tasks = Self::check_status(res).await?
            .json::<Vec<Task>>()
            .await?;
        log::debug!("Fetched {} tasks from the server", tasks.len());
        Ok(tasks)
    }
}

#[async_trait(?Send)]
impl TaskSource for Client {
    async fn tasks_for_date(&self, date: &str) -> Result<Vec<Task>, Box<dyn Error>> {
        self.fetch_tasks(&[("date", date)]).await
    }

    async fn tasks_between(&self, start: &str, end: &str) -> Result<Vec<Task>, Box<dyn Error>> {
        self.fetch_tasks(&[("start", start), ("end", end)]).await
    }

    async fn add_task(&mut self, draft: NewTask) -> Result<Task, Box<dyn Error>> {
        let res = self.http.post(self.todos_url()?)
            .json(&draft)
            .send()
            .await?;

        let task = Self::check_status(res).await?
            .json::<Task>()
            .await?;
        Ok(task)
    }

    async fn set_completion(&mut self, id: &TaskId, completed: bool) -> Result<(), Box<dyn Error>> {
        let res = self.http.patch(self.todo_url(id)?)
            .json(&serde_json::json!({ "completed": completed }))
            .send()
            .await?;

        Self::check_status(res).await?;
        Ok(())
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let res = self.http.delete(self.todo_url(id)?)
            .send()
            .await?;

        Self::check_status(res).await?;
        Ok(())
    }
}
