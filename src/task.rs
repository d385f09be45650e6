//! To-do tasks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The unique identifier of a task.
///
/// The backend assigns these (they are opaque strings as far as this crate is concerned).
/// Sources that have to mint identifiers themselves (e.g. a cache that mocks a server in tests) can use [`TaskId::random`]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// A to-do task
///
/// `date` is the calendar day (`YYYY-MM-DD`) the task is assigned to. It is kept as the
/// verbatim string the backend sent: the grouping and statistics code matches days by exact
/// string equality, so a malformed date simply never matches a generated day key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The task identifier, assigned by the backend
    #[serde(rename = "_id")]
    id: TaskId,

    /// The display text of the task
    #[serde(rename = "body")]
    text: String,

    /// Whether this task is completed
    completed: bool,

    /// The calendar day this task is assigned to, as a `YYYY-MM-DD` string
    date: String,

    /// An optional free-form time of day (e.g. "14:30"). Display-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<String>,

    /// The time this task was created
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,

    /// The last time this task was modified
    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a brand new Task that is not on the backend yet.
    /// This will pick a new (random) task ID and stamp both timestamps with the current time.
    pub fn new(text: String, completed: bool, date: String) -> Self {
        let now = Utc::now();
        Self::new_with_parameters(TaskId::random(), text, completed, date, None, now, now)
    }

    /// Create a new Task instance, that may exist on the backend already
    pub fn new_with_parameters(id: TaskId, text: String, completed: bool, date: String,
                               time: Option<String>,
                               created_at: DateTime<Utc>, updated_at: DateTime<Utc>,
                            ) -> Self
    {
        Self {
            id,
            text,
            completed,
            date,
            time,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &TaskId     { &self.id        }
    pub fn text(&self) -> &str      { &self.text      }
    pub fn completed(&self) -> bool { self.completed  }
    pub fn date(&self) -> &str      { &self.date      }
    pub fn time(&self) -> Option<&str>         { self.time.as_deref() }
    pub fn created_at(&self) -> &DateTime<Utc> { &self.created_at     }
    pub fn updated_at(&self) -> &DateTime<Utc> { &self.updated_at     }

    /// Compares everything but the timestamps.
    ///
    /// This is mostly useful in tests, where the same logical task gets re-created or
    /// mutated at slightly different instants on both ends of a provider.
    pub fn has_same_observable_content_as(&self, other: &Task) -> bool {
           self.id == other.id
        && self.text == other.text
        && self.completed == other.completed
        && self.date == other.date
        && self.time == other.time
        // timestamps are ignored
    }

    fn update_modification_date(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Change the text of a task.
    /// This updates its "updatedAt" field
    pub fn set_text(&mut self, new_text: String) {
        self.update_modification_date();
        self.text = new_text;
    }

    /// Set or clear the completion flag.
    /// This updates its "updatedAt" field
    pub fn set_completed(&mut self, completed: bool) {
        self.update_modification_date();
        self.completed = completed;
    }
}

/// A draft for a task that does not exist anywhere yet.
///
/// This is the body of a task creation request: the receiving source assigns the
/// identifier and the timestamps.
#[derive(Clone, Debug, Serialize)]
pub struct NewTask {
    #[serde(rename = "body")]
    pub text: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl NewTask {
    pub fn new<S: ToString, T: ToString>(text: S, date: T) -> Self {
        Self {
            text: text.to_string(),
            date: date.to_string(),
            time: None,
        }
    }

    /// Turn this draft into a fully-formed task, minting an ID and timestamps.
    /// This is what a source does server-side when it accepts the draft
    pub fn into_task(self) -> Task {
        let now = Utc::now();
        Task::new_with_parameters(TaskId::random(), self.text, false, self.date, self.time, now, now)
    }
}
