use serde::{Deserialize, Serialize};

/// A persisted to-do item. `id` is assigned by the store on creation and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub reminder_time: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// The mutable fields of a task, as collected from the user before an add
/// or edit. Date-times are `"YYYY-MM-DD HH:MM"` text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub reminder_time: Option<String>,
}

impl TaskDraft {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
