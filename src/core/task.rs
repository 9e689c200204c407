use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: Option<String>,
    pub details: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    /// Stamped at creation, never mutated afterwards. Optional because
    /// older store files may lack it; sorting substitutes "now".
    pub created: Option<NaiveDateTime>,
    pub is_done: bool,
    pub is_favorite: bool,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        details: impl Into<String>,
        due_date: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            details: Some(details.into()),
            due_date,
            created: Some(chrono::Local::now().naive_local()),
            is_done: false,
            is_favorite: false,
        }
    }

    pub fn toggle_done(&mut self) {
        self.is_done = !self.is_done;
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }

    /// Due date used for ordering: a task without one sorts as "due now",
    /// not "never due".
    pub fn effective_due(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.due_date.unwrap_or(now)
    }

    /// Creation time used for ordering, substituting "now" when absent
    /// so undated records sort as newest.
    pub fn effective_created(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.created.unwrap_or(now)
    }
}
