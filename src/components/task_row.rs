use chrono::NaiveDateTime;

use crate::core::task::Task;

const NO_TITLE: &str = "No title";
const NO_DETAILS: &str = "No details";
const NO_DUE_DATE: &str = "No Due Date";

/// One task rendered for display: text with placeholders for absent fields
/// plus the two toggle states. Mutation goes through the task list, not
/// through the row.
pub struct TaskRow {
    pub title: String,
    pub details: String,
    pub due: String,
    pub is_done: bool,
    pub is_favorite: bool,
}

impl TaskRow {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: match task.title.as_deref() {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => NO_TITLE.to_string(),
            },
            details: match task.details.as_deref() {
                Some(d) if !d.is_empty() => d.to_string(),
                _ => NO_DETAILS.to_string(),
            },
            due: match task.due_date {
                Some(due) => format_due(due),
                None => NO_DUE_DATE.to_string(),
            },
            is_done: task.is_done,
            is_favorite: task.is_favorite,
        }
    }

    /// Single-line form for the list view.
    pub fn render(&self) -> String {
        let check = if self.is_done { "x" } else { " " };
        let heart = if self.is_favorite { "*" } else { " " };
        format!(
            "[{}] {} {} | {} | {}",
            check, heart, self.title, self.details, self.due
        )
    }
}

/// Day/month/year plus hour and minute.
fn format_due(due: NaiveDateTime) -> String {
    due.format("%d/%m/%Y %H:%M").to_string()
}
