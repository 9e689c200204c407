use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::core::list::{ListError, TaskList};
use crate::core::task::Task;

/// Staged edits for one task. Nothing reaches the task or the store until
/// `submit`, and a submit with an empty title or details commits nothing.
pub struct TaskEditor {
    task_id: Uuid,
    pub title: String,
    pub details: String,
    pub due_enabled: bool,
    pub due_date: NaiveDateTime,
}

impl TaskEditor {
    /// Stage the task's current fields. A task without a due date stages
    /// `now` with the due toggle off.
    pub fn for_task(task: &Task, now: NaiveDateTime) -> Self {
        let (due_enabled, due_date) = match task.due_date {
            Some(due) => (true, due),
            None => (false, now),
        };
        Self {
            task_id: task.id,
            title: task.title.clone().unwrap_or_default(),
            details: task.details.clone().unwrap_or_default(),
            due_enabled,
            due_date,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_details(&mut self, details: impl Into<String>) {
        self.details = details.into();
    }

    pub fn set_due_enabled(&mut self, enabled: bool) {
        self.due_enabled = enabled;
    }

    /// The picker only offers the current time or later; past selections
    /// clamp to `now`.
    pub fn set_due_date(&mut self, date: NaiveDateTime, now: NaiveDateTime) {
        self.due_date = date.max(now);
    }

    /// Commit the staged fields. With the due toggle off the task's due
    /// date is cleared even if one was previously set.
    pub fn submit(&self, list: &mut TaskList) -> Result<(), ListError> {
        let due = self.due_enabled.then_some(self.due_date);
        list.update_task(self.task_id, &self.title, &self.details, due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;
    use chrono::{Duration, NaiveDate};
    use std::path::PathBuf;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 23)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn scratch_list_with(task: Task) -> (PathBuf, TaskList, Uuid) {
        let dir = std::env::temp_dir().join(format!("slate-editor-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = TaskStore::new(dir.join("tasks.json"));
        store.save(&task).unwrap();
        let id = task.id;
        (dir, TaskList::load(store).unwrap(), id)
    }

    #[test]
    fn stages_fields_from_task() {
        let due = now() + Duration::days(3);
        let task = Task::new("Pay rent", "Due EOM", Some(due));
        let editor = TaskEditor::for_task(&task, now());
        assert_eq!(editor.title, "Pay rent");
        assert_eq!(editor.details, "Due EOM");
        assert!(editor.due_enabled);
        assert_eq!(editor.due_date, due);
    }

    #[test]
    fn no_due_date_stages_now_disabled() {
        let task = Task::new("Buy milk", "2%", None);
        let editor = TaskEditor::for_task(&task, now());
        assert!(!editor.due_enabled);
        assert_eq!(editor.due_date, now());
    }

    #[test]
    fn past_due_selection_clamps_to_now() {
        let task = Task::new("Buy milk", "2%", None);
        let mut editor = TaskEditor::for_task(&task, now());
        editor.set_due_date(now() - Duration::days(1), now());
        assert_eq!(editor.due_date, now());
        editor.set_due_date(now() + Duration::hours(2), now());
        assert_eq!(editor.due_date, now() + Duration::hours(2));
    }

    #[test]
    fn empty_field_blocks_the_commit() {
        let task = Task::new("Keep me", "intact", Some(now() + Duration::days(1)));
        let (dir, mut list, id) = scratch_list_with(task);

        let mut editor = TaskEditor::for_task(list.task(id).unwrap(), now());
        editor.set_title("");
        assert!(matches!(editor.submit(&mut list), Err(ListError::Validation)));

        let task = list.task(id).unwrap();
        assert_eq!(task.title.as_deref(), Some("Keep me"));
        assert_eq!(task.details.as_deref(), Some("intact"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn disabling_due_clears_it_on_submit() {
        let task = Task::new("Dated", "for now", Some(now() + Duration::days(1)));
        let (dir, mut list, id) = scratch_list_with(task);

        let mut editor = TaskEditor::for_task(list.task(id).unwrap(), now());
        editor.set_due_enabled(false);
        editor.submit(&mut list).unwrap();
        assert_eq!(list.task(id).unwrap().due_date, None);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn submit_commits_staged_edits() {
        let task = Task::new("Old title", "old details", None);
        let (dir, mut list, id) = scratch_list_with(task);

        let mut editor = TaskEditor::for_task(list.task(id).unwrap(), now());
        editor.set_title("New title");
        editor.set_details("new details");
        editor.set_due_enabled(true);
        editor.set_due_date(now() + Duration::days(2), now());
        editor.submit(&mut list).unwrap();

        let task = list.task(id).unwrap();
        assert_eq!(task.title.as_deref(), Some("New title"));
        assert_eq!(task.details.as_deref(), Some("new details"));
        assert_eq!(task.due_date, Some(now() + Duration::days(2)));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
