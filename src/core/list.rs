use chrono::NaiveDateTime;
use uuid::Uuid;

use super::task::Task;
use crate::store::{StoreError, TaskStore};

/// Which derivation the task list applies before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sorting {
    #[default]
    DueDate,
    IsCompleted,
    NewestTask,
}

impl Sorting {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DueDate => "Due Date",
            Self::IsCompleted => "Is Completed",
            Self::NewestTask => "Newest Task",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("please enter both a title and details for the task")]
    Validation,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The live task set plus its derived, sorted view.
///
/// The store is the source of truth; this list is a read-through copy that
/// every mutation writes back immediately. When a save fails the in-memory
/// change stays as the new unpersisted truth (no rollback) and the error is
/// returned for the caller to surface or swallow.
pub struct TaskList {
    store: TaskStore,
    tasks: Vec<Task>,
    sorting: Sorting,
}

impl TaskList {
    pub fn load(store: TaskStore) -> Result<Self, StoreError> {
        let tasks = store.load_all()?;
        Ok(Self {
            store,
            tasks,
            sorting: Sorting::default(),
        })
    }

    /// Re-read the task set from the store, dropping any unpersisted state.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.tasks = self.store.load_all()?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn sorting(&self) -> Sorting {
        self.sorting
    }

    pub fn set_sorting(&mut self, sorting: Sorting) {
        self.sorting = sorting;
    }

    pub fn sorted_tasks(&self) -> Vec<Task> {
        self.sorted_tasks_at(chrono::Local::now().naive_local())
    }

    /// The derived view for the active sort mode. `now` is the evaluation
    /// time substituted for missing due/created dates, so an undated task
    /// sorts as "due now" and an uncreated record as newest. Sorts are
    /// stable; ties keep input order.
    pub fn sorted_tasks_at(&self, now: NaiveDateTime) -> Vec<Task> {
        match self.sorting {
            Sorting::DueDate => {
                let mut tasks = self.tasks.clone();
                tasks.sort_by_key(|t| t.effective_due(now));
                tasks
            }
            Sorting::IsCompleted => {
                let mut tasks: Vec<Task> =
                    self.tasks.iter().filter(|t| t.is_done).cloned().collect();
                tasks.sort_by_key(|t| t.effective_due(now));
                tasks
            }
            Sorting::NewestTask => {
                let mut tasks = self.tasks.clone();
                tasks.sort_by_key(|t| std::cmp::Reverse(t.effective_created(now)));
                tasks
            }
        }
    }

    /// Create and persist a new task. The same non-empty rule the editor
    /// enforces applies here.
    pub fn create_task(
        &mut self,
        title: &str,
        details: &str,
        due_date: Option<NaiveDateTime>,
    ) -> Result<Uuid, ListError> {
        if title.is_empty() || details.is_empty() {
            return Err(ListError::Validation);
        }
        let task = Task::new(title, details, due_date);
        let id = task.id;
        self.tasks.push(task);
        self.persist(id)?;
        Ok(id)
    }

    pub fn toggle_completion(&mut self, id: Uuid) -> Result<(), ListError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            log::debug!("Toggle completion for unknown task {}", id);
            return Ok(());
        };
        task.toggle_done();
        self.persist(id)
    }

    pub fn toggle_favorite(&mut self, id: Uuid) -> Result<(), ListError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            log::debug!("Toggle favorite for unknown task {}", id);
            return Ok(());
        };
        task.toggle_favorite();
        self.persist(id)
    }

    /// Overwrite title, details and due date. An empty title or details
    /// rejects the whole edit; an absent due date clears any existing one.
    pub fn update_task(
        &mut self,
        id: Uuid,
        title: &str,
        details: &str,
        due_date: Option<NaiveDateTime>,
    ) -> Result<(), ListError> {
        if title.is_empty() || details.is_empty() {
            return Err(ListError::Validation);
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            log::debug!("Update for unknown task {}", id);
            return Ok(());
        };
        task.title = Some(title.to_string());
        task.details = Some(details.to_string());
        task.due_date = due_date;
        self.persist(id)
    }

    /// Remove a task from the live set and the store.
    pub fn delete_task(&mut self, id: Uuid) -> Result<(), ListError> {
        self.tasks.retain(|t| t.id != id);
        self.store.delete(id)?;
        Ok(())
    }

    fn persist(&self, id: Uuid) -> Result<(), ListError> {
        if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
            self.store.save(task)?;
        }
        Ok(())
    }
}
