use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::SlateConfig;
use crate::core::task::Task;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("task store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable task store: one JSON document on disk, keyed by task id.
/// Every write rewrites the whole document; callers see synchronous,
/// blocking semantics.
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(config: &SlateConfig) -> Self {
        Self::new(config.tasks_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every persisted task, in no guaranteed order. A missing store file
    /// is an empty store, not an error.
    pub fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.read_map()?.into_values().collect())
    }

    /// Upsert a single task under its id.
    pub fn save(&self, task: &Task) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(task.id, task.clone());
        self.write_map(&map)
    }

    /// Remove a task by id. Deleting an id that is already absent is a no-op.
    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(&id).is_none() {
            log::debug!("Delete of absent task {} ignored", id);
            return Ok(());
        }
        self.write_map(&map)
    }

    fn read_map(&self) -> Result<BTreeMap<Uuid, Task>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_map(&self, map: &BTreeMap<Uuid, Task>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scratch_store() -> (PathBuf, TaskStore) {
        let dir = std::env::temp_dir().join(format!("slate-store-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = TaskStore::new(dir.join("tasks.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (dir, store) = scratch_store();
        assert!(store.load_all().unwrap().is_empty());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (dir, store) = scratch_store();
        let due = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let task = Task::new("Buy milk", "2%", Some(due));
        store.save(&task).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, task.id);
        assert_eq!(loaded[0].title.as_deref(), Some("Buy milk"));
        assert_eq!(loaded[0].due_date, Some(due));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_upserts_by_id() {
        let (dir, store) = scratch_store();
        let mut task = Task::new("Draft", "v1", None);
        store.save(&task).unwrap();
        task.details = Some("v2".to_string());
        store.save(&task).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].details.as_deref(), Some("v2"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn delete_removes_and_absent_is_noop() {
        let (dir, store) = scratch_store();
        let task = Task::new("Gone soon", "bye", None);
        store.save(&task).unwrap();

        store.delete(task.id).unwrap();
        assert!(store.load_all().unwrap().is_empty());

        // Double delete must not error.
        store.delete(task.id).unwrap();
        store.delete(Uuid::new_v4()).unwrap();
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let (dir, store) = scratch_store();
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load_all(), Err(StoreError::Corrupt(_))));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
