use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("slate")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SlateConfig {
    pub data_directory: PathBuf,
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            debug_logging: false,
        }
    }
}

impl SlateConfig {
    pub fn tasks_path(&self) -> PathBuf {
        self.data_directory.join("tasks.json")
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("slate").join("config.json"))
    }

    /// Read the config file, falling back to defaults when it is missing
    /// or unreadable. A malformed file is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Ensure the data directory and an empty task store exist.
    pub fn ensure_files(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)?;

        let tasks = self.tasks_path();
        if !tasks.exists() {
            std::fs::write(&tasks, "{}\n")?;
        }

        Ok(())
    }
}
