use std::path::PathBuf;

use anyhow::{Context, Result};

pub const APP_DIR: &str = "minisiakad";
pub const DB_FILE: &str = "minisiakad.db";

pub const TASKS_KEY: &str = "tasks";
pub const CONVERSATIONS_KEY: &str = "conversations";
pub const THEME_KEY: &str = "themeMode";

/// Route id the messaging screen uses for a conversation that has not been
/// written yet.
pub const NEW_CONVERSATION_ID: &str = "new";
pub const DEFAULT_CONVERSATION_TITLE: &str = "Pesan Baru";

/// Storage key holding the message list of one conversation.
pub fn messages_key(conversation_id: &str) -> String {
    format!("messages_{}", conversation_id)
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Explicit database file. `None` resolves to the XDG data directory.
    pub data_path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: Some(path.into()),
        }
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_path {
            return Ok(path.clone());
        }
        let data_dir = match std::env::var("XDG_DATA_HOME") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let home = std::env::var("HOME").context("HOME not set")?;
                PathBuf::from(home).join(".local/share")
            }
        };
        Ok(data_dir.join(APP_DIR).join(DB_FILE))
    }
}
