use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::storage::KeyValueStore;
use crate::config::THEME_KEY;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }

    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => system_prefers_dark,
        }
    }

    /// The quick toggle always lands on an explicit mode, opposite to what
    /// is currently shown.
    pub fn toggled(&self, system_prefers_dark: bool) -> Self {
        if self.is_dark(system_prefers_dark) {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }
}

/// Theme preference, stored as a bare string rather than JSON.
#[derive(Clone)]
pub struct ThemeService {
    backend: Arc<dyn KeyValueStore>,
}

impl ThemeService {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub async fn load(&self) -> ThemeMode {
        match self.backend.get_item(THEME_KEY).await {
            Ok(Some(raw)) => ThemeMode::from_str(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown theme mode '{}', using light", raw);
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::error!("Error loading theme: {}", e);
                ThemeMode::default()
            }
        }
    }

    pub async fn save(&self, mode: ThemeMode) -> Result<()> {
        self.backend.set_item(THEME_KEY, mode.as_str()).await
    }

    pub async fn toggle(&self, current: ThemeMode, system_prefers_dark: bool) -> Result<ThemeMode> {
        let next = current.toggled(system_prefers_dark);
        self.save(next).await?;
        Ok(next)
    }
}
