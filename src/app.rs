use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::StoreConfig;
use crate::models::{Conversation, Task, TaskDraft, TaskStatus};
use crate::services::notice::Notice;
use crate::services::tasks::TaskSummary;
use crate::services::theme::ThemeMode;
use crate::services::{
    ConversationService, Database, EntityStore, KeyValueStore, MemoryStore, TaskService,
    ThemeService,
};

/// Application state handed to every screen. Built once at startup and torn
/// down with `shutdown`.
pub struct AppContext {
    pub tasks: TaskService,
    pub conversations: ConversationService,
    pub theme: ThemeService,
    theme_mode: ThemeMode,
}

/// What the home screen shows.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub tasks: TaskSummary,
    /// Open tasks due after today, soonest first.
    pub upcoming: Vec<Task>,
    pub conversations: usize,
    pub latest_conversation: Option<Conversation>,
}

const UPCOMING_LIMIT: usize = 3;

impl AppContext {
    pub async fn init(config: &StoreConfig) -> Result<Self> {
        let db = Database::open(config)
            .await
            .context("Failed to open local storage")?;
        let ctx = Self::with_backend(Arc::new(db)).await;
        tracing::info!("Application started (theme: {})", ctx.theme_mode.as_str());
        Ok(ctx)
    }

    pub async fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryStore::new())).await
    }

    pub async fn with_backend(backend: Arc<dyn KeyValueStore>) -> Self {
        let store = EntityStore::new(backend.clone());
        let theme = ThemeService::new(backend);
        let theme_mode = theme.load().await;
        Self {
            tasks: TaskService::new(store.clone()),
            conversations: ConversationService::new(store),
            theme,
            theme_mode,
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        self.theme_mode.is_dark(system_prefers_dark)
    }

    /// The in-memory mode switches even when persisting it fails.
    pub async fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme_mode = mode;
        if let Err(e) = self.theme.save(mode).await {
            tracing::error!("Failed to save theme: {}", e);
        }
    }

    pub async fn toggle_theme(&mut self, system_prefers_dark: bool) -> ThemeMode {
        match self.theme.toggle(self.theme_mode, system_prefers_dark).await {
            Ok(next) => self.theme_mode = next,
            Err(e) => {
                tracing::error!("Failed to save theme: {}", e);
                self.theme_mode = self.theme_mode.toggled(system_prefers_dark);
            }
        }
        self.theme_mode
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Dashboard {
        let tasks = self.tasks.list().await;
        let summary = crate::services::tasks::summarize(&tasks, today);

        let mut upcoming: Vec<(NaiveDate, Task)> = tasks
            .into_iter()
            .filter(|t| t.status != TaskStatus::Done)
            .filter_map(|t| t.deadline_date().map(|d| (d, t)))
            .filter(|(d, _)| *d > today)
            .collect();
        upcoming.sort_by_key(|(d, _)| *d);

        let conversations = self.conversations.list().await;
        Dashboard {
            tasks: summary,
            upcoming: upcoming
                .into_iter()
                .take(UPCOMING_LIMIT)
                .map(|(_, t)| t)
                .collect(),
            conversations: conversations.len(),
            latest_conversation: conversations.into_iter().next(),
        }
    }

    // --- Screen actions that end in a dialog ---

    pub async fn add_task(&self, draft: TaskDraft) -> Notice {
        let result = self.tasks.add(draft).await;
        Notice::from_result(&result, "Tugas ditambahkan", &failure_text(&result, "Gagal menambah tugas"))
    }

    pub async fn save_task_edit(&self, id: &str, draft: TaskDraft) -> Notice {
        let result = self.tasks.update(id, draft).await;
        let notice = Notice::from_result(
            &result,
            "Tugas berhasil diperbarui",
            &failure_text(&result, "Gagal memperbarui tugas"),
        );
        if notice.is_success() {
            notice.with_title("Sukses")
        } else {
            notice
        }
    }

    pub async fn delete_task(&self, id: &str) -> Notice {
        let result = self.tasks.delete(id).await;
        Notice::from_result(&result, "Tugas dihapus", "Gagal menghapus tugas")
    }

    pub fn shutdown(self) {
        tracing::info!("Application stopped");
    }
}

// Validation messages are shown as-is; storage failures get the generic text.
fn failure_text<T>(result: &Result<T>, generic: &str) -> String {
    match result {
        Err(e) => match e.downcast_ref::<crate::models::ValidationError>() {
            Some(validation) => validation.to_string(),
            None => generic.to_string(),
        },
        Ok(_) => generic.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NEW_CONVERSATION_ID;
    use crate::services::flaky::FlakyStore;
    use crate::services::notice::NoticeKind;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_lists_soonest_open_tasks() {
        let ctx = AppContext::in_memory().await;
        let today = day(2025, 5, 10);
        for (title, deadline) in [
            ("Jauh", "2025-07-01"),
            ("Dekat", "2025-05-12"),
            ("Lewat", "2025-05-01"),
            ("Hari ini", "2025-05-10"),
            ("Sedang", "2025-06-01"),
        ] {
            ctx.tasks
                .add(TaskDraft::new(title).deadline(deadline))
                .await
                .unwrap();
        }
        ctx.conversations
            .send(NEW_CONVERSATION_ID, "Halo")
            .await
            .unwrap();

        let dash = ctx.dashboard(today).await;
        let titles: Vec<&str> = dash.upcoming.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Dekat", "Sedang", "Jauh"]);
        assert_eq!(dash.tasks.total, 5);
        // Due today already counts as late
        assert_eq!(dash.tasks.overdue, 2);
        assert_eq!(dash.conversations, 1);
        assert_eq!(
            dash.latest_conversation.unwrap().last_message.as_deref(),
            Some("Halo")
        );
    }

    #[tokio::test]
    async fn test_theme_persists_across_contexts() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut ctx = AppContext::with_backend(backend.clone()).await;
        assert_eq!(ctx.theme_mode(), ThemeMode::Light);
        assert_eq!(ctx.toggle_theme(false).await, ThemeMode::Dark);
        ctx.shutdown();

        let ctx = AppContext::with_backend(backend).await;
        assert!(ctx.is_dark(false));
    }

    #[tokio::test]
    async fn test_action_notices() {
        let ctx = AppContext::in_memory().await;

        let invalid = ctx.add_task(TaskDraft::new("")).await;
        assert_eq!(invalid.kind, NoticeKind::Failure);
        assert_eq!(invalid.body, "Judul tidak boleh kosong");

        assert!(ctx.add_task(TaskDraft::new("Resume")).await.is_success());
        let id = ctx.tasks.list().await[0].id.clone();

        let edited = ctx
            .save_task_edit(&id, TaskDraft::new("Resume Bab 2"))
            .await;
        assert_eq!(edited.title, "Sukses");
        assert_eq!(edited.body, "Tugas berhasil diperbarui");

        assert!(ctx.delete_task(&id).await.is_success());
        // Deleting again still reads as success
        assert!(ctx.delete_task(&id).await.is_success());
    }

    #[tokio::test]
    async fn test_set_theme_mode_survives_restart() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut ctx = AppContext::with_backend(backend.clone()).await;
        ctx.set_theme_mode(ThemeMode::System).await;
        assert!(ctx.is_dark(true));
        assert!(!ctx.is_dark(false));
        ctx.shutdown();

        let ctx = AppContext::with_backend(backend).await;
        assert_eq!(ctx.theme_mode(), ThemeMode::System);
    }

    #[tokio::test]
    async fn test_write_failures_end_in_generic_failure_notice() {
        let backend = Arc::new(FlakyStore::failing_writes());
        let ctx = AppContext::with_backend(backend.clone()).await;

        let added = ctx.add_task(TaskDraft::new("Resume")).await;
        assert_eq!(added.kind, NoticeKind::Failure);
        assert_eq!(added.title, "Error");
        assert_eq!(added.body, "Gagal menambah tugas");

        let deleted = ctx.delete_task("any").await;
        assert_eq!(deleted.kind, NoticeKind::Failure);
        assert_eq!(deleted.body, "Gagal menghapus tugas");

        let edited = ctx.save_task_edit("any", TaskDraft::new("Resume")).await;
        assert_eq!(edited.title, "Error");
        assert_eq!(edited.body, "Gagal memperbarui tugas");
        assert_eq!(backend.writes(), 3);
    }

    #[tokio::test]
    async fn test_read_failure_blocks_delete_without_writing() {
        let backend = Arc::new(FlakyStore::failing_reads());
        let ctx = AppContext::with_backend(backend.clone()).await;

        let deleted = ctx.delete_task("any").await;
        assert_eq!(deleted.kind, NoticeKind::Failure);
        assert_eq!(backend.writes(), 0);
    }
}
