use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::entity_store::{EntityStore, Placement};
use crate::config::TASKS_KEY;
use crate::models::{Task, TaskDraft, TaskStatus};

/// Task counts shown on the dashboard and the task list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub overdue: usize,
}

#[derive(Clone)]
pub struct TaskService {
    store: EntityStore,
}

impl TaskService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Newest first. A corrupt collection reads as empty.
    pub async fn list(&self) -> Vec<Task> {
        self.store.load_or_empty(TASKS_KEY).await
    }

    pub async fn get(&self, id: &str) -> Option<Task> {
        self.store.find_by_id(TASKS_KEY, id).await
    }

    pub async fn add(&self, draft: TaskDraft) -> Result<Task> {
        let task = Task::from_draft(draft)?;
        self.store
            .append(TASKS_KEY, task.clone(), Placement::Front)
            .await
            .context("Failed to save new task")?;
        tracing::info!("Added task {}", task.id);
        Ok(task)
    }

    /// Flip between todo and done. Returns the new status, or `None` if the
    /// task no longer exists.
    pub async fn toggle_done(&self, id: &str) -> Result<Option<TaskStatus>> {
        let updated = self
            .store
            .update_by_id(TASKS_KEY, id, |task: &mut Task| {
                task.status = task.status.toggled()
            })
            .await
            .context("Failed to update task status")?;
        Ok(updated.map(|task| task.status))
    }

    /// Save the edit form. Any status can be chosen here.
    pub async fn update(&self, id: &str, draft: TaskDraft) -> Result<Option<Task>> {
        draft.validate()?;
        self.store
            .update_by_id(TASKS_KEY, id, |task: &mut Task| task.apply(draft))
            .await
            .context("Failed to update task")
    }

    /// Deleting a missing task is not an error.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self
            .store
            .remove_by_id::<Task>(TASKS_KEY, id)
            .await
            .context("Failed to delete task")?;
        if !removed {
            tracing::debug!("Task {} was already gone", id);
        }
        Ok(removed)
    }

    pub async fn summary(&self, today: NaiveDate) -> TaskSummary {
        summarize(&self.list().await, today)
    }
}

pub fn summarize(tasks: &[Task], today: NaiveDate) -> TaskSummary {
    let mut summary = TaskSummary {
        total: tasks.len(),
        ..Default::default()
    };
    for task in tasks {
        match task.status {
            TaskStatus::Todo => summary.todo += 1,
            TaskStatus::InProgress => summary.in_progress += 1,
            TaskStatus::Done => summary.done += 1,
        }
        if task.status != TaskStatus::Done && task.is_overdue(today) {
            summary.overdue += 1;
        }
    }
    summary
}
