use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::{new_id, Entity, ValidationError};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "belum")]
    Todo,
    #[serde(rename = "dikerjakan")]
    InProgress,
    #[serde(rename = "selesai")]
    Done,
}

impl TaskStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Belum",
            TaskStatus::InProgress => "Dikerjakan",
            TaskStatus::Done => "Selesai",
        }
    }

    /// The "mark done" button: done goes back to todo, anything else is done.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Done => TaskStatus::Todo,
            TaskStatus::Todo | TaskStatus::InProgress => TaskStatus::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "tinggi")]
    High,
    #[serde(rename = "sedang")]
    Medium,
    #[serde(rename = "rendah")]
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "mataKuliah", default)]
    pub course: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(
        rename = "prioritas",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
}

impl Task {
    /// Build a fresh task from a validated draft. New tasks always start as todo.
    pub fn from_draft(draft: TaskDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id: new_id(),
            title: draft.title,
            course: draft.course,
            deadline: draft.deadline,
            status: TaskStatus::Todo,
            priority: draft.priority,
        })
    }

    /// Overwrite every editable field from the edit form, keeping the id.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.course = draft.course;
        self.deadline = draft.deadline;
        self.status = draft.status;
        self.priority = draft.priority;
    }

    /// Deadline as a calendar date. Accepts `YYYY-MM-DD` with or without a
    /// trailing time part, and full RFC 3339 timestamps.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        let raw = self.deadline.as_deref()?;
        raw.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    /// Late from the deadline day itself onward.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.deadline_date().is_some_and(|date| date <= today)
    }

    pub fn format_deadline(&self) -> String {
        let Some(raw) = self.deadline.as_deref() else {
            return "Tanpa deadline".to_string();
        };
        match self.deadline_date() {
            Some(date) => format!(
                "{:02} {} {}",
                date.day(),
                MONTHS[date.month0() as usize],
                date.year()
            ),
            None => raw.to_string(),
        }
    }
}

impl Entity for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Contents of the add/edit task form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub course: String,
    pub deadline: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.course = course.into();
        self
    }

    pub fn deadline(mut self, deadline: impl Into<String>) -> Self {
        let deadline = deadline.into();
        self.deadline = (!deadline.trim().is_empty()).then_some(deadline);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            course: task.course.clone(),
            deadline: task.deadline.clone(),
            status: task.status,
            priority: task.priority,
        }
    }
}

// The add form writes "" when no date was picked.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
