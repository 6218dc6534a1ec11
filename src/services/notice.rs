use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A blocking dialog shown after a user action. Success and failure share
/// the same shape; only the wording differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Berhasil".to_string(),
            body: body.into(),
        }
    }

    pub fn failure(body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            title: "Error".to_string(),
            body: body.into(),
        }
    }

    /// Turn an action result into a dialog. Failures are logged here since
    /// the error stops at the screen that issued the action.
    pub fn from_result<T, E: Display>(
        result: &Result<T, E>,
        on_success: &str,
        on_failure: &str,
    ) -> Self {
        match result {
            Ok(_) => Self::success(on_success),
            Err(e) => {
                tracing::error!("{}: {}", on_failure, e);
                Self::failure(on_failure)
            }
        }
    }

    /// Screens differ in the heading they use for the same kind of dialog.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}
