pub mod conversation;
pub mod message;
pub mod task;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub use conversation::Conversation;
pub use message::Message;
pub use task::{Priority, Task, TaskDraft, TaskStatus};

/// A record stored inside a JSON collection and addressed by its string id.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Field-presence failures raised before any storage call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Judul tidak boleh kosong")]
    EmptyTitle,

    #[error("Pesan tidak boleh kosong")]
    EmptyMessage,
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
