use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// Text of the newest message, kept in sync on every send.
    #[serde(default)]
    pub last_message: Option<String>,
}

impl Entity for Conversation {
    fn id(&self) -> &str {
        &self.id
    }
}
