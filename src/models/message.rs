use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub from_me: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// A message written by the local user, stamped now.
    pub fn outgoing(text: &str) -> Self {
        Self {
            id: new_id(),
            text: text.to_string(),
            from_me: true,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Message {
    fn id(&self) -> &str {
        &self.id
    }
}
