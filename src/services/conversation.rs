use anyhow::{bail, Context, Result};

use super::entity_store::{EntityStore, Placement};
use crate::config::{
    messages_key, CONVERSATIONS_KEY, DEFAULT_CONVERSATION_TITLE, NEW_CONVERSATION_ID,
};
use crate::models::{new_id, Conversation, Message, ValidationError};

#[derive(Clone)]
pub struct ConversationService {
    store: EntityStore,
}

impl ConversationService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Conversation> {
        self.store.load_or_empty(CONVERSATIONS_KEY).await
    }

    /// Oldest first. The unsaved "new" conversation has no messages.
    pub async fn messages(&self, conversation_id: &str) -> Vec<Message> {
        if conversation_id == NEW_CONVERSATION_ID {
            return Vec::new();
        }
        self.store.load_or_empty(&messages_key(conversation_id)).await
    }

    /// Send `text` as the local user and return the id of the conversation it
    /// landed in. Sending to "new" creates the conversation.
    pub async fn send(&self, conversation_id: &str, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            bail!(ValidationError::EmptyMessage);
        }

        let message = Message::outgoing(text);
        if conversation_id == NEW_CONVERSATION_ID {
            return self.start(message).await;
        }

        self.store
            .append(&messages_key(conversation_id), message.clone(), Placement::Back)
            .await
            .context("Failed to save message")?;
        self.sync_last_message(conversation_id, &message).await?;

        Ok(conversation_id.to_string())
    }

    async fn start(&self, message: Message) -> Result<String> {
        let conversation_id = new_id();
        self.store
            .save_collection(&messages_key(&conversation_id), std::slice::from_ref(&message))
            .await
            .context("Failed to save message")?;

        let conversation = Conversation {
            id: conversation_id.clone(),
            title: DEFAULT_CONVERSATION_TITLE.to_string(),
            last_message: Some(message.text),
        };
        self.store
            .append(CONVERSATIONS_KEY, conversation, Placement::Front)
            .await
            .context("Failed to register conversation")?;

        tracing::info!("Started conversation {}", conversation_id);
        Ok(conversation_id)
    }

    // The index is rewritten only when it holds the conversation; messages
    // written under an unindexed id stay reachable by id alone.
    async fn sync_last_message(&self, conversation_id: &str, message: &Message) -> Result<()> {
        let mut index: Vec<Conversation> = self.store.load_or_empty(CONVERSATIONS_KEY).await;
        let Some(entry) = index.iter_mut().find(|c| c.id == conversation_id) else {
            tracing::warn!(
                "Conversation {} missing from index, preview not updated",
                conversation_id
            );
            return Ok(());
        };
        entry.last_message = Some(message.text.clone());

        self.store
            .save_collection(CONVERSATIONS_KEY, &index)
            .await
            .context("Failed to update conversation preview")?;
        Ok(())
    }
}
