use super::AppState;
use crate::error::LobbyError;
use crate::types::*;
use chrono::Utc;

impl AppState {
    /// Append a chat message for a member. Whitespace-only content is a
    /// no-op; returns whether a message was stored.
    pub async fn send_message(
        &self,
        room: &str,
        player: &str,
        content: &str,
        reply_to: Option<MessageId>,
    ) -> Result<bool, LobbyError> {
        if content.trim().is_empty() {
            return Ok(false);
        }

        let mut rooms = self.rooms.write().await;
        let Some(record) = rooms.get_mut(room) else {
            return Err(LobbyError::NotAMember(room.to_string()));
        };
        if record.member(player).is_none() {
            return Err(LobbyError::NotAMember(room.to_string()));
        }

        record.messages.push(ChatMessage {
            id: ulid::Ulid::new().to_string(),
            player: player.to_string(),
            content: content.to_string(),
            reply_to,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    /// Most recent messages in insertion order, bounded to the chat window.
    pub async fn recent_messages(
        &self,
        room: &str,
        player: &str,
    ) -> Result<Vec<ChatMessage>, LobbyError> {
        let rooms = self.rooms.read().await;
        let Some(record) = rooms.get(room) else {
            return Err(LobbyError::NotAMember(room.to_string()));
        };
        if record.member(player).is_none() {
            return Err(LobbyError::NotAMember(room.to_string()));
        }

        let skip = record.messages.len().saturating_sub(CHAT_WINDOW);
        Ok(record.messages[skip..].to_vec())
    }
}
