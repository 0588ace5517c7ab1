use super::AppState;
use crate::error::LobbyError;
use crate::seed;
use crate::types::*;

impl AppState {
    /// Begin a round: compose a fresh seed token, store it and mark the room
    /// in-round. Leader only. A leftover ejection result from an unreset
    /// round is discarded by the phase change.
    pub async fn start_round(
        &self,
        room: &str,
        requester: &str,
        mode: GameMode,
        custom_word: Option<&str>,
    ) -> Result<String, LobbyError> {
        let mut rooms = self.rooms.write().await;

        let Some(record) = rooms.get_mut(room) else {
            return Err(LobbyError::NotLeader(room.to_string()));
        };
        if !record.is_leader(requester) {
            tracing::warn!("{} tried to start {} without leadership", requester, room);
            return Err(LobbyError::NotLeader(room.to_string()));
        }

        let token = seed::compose(custom_word, mode);
        record.status = RoomStatus {
            seed: token.clone(),
            phase: RoundPhase::InRound,
        };
        tracing::info!("Room {} started in {} mode", room, mode.as_str());
        Ok(token)
    }
}
