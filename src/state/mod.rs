mod chat;
mod directory;
mod roster;
mod round;
mod vote;

use crate::auth::ModerationPolicy;
use crate::types::*;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Every entity belonging to one room code: created together, destroyed
/// together. Holding them in one record makes the multi-entity transitions
/// (create-on-join, kick with succession, tally on vote) atomic under a
/// single lock acquisition.
#[derive(Debug, Clone)]
pub struct RoomRecord {
    pub status: RoomStatus,
    pub members: Vec<Member>,
    /// Keyed by voter, so a resubmission is an upsert by construction.
    pub votes: HashMap<PlayerName, Vote>,
    pub messages: Vec<ChatMessage>,
}

impl RoomRecord {
    /// Fresh room with `founder` as sole leader and a new freshness token.
    pub fn fresh(founder: PlayerName) -> Self {
        Self {
            status: RoomStatus {
                seed: crate::seed::freshness_token(),
                phase: RoundPhase::Lobby,
            },
            members: vec![Member {
                name: founder,
                is_leader: true,
                joined_at: Utc::now(),
            }],
            votes: HashMap::new(),
            messages: Vec::new(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RwLock<HashMap<RoomCode, RoomRecord>>>,
    pub policy: ModerationPolicy,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_policy(ModerationPolicy::default())
    }

    pub fn with_policy(policy: ModerationPolicy) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            policy,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record_has_sole_leader() {
        let record = RoomRecord::fresh("ALICE".to_string());

        assert_eq!(record.members.len(), 1);
        assert!(record.members[0].is_leader);
        assert_eq!(record.status.phase, RoundPhase::Lobby);
        assert!(!record.status.seed.is_empty());
        assert!(record.votes.is_empty());
        assert!(record.messages.is_empty());
    }

    #[tokio::test]
    async fn test_state_starts_empty() {
        let state = AppState::new();
        assert!(state.rooms.read().await.is_empty());
    }
}
