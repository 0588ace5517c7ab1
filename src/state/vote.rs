use super::AppState;
use crate::error::LobbyError;
use crate::types::*;
use chrono::Utc;
use rand::seq::IndexedRandom;
use std::collections::HashMap;

impl AppState {
    /// Record (or replace) `voter`'s vote, then tally once every member has
    /// a live vote. Further votes after quorum re-apply the tally, so the
    /// outcome can shift until the leader resets.
    pub async fn cast_vote(&self, room: &str, voter: &str, target: &str) -> Result<(), LobbyError> {
        let mut rooms = self.rooms.write().await;

        let Some(record) = rooms.get_mut(room) else {
            return Err(LobbyError::NotAMember(room.to_string()));
        };
        if record.member(voter).is_none() {
            return Err(LobbyError::NotAMember(room.to_string()));
        }

        record.votes.insert(
            voter.to_string(),
            Vote {
                voter: voter.to_string(),
                target: target.to_string(),
                ts: Utc::now(),
            },
        );

        // kicked voters lose their vote row, so the count can reach but not
        // exceed the member count; >= keeps the trigger robust regardless
        if record.votes.len() >= record.members.len() {
            let ejected = tally(&record.votes);
            tracing::info!("Room {} tallied, {} ejected", room, ejected);
            record.status.phase = RoundPhase::AwaitingReset { ejected };
        }
        Ok(())
    }

    /// Clear all votes and the round result, keeping membership. Leader
    /// only. The freshness token is regenerated so clients can tell a reset
    /// room apart from one where no round ever ran.
    pub async fn reset(&self, room: &str, requester: &str) -> Result<(), LobbyError> {
        let mut rooms = self.rooms.write().await;

        let Some(record) = rooms.get_mut(room) else {
            return Err(LobbyError::NotLeader(room.to_string()));
        };
        if !record.is_leader(requester) {
            tracing::warn!("{} tried to reset {} without leadership", requester, room);
            return Err(LobbyError::NotLeader(room.to_string()));
        }

        record.votes.clear();
        record.status = RoomStatus {
            seed: crate::seed::freshness_token(),
            phase: RoundPhase::Lobby,
        };
        tracing::info!("Room {} reset by {}", room, requester);
        Ok(())
    }
}

/// Group votes by target, take the maximum, break ties uniformly at random.
/// Zero vote rows resolve to the skip sentinel.
fn tally(votes: &HashMap<PlayerName, Vote>) -> PlayerName {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for vote in votes.values() {
        *counts.entry(vote.target.as_str()).or_insert(0) += 1;
    }

    let Some(max) = counts.values().copied().max() else {
        return SKIP_SENTINEL.to_string();
    };
    let tied: Vec<&str> = counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(target, _)| *target)
        .collect();

    match tied.choose(&mut rand::rng()) {
        Some(winner) => (*winner).to_string(),
        None => SKIP_SENTINEL.to_string(),
    }
}
