use super::{AppState, RoomRecord};
use crate::error::LobbyError;
use crate::protocol::RoomSnapshot;
use crate::types::*;
use std::collections::HashMap;

impl RoomRecord {
    pub(crate) fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub(crate) fn leader(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.is_leader)
    }

    pub(crate) fn is_leader(&self, name: &str) -> bool {
        self.member(name).is_some_and(|m| m.is_leader)
    }
}

impl AppState {
    /// Authorization predicate for leader-only actions.
    pub async fn is_leader(&self, room: &str, player: &str) -> bool {
        self.rooms
            .read()
            .await
            .get(room)
            .is_some_and(|r| r.is_leader(player))
    }

    /// Remove `target` from the room along with the vote they cast. Votes
    /// cast against the target are kept; a tally may still name an absent
    /// player. When the leader is removed, leadership passes to the
    /// earliest-joined survivor in the same step.
    pub async fn kick(&self, room: &str, requester: &str, target: &str) -> Result<(), LobbyError> {
        let mut rooms = self.rooms.write().await;

        let Some(record) = rooms.get_mut(room) else {
            // nothing to kick; the admin gets a no-op, anyone else a refusal
            return if self.policy.is_admin(requester) {
                Ok(())
            } else {
                Err(LobbyError::Forbidden(room.to_string()))
            };
        };
        if !(record.is_leader(requester) || self.policy.is_admin(requester)) {
            tracing::warn!("{} tried to kick in {} without permission", requester, room);
            return Err(LobbyError::Forbidden(room.to_string()));
        }

        let Some(idx) = record.members.iter().position(|m| m.name == target) else {
            return Ok(());
        };
        let removed = record.members.remove(idx);
        record.votes.remove(target);

        if removed.is_leader {
            if let Some(successor) = record.members.iter_mut().min_by_key(|m| m.joined_at) {
                successor.is_leader = true;
                tracing::info!("Leadership of {} passed to {}", room, successor.name);
            }
        }
        tracing::info!("Kicked {} from {}", target, room);
        Ok(())
    }

    /// The single polling primitive: full lobby and round state for
    /// `player`, or `None` when the room is gone or the player is no longer
    /// in it (the client restarts either way).
    pub async fn snapshot(&self, room: &str, player: &str) -> Option<RoomSnapshot> {
        let rooms = self.rooms.read().await;
        let record = rooms.get(room)?;
        record.member(player)?;

        let mut votes: HashMap<PlayerName, u32> = HashMap::new();
        for vote in record.votes.values() {
            *votes.entry(vote.target.clone()).or_insert(0) += 1;
        }

        Some(RoomSnapshot {
            players: record.members.iter().map(|m| m.name.clone()).collect(),
            leader: record.leader().map(|m| m.name.clone()).unwrap_or_default(),
            started: record.status.phase.started(),
            seed: record.status.seed.clone(),
            ejected: record.status.phase.ejected().map(str::to_string),
            has_voted: record.votes.contains_key(player),
            votes,
        })
    }
}
