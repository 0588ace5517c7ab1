use super::{AppState, RoomRecord};
use crate::error::LobbyError;
use crate::protocol::RoomSummary;
use crate::types::*;
use chrono::{DateTime, Duration, Utc};
use std::collections::hash_map::Entry;

/// How many rooms `list` returns at most.
const MAX_LISTED_ROOMS: usize = 10;

impl RoomRecord {
    /// Staleness is measured against the oldest member, regardless of any
    /// activity since.
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.members
            .iter()
            .map(|m| m.joined_at)
            .min()
            .is_some_and(|oldest| now - oldest > Duration::minutes(ROOM_TTL_MINUTES))
    }
}

impl AppState {
    /// Enter a room, creating it when absent and recycling it when stale or
    /// memberless ("create-on-join"). Rejoining under an existing name is
    /// idempotent. Expects normalized inputs.
    pub async fn join(&self, room: &str, player: &str) -> JoinOutcome {
        let mut rooms = self.rooms.write().await;
        let now = Utc::now();

        match rooms.entry(room.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(RoomRecord::fresh(player.to_string()));
                tracing::info!("Room {} created by {}", room, player);
                JoinOutcome::Created
            }
            Entry::Occupied(mut slot) => {
                let record = slot.get_mut();
                if record.members.is_empty() || record.is_stale(now) {
                    // full purge and recreate in one step; a concurrent
                    // joiner serializes behind us and lands in the new room
                    *record = RoomRecord::fresh(player.to_string());
                    tracing::info!("Room {} recycled by {}", room, player);
                    JoinOutcome::Created
                } else if record.members.iter().any(|m| m.name == player) {
                    JoinOutcome::Reconnected
                } else {
                    record.members.push(Member {
                        name: player.to_string(),
                        is_leader: false,
                        joined_at: now,
                    });
                    JoinOutcome::Joined
                }
            }
        }
    }

    /// Up to 10 most recently active rooms, newest first. Rooms whose
    /// membership was emptied by kicks are not listed.
    pub async fn list_rooms(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.read().await;

        let mut summaries: Vec<RoomSummary> = rooms
            .iter()
            .filter_map(|(code, record)| {
                let last_active = record.members.iter().map(|m| m.joined_at).max()?;
                Some(RoomSummary {
                    room_code: code.clone(),
                    count: record.members.len(),
                    last_active,
                })
            })
            .collect();

        summaries.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        summaries.truncate(MAX_LISTED_ROOMS);
        summaries
    }

    /// Unconditional full purge of every entity for the room. Leader or
    /// super-admin only; terminal for the room code.
    pub async fn clean(&self, room: &str, requester: &str) -> Result<(), LobbyError> {
        let mut rooms = self.rooms.write().await;

        let allowed = self.policy.is_admin(requester)
            || rooms.get(room).is_some_and(|r| r.is_leader(requester));
        if !allowed {
            tracing::warn!("{} tried to clean {} without permission", requester, room);
            return Err(LobbyError::Forbidden(room.to_string()));
        }

        if rooms.remove(room).is_some() {
            tracing::info!("Room {} purged by {}", room, requester);
        }
        Ok(())
    }
}
