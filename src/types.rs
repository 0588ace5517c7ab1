use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type RoomCode = String;
pub type PlayerName = String;
pub type MessageId = String;

/// A room whose oldest member predates this TTL is recycled on the next join.
pub const ROOM_TTL_MINUTES: i64 = 30;

/// How many recent chat messages `get_messages` returns.
pub const CHAT_WINDOW: usize = 50;

/// Written as the ejection result when a tally runs against zero vote rows.
pub const SKIP_SENTINEL: &str = "SKIP";

/// Room codes and player names are trimmed and uppercased before any lookup.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    #[default]
    Classic,
    Akuma,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "CLASSIC",
            GameMode::Akuma => "AKUMA",
        }
    }
}

/// Round state of a room. The wire fields `started` and `ejected` are
/// derived views of this.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundPhase {
    /// No round running; the seed holds the room's freshness token.
    Lobby,
    /// A round is running under the stored seed.
    InRound,
    /// A tally completed; the result stands until the leader resets.
    AwaitingReset { ejected: PlayerName },
}

impl RoundPhase {
    pub fn started(&self) -> bool {
        !matches!(self, RoundPhase::Lobby)
    }

    pub fn ejected(&self) -> Option<&str> {
        match self {
            RoundPhase::AwaitingReset { ejected } => Some(ejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoomStatus {
    pub seed: String,
    pub phase: RoundPhase,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub name: PlayerName,
    pub is_leader: bool,
    pub joined_at: DateTime<Utc>,
}

/// One live vote per voter per room; a resubmission replaces the target.
#[derive(Debug, Clone)]
pub struct Vote {
    pub voter: PlayerName,
    pub target: PlayerName,
    pub ts: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub player: PlayerName,
    pub content: String,
    pub reply_to: Option<MessageId>,
    pub created_at: DateTime<Utc>,
}

/// What `join` did for the caller.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum JoinOutcome {
    /// Room was absent, memberless or stale; caller founded it as leader.
    Created,
    /// Caller entered an existing room as a non-leader member.
    Joined,
    /// Caller was already a member; nothing changed.
    Reconnected,
}
