use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything a polling client can ask for, tagged by the `action` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    List,
    Join {
        room: String,
        player: String,
    },
    Get {
        room: String,
        player: String,
    },
    SendMessage {
        room: String,
        player: String,
        content: String,
        #[serde(default, rename = "replyTo")]
        reply_to: Option<MessageId>,
    },
    GetMessages {
        room: String,
        player: String,
    },
    Start {
        room: String,
        player: String,
        #[serde(default, rename = "gameMode")]
        game_mode: Option<GameMode>,
        #[serde(default, rename = "customWord")]
        custom_word: Option<String>,
    },
    Vote {
        room: String,
        player: String,
        target: String,
    },
    Reset {
        room: String,
        player: String,
    },
    Kick {
        room: String,
        player: String,
        target: String,
    },
    Clean {
        room: String,
        player: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub msg: &'static str,
}

/// Join ack; `outcome` tells the client apart fresh-create, new-member and
/// reconnect cases.
#[derive(Debug, Clone, Serialize)]
pub struct JoinAck {
    pub msg: &'static str,
    pub outcome: JoinOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub room_code: RoomCode,
    pub count: usize,
    pub last_active: chrono::DateTime<chrono::Utc>,
}

/// Full lobby and round state for one polling member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub players: Vec<PlayerName>,
    pub leader: PlayerName,
    pub started: bool,
    pub seed: String,
    pub ejected: Option<PlayerName>,
    pub has_voted: bool,
    pub votes: HashMap<PlayerName, u32>,
}

/// Sent instead of a snapshot when the room is gone or the caller was
/// removed; the client reacts by returning to the join screen.
#[derive(Debug, Clone, Serialize)]
pub struct Restart {
    pub restart: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Rooms(Vec<RoomSummary>),
    Snapshot(Box<RoomSnapshot>),
    Restart(Restart),
    Messages(Vec<ChatMessage>),
    JoinAck(JoinAck),
    Ack(Ack),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_tag_dispatch() {
        let req: ActionRequest = serde_json::from_value(json!({
            "action": "vote",
            "room": "ROOM1",
            "player": "ALICE",
            "target": "BOB",
        }))
        .unwrap();
        assert!(matches!(req, ActionRequest::Vote { .. }));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<ActionRequest, _> =
            serde_json::from_value(json!({ "action": "explode", "room": "R" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_start_fields_are_optional() {
        let req: ActionRequest = serde_json::from_value(json!({
            "action": "start",
            "room": "ROOM1",
            "player": "ALICE",
        }))
        .unwrap();
        match req {
            ActionRequest::Start {
                game_mode,
                custom_word,
                ..
            } => {
                assert!(game_mode.is_none());
                assert!(custom_word.is_none());
            }
            _ => panic!("expected Start"),
        }
    }

    #[test]
    fn test_snapshot_uses_camel_case_on_the_wire() {
        let snapshot = RoomSnapshot {
            players: vec!["ALICE".to_string()],
            leader: "ALICE".to_string(),
            started: false,
            seed: "abc".to_string(),
            ejected: None,
            has_voted: false,
            votes: HashMap::new(),
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("hasVoted").is_some());
        assert!(value.get("has_voted").is_none());
    }
}
