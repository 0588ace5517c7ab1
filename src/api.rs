//! The polling action boundary.
//!
//! One POST endpoint carries every lobby action. `handle_action` does the
//! actual dispatch so tests can drive the full surface without a listener;
//! the axum handler is a thin wrapper around it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::error::LobbyError;
use crate::protocol::*;
use crate::state::AppState;
use crate::types::normalize;

/// Dispatch a single client action against the shared state.
pub async fn handle_action(
    state: &Arc<AppState>,
    req: ActionRequest,
) -> Result<ApiResponse, LobbyError> {
    match req {
        ActionRequest::List => Ok(ApiResponse::Rooms(state.list_rooms().await)),

        ActionRequest::Join { room, player } => {
            let (room, player) = require_identity(&room, &player)?;
            let outcome = state.join(&room, &player).await;
            Ok(ApiResponse::JoinAck(JoinAck { msg: "Ok", outcome }))
        }

        ActionRequest::Get { room, player } => {
            let (room, player) = require_identity(&room, &player)?;
            match state.snapshot(&room, &player).await {
                Some(snapshot) => Ok(ApiResponse::Snapshot(Box::new(snapshot))),
                None => Ok(ApiResponse::Restart(Restart { restart: true })),
            }
        }

        ActionRequest::SendMessage {
            room,
            player,
            content,
            reply_to,
        } => {
            let (room, player) = require_identity(&room, &player)?;
            let stored = state.send_message(&room, &player, &content, reply_to).await?;
            Ok(ApiResponse::Ack(Ack {
                msg: if stored { "Sent" } else { "Empty" },
            }))
        }

        ActionRequest::GetMessages { room, player } => {
            let (room, player) = require_identity(&room, &player)?;
            Ok(ApiResponse::Messages(
                state.recent_messages(&room, &player).await?,
            ))
        }

        ActionRequest::Start {
            room,
            player,
            game_mode,
            custom_word,
        } => {
            let (room, player) = require_identity(&room, &player)?;
            state
                .start_round(
                    &room,
                    &player,
                    game_mode.unwrap_or_default(),
                    custom_word.as_deref(),
                )
                .await?;
            Ok(ApiResponse::Ack(Ack { msg: "Started" }))
        }

        ActionRequest::Vote {
            room,
            player,
            target,
        } => {
            let (room, player) = require_identity(&room, &player)?;
            state.cast_vote(&room, &player, &normalize(&target)).await?;
            Ok(ApiResponse::Ack(Ack { msg: "Voted" }))
        }

        ActionRequest::Reset { room, player } => {
            let (room, player) = require_identity(&room, &player)?;
            state.reset(&room, &player).await?;
            Ok(ApiResponse::Ack(Ack { msg: "Reset" }))
        }

        ActionRequest::Kick {
            room,
            player,
            target,
        } => {
            let (room, player) = require_identity(&room, &player)?;
            state.kick(&room, &player, &normalize(&target)).await?;
            Ok(ApiResponse::Ack(Ack { msg: "Ok" }))
        }

        ActionRequest::Clean { room, player } => {
            let (room, player) = require_identity(&room, &player)?;
            state.clean(&room, &player).await?;
            Ok(ApiResponse::Ack(Ack { msg: "Ok" }))
        }
    }
}

/// Normalize the identifying fields and refuse blank ones.
fn require_identity(room: &str, player: &str) -> Result<(String, String), LobbyError> {
    let room = normalize(room);
    let player = normalize(player);
    if room.is_empty() || player.is_empty() {
        return Err(LobbyError::BadRequest(
            "room and player are required".to_string(),
        ));
    }
    Ok((room, player))
}

/// Axum handler for POST /api.
pub async fn api_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Malformed action request: {}", rejection);
            return LobbyError::BadRequest("unknown action".to_string()).into_response();
        }
    };

    match handle_action(&state, req).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => err.into_response(),
    }
}
