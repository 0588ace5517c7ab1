use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::types::RoomCode;

/// Failure taxonomy for lobby actions. Absent rooms and lost memberships are
/// not errors; `get` reports those as a restart signal instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LobbyError {
    #[error("only the leader of {0} can do that")]
    NotLeader(RoomCode),
    #[error("no permission in {0}")]
    Forbidden(RoomCode),
    #[error("not a member of {0}")]
    NotAMember(RoomCode),
    #[error("{0}")]
    BadRequest(String),
}

impl LobbyError {
    fn status(&self) -> StatusCode {
        match self {
            LobbyError::NotLeader(_) | LobbyError::Forbidden(_) | LobbyError::NotAMember(_) => {
                StatusCode::FORBIDDEN
            }
            LobbyError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for LobbyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_variants_map_to_403() {
        assert_eq!(
            LobbyError::NotLeader("R".to_string()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LobbyError::Forbidden("R".to_string()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LobbyError::NotAMember("R".to_string()).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        assert_eq!(
            LobbyError::BadRequest("nope".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
