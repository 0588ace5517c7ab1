//! Moderation capability checks.
//!
//! Leadership is tracked per room in the roster; the reserved super-admin
//! name is the only privilege source outside it. Kick and clean consult this
//! policy, so swapping the privilege source (say, a role table) never
//! touches the state machine.

use crate::types::normalize;

/// Built-in super-admin name.
const DEFAULT_ADMIN: &str = "STRIOLO";

#[derive(Debug, Clone)]
pub struct ModerationPolicy {
    admin_name: String,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            admin_name: DEFAULT_ADMIN.to_string(),
        }
    }
}

impl ModerationPolicy {
    /// Load the policy from the LOBBY_ADMIN environment variable, falling
    /// back to the built-in name.
    pub fn from_env() -> Self {
        match std::env::var("LOBBY_ADMIN")
            .ok()
            .map(|s| normalize(&s))
            .filter(|s| !s.is_empty())
        {
            Some(admin_name) => {
                tracing::info!("Super-admin name set from LOBBY_ADMIN");
                Self { admin_name }
            }
            None => Self::default(),
        }
    }

    /// Whether this (normalized) player name holds the super-admin capability.
    pub fn is_admin(&self, player: &str) -> bool {
        player == self.admin_name
    }
}
