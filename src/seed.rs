//! Round seed composition.
//!
//! The seed is an opaque token the client splits on `|`; the server only
//! composes and stores it. Segments, in order: a random component, the
//! custom word (uppercased) or `NONE`, the game mode, and the event flag.

use rand::Rng;

use crate::types::GameMode;

const SEED_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SEED_LENGTH: usize = 8;

const SEED_DELIM: char = '|';
const NO_WORD: &str = "NONE";
const EVENT_FLAG: &str = "EVENT_ROOM";
const NO_EVENT_FLAG: &str = "NO_EVENT";

/// Chance of the event flag firing when the round runs in AKUMA mode.
const EVENT_CHANCE: f64 = 0.15;

/// Random component guaranteeing round-to-round uniqueness.
fn random_segment() -> String {
    let mut rng = rand::rng();
    (0..SEED_LENGTH)
        .map(|_| SEED_CHARS[rng.random_range(0..SEED_CHARS.len())] as char)
        .collect()
}

/// Pre-round freshness token for a freshly created or reset room.
pub fn freshness_token() -> String {
    random_segment()
}

/// Compose the full round seed. The event flag can only fire in AKUMA mode.
pub fn compose(custom_word: Option<&str>, mode: GameMode) -> String {
    let word = custom_word
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| NO_WORD.to_string());

    let event = if mode == GameMode::Akuma && rand::rng().random_bool(EVENT_CHANCE) {
        EVENT_FLAG
    } else {
        NO_EVENT_FLAG
    };

    format!(
        "{}{SEED_DELIM}{}{SEED_DELIM}{}{SEED_DELIM}{}",
        random_segment(),
        word,
        mode.as_str(),
        event
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(seed: &str) -> Vec<&str> {
        seed.split(SEED_DELIM).collect()
    }

    #[test]
    fn test_compose_has_four_segments() {
        let seed = compose(None, GameMode::Classic);
        let parts = segments(&seed);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].len(), SEED_LENGTH);
        assert_eq!(parts[1], NO_WORD);
        assert_eq!(parts[2], "CLASSIC");
        assert_eq!(parts[3], NO_EVENT_FLAG);
    }

    #[test]
    fn test_custom_word_is_uppercased() {
        let seed = compose(Some("  mancha "), GameMode::Classic);
        assert_eq!(segments(&seed)[1], "MANCHA");
    }

    #[test]
    fn test_blank_word_means_none() {
        let seed = compose(Some("   "), GameMode::Classic);
        assert_eq!(segments(&seed)[1], NO_WORD);
    }

    #[test]
    fn test_classic_never_fires_event() {
        for _ in 0..200 {
            let seed = compose(None, GameMode::Classic);
            assert_eq!(segments(&seed)[3], NO_EVENT_FLAG);
        }
    }

    #[test]
    fn test_akuma_fires_event_sometimes() {
        // P(all 2000 rounds agree) is negligible at a 0.15 event chance
        let mut fired = 0;
        let mut quiet = 0;
        for _ in 0..2000 {
            let seed = compose(None, GameMode::Akuma);
            match segments(&seed)[3] {
                EVENT_FLAG => fired += 1,
                NO_EVENT_FLAG => quiet += 1,
                other => panic!("unexpected event segment: {}", other),
            }
        }
        assert!(fired > 0, "event flag never fired in AKUMA mode");
        assert!(quiet > 0, "event flag always fired in AKUMA mode");
    }

    #[test]
    fn test_tokens_are_unique_round_to_round() {
        let a = compose(None, GameMode::Classic);
        let b = compose(None, GameMode::Classic);
        assert_ne!(segments(&a)[0], segments(&b)[0]);
    }
}
