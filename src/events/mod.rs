//! Event handlers for non-command traffic.
//!
//! Add new event handlers by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_event;` below
//! 3. Wiring it into `handle_message` (or the dispatcher for other
//!    event kinds)

pub mod triggers;
pub mod welcome;

use tracing::warn;

use crate::bot::dispatcher::AppState;
use crate::directives::{ResponseDirective, UserId};

/// Flat XP granted for every non-bot message.
pub const XP_PER_MESSAGE: i64 = 10;

/// Unified free-text message pipeline.
///
/// Two independent stages run for every non-bot message: the flat XP
/// award and the keyword trigger scan. Neither gates the other - a
/// message with no trigger match still earns XP.
pub fn handle_message(
    state: &AppState,
    author: UserId,
    text: &str,
    author_is_bot: bool,
) -> Vec<ResponseDirective> {
    if author_is_bot {
        return Vec::new();
    }

    if let Err(err) = state.store.add_xp(author, XP_PER_MESSAGE) {
        warn!(%author, %err, "per-message XP grant rejected");
    }

    triggers::evaluate(text, author, author_is_bot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directives::EmojiKey;

    const AUTHOR: UserId = UserId(55);

    #[tokio::test]
    async fn every_message_earns_xp_even_without_a_trigger() {
        let (state, _outbound) = AppState::for_tests();

        assert!(handle_message(&state, AUTHOR, "quiet message", false).is_empty());
        assert!(handle_message(&state, AUTHOR, "another one", false).is_empty());
        assert_eq!(state.store.get_xp(AUTHOR), 2 * XP_PER_MESSAGE as u64);
    }

    #[tokio::test]
    async fn triggers_and_xp_both_run() {
        let (state, _outbound) = AppState::for_tests();

        let directives = handle_message(&state, AUTHOR, "awesome work", false);
        assert_eq!(
            directives,
            vec![ResponseDirective::Reaction(EmojiKey::Fire)]
        );
        assert_eq!(state.store.get_xp(AUTHOR), XP_PER_MESSAGE as u64);
    }

    #[tokio::test]
    async fn bot_messages_earn_nothing_and_trigger_nothing() {
        let (state, _outbound) = AppState::for_tests();

        assert!(handle_message(&state, AUTHOR, "awesome", true).is_empty());
        assert_eq!(state.store.get_xp(AUTHOR), 0);
    }
}
