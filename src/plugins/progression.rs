//! Progression commands: /xp and /daily_challenge.

use tracing::warn;

use crate::bot::dispatcher::AppState;
use crate::directives::{CardField, ResponseDirective, UserId};
use crate::state::UserStateStore;

/// Flat XP granted by /daily_challenge.
pub const XP_DAILY_CHALLENGE: i64 = 20;

/// Handle /xp (alias /xp_status).
pub fn xp_status(store: &UserStateStore, user: UserId) -> Vec<ResponseDirective> {
    let xp = store.get_xp(user);
    let level = store.get_level(user);
    vec![ResponseDirective::RichCard {
        title: "🏆 XP Status".to_string(),
        fields: vec![
            CardField::new("XP", xp.to_string()),
            CardField::new("Level", level.to_string()),
        ],
        footer: None,
        image_url: None,
    }]
}

/// Handle /daily_challenge - a uniformly random challenge plus a flat
/// XP grant.
pub fn daily_challenge(state: &AppState, user: UserId) -> Vec<ResponseDirective> {
    let challenge = state.catalogs.random_challenge().to_string();
    if let Err(err) = state.store.add_xp(user, XP_DAILY_CHALLENGE) {
        warn!(%user, %err, "daily challenge XP grant rejected");
    }

    vec![ResponseDirective::RichCard {
        title: "💡 Daily Challenge".to_string(),
        fields: vec![
            CardField::new("Challenge", challenge),
            CardField::new("Reward", format!("+{XP_DAILY_CHALLENGE} XP")),
        ],
        footer: None,
        image_url: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::dispatcher::AppState;

    const USER: UserId = UserId(5);

    #[test]
    fn xp_status_reports_derived_level() {
        let store = UserStateStore::new();
        store.add_xp(USER, 250).unwrap();

        let directives = xp_status(&store, USER);
        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("xp status must render as a card");
        };
        assert_eq!(fields[0], CardField::new("XP", "250"));
        assert_eq!(fields[1], CardField::new("Level", "2"));
    }

    #[tokio::test]
    async fn daily_challenge_grants_flat_xp() {
        let (state, _outbound) = AppState::for_tests();

        let directives = daily_challenge(&state, USER);
        assert_eq!(state.store.get_xp(USER), XP_DAILY_CHALLENGE as u64);

        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("challenge must render as a card");
        };
        assert!(state.catalogs.challenges.contains(&fields[0].value));
    }
}
