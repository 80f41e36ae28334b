//! Profile commands: /set_profile and /view_profile.

use crate::directives::{CardField, ResponseDirective, UserId};
use crate::state::UserStateStore;

/// Handle /set_profile - wholesale overwrite of the caller's profile.
pub fn set_profile(
    store: &UserStateStore,
    user: UserId,
    bio: String,
    skills: String,
    interests: String,
) -> Vec<ResponseDirective> {
    store.set_profile(user, bio, skills, interests);
    vec![ResponseDirective::TextReply(
        "✅ Profile updated successfully!".to_string(),
    )]
}

/// Handle /view_profile.
pub fn view_profile(store: &UserStateStore, user: UserId) -> Vec<ResponseDirective> {
    if !store.has_profile(user) {
        return vec![ResponseDirective::TextReply(
            "You haven't set a profile yet. Use /set_profile to create one.".to_string(),
        )];
    }

    let profile = store.get_profile(user);
    vec![ResponseDirective::RichCard {
        title: "👤 Your Profile".to_string(),
        fields: vec![
            CardField::new("Bio", profile.bio),
            CardField::new("Skills", profile.skills),
            CardField::new("Interests", profile.interests),
        ],
        footer: None,
        image_url: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: UserId = UserId(42);

    #[test]
    fn view_before_set_reports_no_profile() {
        let store = UserStateStore::new();
        let directives = view_profile(&store, USER);
        assert!(matches!(
            &directives[0],
            ResponseDirective::TextReply(text) if text.contains("haven't set a profile")
        ));
    }

    #[test]
    fn view_after_set_shows_all_fields_in_order() {
        let store = UserStateStore::new();
        set_profile(&store, USER, "dev".into(), "rust".into(), "chess".into());

        let directives = view_profile(&store, USER);
        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("profile must render as a card");
        };
        assert_eq!(fields[0], CardField::new("Bio", "dev"));
        assert_eq!(fields[1], CardField::new("Skills", "rust"));
        assert_eq!(fields[2], CardField::new("Interests", "chess"));
    }
}
