//! Keyword trigger engine for free-text messages.
//!
//! Case-insensitive substring matching over an ordered rule table.
//! Every matching rule emits its directive; rules are independent and
//! never short-circuit each other. Messages authored by the bot itself
//! are ignored entirely so the engine can't loop on its own output.

use crate::directives::{EmojiKey, ResponseDirective, UserId};

enum RuleAction {
    /// Text reply; `{mention}` is replaced with the sender's mention.
    Reply(&'static str),
    React(EmojiKey),
}

struct TriggerRule {
    /// Lowercase needle matched against the lowercased message.
    needle: &'static str,
    action: RuleAction,
}

const RULES: &[TriggerRule] = &[
    TriggerRule {
        needle: "hello",
        action: RuleAction::Reply(
            "✨ Hello {mention}! Welcome to the studio. Need help? Try /services 🚀",
        ),
    },
    TriggerRule {
        needle: "thanks",
        action: RuleAction::Reply("🌟 You're welcome, {mention}! Glad to help!"),
    },
    TriggerRule {
        needle: "awesome",
        action: RuleAction::React(EmojiKey::Fire),
    },
    TriggerRule {
        needle: "cool",
        action: RuleAction::React(EmojiKey::StarStruck),
    },
    TriggerRule {
        needle: "great job",
        action: RuleAction::React(EmojiKey::ThumbsUp),
    },
];

/// Scan a message against the rule table.
pub fn evaluate(text: &str, author: UserId, author_is_bot: bool) -> Vec<ResponseDirective> {
    if author_is_bot {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    RULES
        .iter()
        .filter(|rule| lowered.contains(rule.needle))
        .map(|rule| match &rule.action {
            RuleAction::Reply(template) => {
                ResponseDirective::TextReply(template.replace("{mention}", &author.mention()))
            }
            RuleAction::React(emoji) => ResponseDirective::Reaction(*emoji),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR: UserId = UserId(77);

    #[test]
    fn multiple_rules_all_fire() {
        let directives = evaluate("awesome, that's cool!", AUTHOR, false);
        assert_eq!(
            directives,
            vec![
                ResponseDirective::Reaction(EmojiKey::Fire),
                ResponseDirective::Reaction(EmojiKey::StarStruck),
            ]
        );
    }

    #[test]
    fn bot_authors_are_ignored() {
        assert!(evaluate("hello, awesome, great job", AUTHOR, true).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let directives = evaluate("HELLO there", AUTHOR, false);
        assert_eq!(directives.len(), 1);
        assert!(matches!(
            &directives[0],
            ResponseDirective::TextReply(text) if text.contains(&AUTHOR.mention())
        ));
    }

    #[test]
    fn great_job_reacts_with_thumbs_up() {
        let directives = evaluate("Great Job on the launch", AUTHOR, false);
        assert_eq!(
            directives,
            vec![ResponseDirective::Reaction(EmojiKey::ThumbsUp)]
        );
    }

    #[test]
    fn unrelated_text_matches_nothing() {
        assert!(evaluate("shipping the invoice tomorrow", AUTHOR, false).is_empty());
    }
}
