//! Motivational quote command.
//!
//! /motivate opens an untimed category-select session; the chosen
//! category resolves to a random quote from that category's table.

use crate::bot::dispatcher::AppState;
use crate::catalogs::Catalogs;
use crate::directives::{CardField, ChannelId, ResponseDirective, UserId};
use crate::session::{SessionKind, SessionOption};

/// Handle /motivate - present the quote categories.
pub fn motivate_command(
    state: &AppState,
    user: UserId,
    channel: ChannelId,
) -> Vec<ResponseDirective> {
    let categories = state.catalogs.quote_categories();
    let options = categories
        .iter()
        .map(|c| SessionOption::new(c.clone(), false))
        .collect();

    // Category selection waits indefinitely; no timer is armed.
    let id = state
        .sessions
        .open(SessionKind::CategorySelect, user, channel, options);

    vec![ResponseDirective::ChoicePrompt {
        prompt: "Select a category:".to_string(),
        options: categories,
        session: id,
    }]
}

/// Build the follow-up for an accepted category selection.
pub fn on_choice(catalogs: &Catalogs, category: &str) -> Vec<ResponseDirective> {
    match catalogs.random_quote(category) {
        Some(quote) => vec![ResponseDirective::RichCard {
            title: format!("💡 {category} Quote"),
            fields: vec![CardField::new("Quote", quote)],
            footer: None,
            image_url: None,
        }],
        // Categories come from the session options, so this only happens
        // if the catalog changed shape; degrade to a plain reply.
        None => vec![ResponseDirective::TextReply(
            "No quotes in that category yet.".to_string(),
        )],
    }
}
