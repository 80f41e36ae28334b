//! Help command - renders the static command catalog.

use crate::bot::dispatcher::AppState;
use crate::directives::{CardField, ResponseDirective};
use crate::plugins::{COMMANDS, CommandSpec};

/// Handle /help.
pub fn help_command(state: &AppState) -> Vec<ResponseDirective> {
    vec![ResponseDirective::RichCard {
        title: format!("📖 {} Commands", state.config.bot_name),
        fields: COMMANDS
            .iter()
            .map(|spec| CardField::new(usage(spec), spec.description))
            .collect(),
        footer: Some(format!(
            "{} - your gateway to amazing projects!",
            state.config.bot_name
        )),
        image_url: None,
    }]
}

fn usage(spec: &CommandSpec) -> String {
    let mut usage = format!("/{}", spec.name);
    for arg in spec.args {
        usage.push_str(&format!(" <{}>", arg.name));
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn help_lists_every_declared_command() {
        let (state, _outbound) = AppState::for_tests();

        let directives = help_command(&state);
        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("help must render as a card");
        };
        assert_eq!(fields.len(), COMMANDS.len());
        assert!(fields.iter().any(|f| f.name == "/rps <choice>"));
        assert!(
            fields
                .iter()
                .any(|f| f.name == "/set_profile <bio> <skills> <interests>")
        );
    }
}
