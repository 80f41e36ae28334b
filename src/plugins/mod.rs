//! Command plugins.
//!
//! Add a new command by:
//! 1. Creating a handler in this directory
//! 2. Adding its `CommandSpec` to `COMMANDS` below
//! 3. Adding a variant to `Command` and a branch to `dispatch()`
//!
//! Arguments arrive from the platform as a name -> value bag and are
//! validated here against a static per-command schema, so handlers only
//! ever see well-formed, typed input.

pub mod games;
pub mod help;
pub mod motivate;
pub mod profile;
pub mod progression;
pub mod quiz;
pub mod studio;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::bot::dispatcher::AppState;
use crate::directives::{ChannelId, ResponseDirective, UserId};
use games::RpsChoice;

/// A structured command invocation, as delivered by the platform.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub name: String,
    pub user: UserId,
    pub channel: ChannelId,
    pub args: HashMap<String, String>,
}

/// Declared parameter of a command.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub required: bool,
}

const fn required(name: &'static str) -> ArgSpec {
    ArgSpec { name, required: true }
}

/// Static command declaration: name, help text, parameter schema.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgSpec],
}

/// The full command catalog. `/help` renders straight from this table.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "help", description: "List all available commands", args: &[] },
    CommandSpec { name: "about_me", description: "Learn more about the studio", args: &[] },
    CommandSpec {
        name: "set_profile",
        description: "Set your profile information",
        args: &[required("bio"), required("skills"), required("interests")],
    },
    CommandSpec { name: "view_profile", description: "View your profile information", args: &[] },
    CommandSpec { name: "xp", description: "Check your XP and level", args: &[] },
    CommandSpec { name: "daily_challenge", description: "Get a daily coding/design challenge (+20 XP)", args: &[] },
    CommandSpec { name: "quiz", description: "Test your knowledge with a quiz", args: &[] },
    CommandSpec {
        name: "rps",
        description: "Play rock-paper-scissors against the bot",
        args: &[required("choice")],
    },
    CommandSpec {
        name: "ask",
        description: "Ask the studio assistant a question",
        args: &[required("question")],
    },
    CommandSpec {
        name: "estimate",
        description: "Get an estimated project price",
        args: &[required("project_type")],
    },
    CommandSpec { name: "faq", description: "Answers to common questions", args: &[] },
    CommandSpec { name: "services", description: "Explore offered services", args: &[] },
    CommandSpec { name: "portfolio", description: "View recent projects", args: &[] },
    CommandSpec { name: "contact", description: "Get in touch with the studio", args: &[] },
    CommandSpec { name: "motivate", description: "Get a motivational quote", args: &[] },
];

/// Validation/dispatch errors. All of these are recoverable: the engine
/// turns them into a user-visible reply, never a fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: /{0}")]
    UnknownCommand(String),

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid value {value:?} for {arg}: expected {expected}")]
    InvalidArgumentValue {
        arg: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// A validated, typed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    AboutMe,
    SetProfile { bio: String, skills: String, interests: String },
    ViewProfile,
    Xp,
    DailyChallenge,
    Quiz,
    Rps(RpsChoice),
    Ask(String),
    Estimate(String),
    Faq,
    Services,
    Portfolio,
    Contact,
    Motivate,
}

impl Command {
    /// Validate an invocation against the schema and build the typed form.
    pub fn parse(inv: &CommandInvocation) -> Result<Self, CommandError> {
        // /xp_status is a historical alias for /xp.
        let name = if inv.name == "xp_status" { "xp" } else { inv.name.as_str() };

        let spec = COMMANDS
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| CommandError::UnknownCommand(inv.name.clone()))?;

        let arg = |spec_arg: &ArgSpec| -> Result<String, CommandError> {
            match inv.args.get(spec_arg.name).map(|v| v.trim()) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ if spec_arg.required => Err(CommandError::MissingArgument(spec_arg.name)),
                _ => Ok(String::new()),
            }
        };
        for spec_arg in spec.args {
            if spec_arg.required {
                arg(spec_arg)?;
            }
        }

        Ok(match spec.name {
            "help" => Command::Help,
            "about_me" => Command::AboutMe,
            "set_profile" => Command::SetProfile {
                bio: arg(&spec.args[0])?,
                skills: arg(&spec.args[1])?,
                interests: arg(&spec.args[2])?,
            },
            "view_profile" => Command::ViewProfile,
            "xp" => Command::Xp,
            "daily_challenge" => Command::DailyChallenge,
            "quiz" => Command::Quiz,
            "rps" => {
                let value = arg(&spec.args[0])?;
                let choice = value.parse::<RpsChoice>().map_err(|_| {
                    CommandError::InvalidArgumentValue {
                        arg: "choice",
                        value,
                        expected: "rock, paper or scissors",
                    }
                })?;
                Command::Rps(choice)
            }
            "ask" => Command::Ask(arg(&spec.args[0])?),
            "estimate" => Command::Estimate(arg(&spec.args[0])?),
            "faq" => Command::Faq,
            "services" => Command::Services,
            "portfolio" => Command::Portfolio,
            "contact" => Command::Contact,
            "motivate" => Command::Motivate,
            // COMMANDS and this match are maintained together.
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        })
    }
}

/// Validate and route an invocation to its handler.
pub fn dispatch(
    state: &AppState,
    inv: &CommandInvocation,
) -> Result<Vec<ResponseDirective>, CommandError> {
    let command = Command::parse(inv)?;
    debug!(command = inv.name, user = %inv.user, "dispatching command");

    Ok(match command {
        Command::Help => help::help_command(state),
        Command::AboutMe => studio::about_me(&state.catalogs),
        Command::SetProfile { bio, skills, interests } => {
            profile::set_profile(&state.store, inv.user, bio, skills, interests)
        }
        Command::ViewProfile => profile::view_profile(&state.store, inv.user),
        Command::Xp => progression::xp_status(&state.store, inv.user),
        Command::DailyChallenge => progression::daily_challenge(state, inv.user),
        Command::Quiz => quiz::quiz_command(state, inv.user, inv.channel),
        Command::Rps(choice) => games::rps_command(choice),
        Command::Ask(question) => games::ask_command(&state.catalogs, &question),
        Command::Estimate(project) => studio::estimate(&state.catalogs, &project),
        Command::Faq => studio::faq(&state.catalogs),
        Command::Services => vec![state.catalogs.services.to_directive()],
        Command::Portfolio => vec![state.catalogs.portfolio.to_directive()],
        Command::Contact => vec![state.catalogs.contact.to_directive()],
        Command::Motivate => motivate::motivate_command(state, inv.user, inv.channel),
    })
}
