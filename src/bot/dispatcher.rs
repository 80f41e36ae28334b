//! Event dispatcher.
//!
//! Routes inbound platform events to the command layer, the message
//! pipeline, session resolution or the welcome handler, and converts
//! recoverable errors into user-visible replies. Nothing here ever
//! propagates a fault out of an event.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::catalogs::Catalogs;
use crate::config::Config;
use crate::directives::{ChannelId, Outbound, ResponseDirective, UserId};
use crate::events;
use crate::plugins::{self, CommandInvocation};
use crate::session::{Outcome, RejectReason, SessionId, SessionKind, SessionRegistry};
use crate::state::UserStateStore;

/// Shared application state. Cloning is cheap; every handler task gets
/// its own copy.
#[derive(Clone)]
pub struct AppState {
    /// Environment configuration.
    pub config: Arc<Config>,

    /// Static content tables, immutable after startup.
    pub catalogs: Arc<Catalogs>,

    /// Per-user profile and XP store.
    pub store: UserStateStore,

    /// In-flight interaction sessions.
    pub sessions: SessionRegistry,

    /// Outbox towards the presentation layer.
    pub outbound: mpsc::Sender<Outbound>,
}

impl AppState {
    pub fn new(config: Arc<Config>, catalogs: Arc<Catalogs>, outbound: mpsc::Sender<Outbound>) -> Self {
        Self {
            config,
            catalogs,
            store: UserStateStore::new(),
            sessions: SessionRegistry::new(),
            outbound,
        }
    }

    /// Fresh state over the embedded catalogs plus the outbox receiver,
    /// for tests that exercise handlers directly.
    #[cfg(test)]
    pub fn for_tests() -> (Self, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel(64);
        let state = Self::new(
            Arc::new(Config::default()),
            Arc::new(Catalogs::load().expect("embedded catalogs must load")),
            tx,
        );
        (state, rx)
    }
}

/// An inbound platform event, as delivered by the gateway.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// Structured command invocation.
    Command(CommandInvocation),

    /// Free-text message.
    Message {
        channel: ChannelId,
        author: UserId,
        text: String,
        author_is_bot: bool,
    },

    /// A choice made in a previously presented prompt (the platform's
    /// callback-query analogue).
    Selection {
        session: SessionId,
        user: UserId,
        choice: usize,
        channel: ChannelId,
    },

    /// A user joined the guild.
    MemberJoined {
        channel: ChannelId,
        user: UserId,
        display_name: String,
    },
}

/// Handle one inbound event to completion.
pub async fn handle_event(state: AppState, event: InboundEvent) -> anyhow::Result<()> {
    match event {
        InboundEvent::Command(inv) => {
            let channel = inv.channel;
            let directives = match plugins::dispatch(&state, &inv) {
                Ok(directives) => directives,
                Err(err) => {
                    debug!(command = inv.name, %err, "command rejected");
                    vec![ResponseDirective::TextReply(format!("⚠️ {err}"))]
                }
            };
            send_all(&state, channel, directives).await;
        }
        InboundEvent::Message { channel, author, text, author_is_bot } => {
            let directives = events::handle_message(&state, author, &text, author_is_bot);
            send_all(&state, channel, directives).await;
        }
        InboundEvent::Selection { session, user, choice, channel } => {
            let directives = handle_selection(&state, session, user, choice);
            send_all(&state, channel, directives).await;
        }
        InboundEvent::MemberJoined { channel, display_name, .. } => {
            let directives = events::welcome::member_joined(&state.catalogs, &display_name);
            send_all(&state, channel, directives).await;
        }
    }
    Ok(())
}

/// Resolve a selection against its session and build the follow-up.
fn handle_selection(
    state: &AppState,
    session: SessionId,
    user: UserId,
    choice: usize,
) -> Vec<ResponseDirective> {
    match state.sessions.resolve(session, user, choice) {
        Outcome::Accepted(resolution) => match resolution.kind {
            SessionKind::Quiz => plugins::quiz::on_answer(state, user, &resolution),
            SessionKind::CategorySelect => {
                plugins::motivate::on_choice(&state.catalogs, &resolution.label)
            }
        },
        Outcome::Rejected(reason) => match reason {
            RejectReason::NotInitiator => vec![ResponseDirective::TextReply(
                "🙅 Only the person who started this can answer it.".to_string(),
            )],
            RejectReason::AlreadyResolved => vec![ResponseDirective::TextReply(
                "This one has already been answered.".to_string(),
            )],
            RejectReason::Expired => vec![ResponseDirective::TextReply(
                "⏰ Too late - this one has expired.".to_string(),
            )],
            // Stale or redelivered callbacks; nothing useful to say.
            RejectReason::UnknownSession | RejectReason::UnknownOption => {
                debug!(session = session.0, ?reason, "selection dropped");
                Vec::new()
            }
        },
    }
}

async fn send_all(state: &AppState, channel: ChannelId, directives: Vec<ResponseDirective>) {
    for directive in directives {
        if state
            .outbound
            .send(Outbound { channel, directive })
            .await
            .is_err()
        {
            warn!(%channel, "engine outbox closed, dropping directive");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const USER: UserId = UserId(1);
    const OTHER: UserId = UserId(2);
    const CHANNEL: ChannelId = ChannelId(1);

    fn invocation(name: &str) -> CommandInvocation {
        CommandInvocation {
            name: name.to_string(),
            user: USER,
            channel: CHANNEL,
            args: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn unknown_command_becomes_a_visible_reply() {
        let (state, mut outbound) = AppState::for_tests();

        handle_event(state, InboundEvent::Command(invocation("frobnicate")))
            .await
            .unwrap();

        let reply = outbound.recv().await.unwrap();
        assert!(matches!(
            reply.directive,
            ResponseDirective::TextReply(ref text)
                if text.contains("unknown command") && text.contains("frobnicate")
        ));
    }

    #[tokio::test]
    async fn member_join_welcomes_by_name() {
        let (state, mut outbound) = AppState::for_tests();

        handle_event(
            state,
            InboundEvent::MemberJoined {
                channel: CHANNEL,
                user: USER,
                display_name: "Priya".to_string(),
            },
        )
        .await
        .unwrap();

        let reply = outbound.recv().await.unwrap();
        assert_eq!(reply.channel, CHANNEL);
        assert!(matches!(
            reply.directive,
            ResponseDirective::RichCard { ref fields, .. } if fields[0].value.contains("Priya")
        ));
    }

    #[tokio::test]
    async fn selection_by_non_initiator_is_rejected_visibly() {
        let (state, mut outbound) = AppState::for_tests();

        handle_event(state.clone(), InboundEvent::Command(invocation("motivate")))
            .await
            .unwrap();
        let prompt = outbound.recv().await.unwrap();
        let ResponseDirective::ChoicePrompt { session, .. } = prompt.directive else {
            panic!("motivate must open a choice prompt");
        };

        handle_event(
            state.clone(),
            InboundEvent::Selection { session, user: OTHER, choice: 0, channel: CHANNEL },
        )
        .await
        .unwrap();
        let reply = outbound.recv().await.unwrap();
        assert!(matches!(
            reply.directive,
            ResponseDirective::TextReply(ref text) if text.contains("Only the person")
        ));

        // The initiator can still resolve it afterwards.
        handle_event(
            state,
            InboundEvent::Selection { session, user: USER, choice: 0, channel: CHANNEL },
        )
        .await
        .unwrap();
        let follow_up = outbound.recv().await.unwrap();
        assert!(matches!(follow_up.directive, ResponseDirective::RichCard { .. }));
    }

    #[tokio::test]
    async fn stale_selection_is_dropped_silently() {
        let (state, mut outbound) = AppState::for_tests();

        handle_event(
            state,
            InboundEvent::Selection {
                session: SessionId(4242),
                user: USER,
                choice: 0,
                channel: CHANNEL,
            },
        )
        .await
        .unwrap();
        // Outbox stays empty; try_recv sees no queued directive.
        assert!(outbound.try_recv().is_err());
    }
}
