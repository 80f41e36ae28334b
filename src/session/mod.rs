//! Interaction sessions - ephemeral choice-driven exchanges.
//!
//! A session presents N options, accepts exactly one selection from the
//! user who opened it, and otherwise expires. The state machine is
//! `Open -> Resolved` on the first valid selection or `Open -> Expired`
//! when the timeout fires; both are terminal and absorb every later
//! event, so whichever of "user responds" or "timer fires" comes first
//! wins the race.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::AbortHandle;
use tracing::debug;

use crate::directives::{ChannelId, UserId};

/// Opaque handle to an in-flight session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Timed question with exactly one correct option.
    Quiz,
    /// Untimed selection with no correctness notion.
    CategorySelect,
}

/// One selectable option. `correct` is only meaningful for quiz sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOption {
    pub label: String,
    pub correct: bool,
}

impl SessionOption {
    pub fn new(label: impl Into<String>, correct: bool) -> Self {
        Self {
            label: label.into(),
            correct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Open,
    Resolved,
    Expired,
}

struct Session {
    kind: SessionKind,
    initiator: UserId,
    channel: ChannelId,
    options: Vec<SessionOption>,
    created_at: DateTime<Utc>,
    state: SessionState,
    timer: Option<AbortHandle>,
}

/// Why a selection was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Someone other than the initiating user tried to answer.
    NotInitiator,
    /// The session already accepted a selection.
    AlreadyResolved,
    /// The timeout fired first.
    Expired,
    /// No such session (stale or redelivered platform callback).
    UnknownSession,
    /// Option index outside the presented set.
    UnknownOption,
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub kind: SessionKind,
    pub label: String,
    pub correct: bool,
    /// Label of the correct option, when the session has one.
    pub correct_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Resolution),
    Rejected(RejectReason),
}

/// What an expiry needs to report back to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiredSession {
    pub channel: ChannelId,
    pub correct_label: Option<String>,
}

/// Registry of in-flight sessions.
///
/// Each session sits behind its own mutex, so `resolve` and `expire`
/// race to a single authoritative state transition. Terminal sessions
/// stay registered so late selections report `AlreadyResolved` or
/// `Expired` instead of vanishing.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<SessionId, Mutex<Session>>>,
    next_id: Arc<AtomicU64>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session. `options` must be non-empty.
    pub fn open(
        &self,
        kind: SessionKind,
        initiator: UserId,
        channel: ChannelId,
        options: Vec<SessionOption>,
    ) -> SessionId {
        debug_assert!(!options.is_empty(), "session opened with no options");

        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions.insert(
            id,
            Mutex::new(Session {
                kind,
                initiator,
                channel,
                options,
                created_at: Utc::now(),
                state: SessionState::Open,
                timer: None,
            }),
        );
        debug!(session = id.0, ?kind, user = %initiator, "session opened");
        id
    }

    /// Attach a cancellable expiry timer to an open session.
    ///
    /// If the session already left `Open` (resolution beat the caller),
    /// the timer is aborted immediately.
    pub fn attach_timer(&self, id: SessionId, handle: AbortHandle) {
        match self.sessions.get(&id) {
            Some(entry) => {
                let mut session = entry.lock();
                if session.state == SessionState::Open {
                    session.timer = Some(handle);
                } else {
                    handle.abort();
                }
            }
            None => handle.abort(),
        }
    }

    /// Apply a selection. Exactly one resolution is ever accepted; the
    /// expiry timer is cancelled on acceptance.
    pub fn resolve(&self, id: SessionId, user: UserId, choice: usize) -> Outcome {
        let Some(entry) = self.sessions.get(&id) else {
            debug!(session = id.0, "selection for unknown session");
            return Outcome::Rejected(RejectReason::UnknownSession);
        };
        let mut session = entry.lock();

        match session.state {
            SessionState::Resolved => return Outcome::Rejected(RejectReason::AlreadyResolved),
            SessionState::Expired => return Outcome::Rejected(RejectReason::Expired),
            SessionState::Open => {}
        }
        if user != session.initiator {
            return Outcome::Rejected(RejectReason::NotInitiator);
        }
        let (label, correct) = match session.options.get(choice) {
            Some(opt) => (opt.label.clone(), opt.correct),
            None => return Outcome::Rejected(RejectReason::UnknownOption),
        };

        session.state = SessionState::Resolved;
        if let Some(timer) = session.timer.take() {
            timer.abort();
        }
        let correct_label = session
            .options
            .iter()
            .find(|opt| opt.correct)
            .map(|opt| opt.label.clone());

        let age = Utc::now().signed_duration_since(session.created_at);
        debug!(
            session = id.0,
            %label,
            correct,
            age_ms = age.num_milliseconds(),
            "session resolved"
        );
        Outcome::Accepted(Resolution {
            kind: session.kind,
            label,
            correct,
            correct_label,
        })
    }

    /// Expire a session. Returns what to reveal if the session was still
    /// open, `None` if resolution won the race (or the id is unknown).
    pub fn expire(&self, id: SessionId) -> Option<ExpiredSession> {
        let entry = self.sessions.get(&id)?;
        let mut session = entry.lock();
        if session.state != SessionState::Open {
            return None;
        }
        session.state = SessionState::Expired;
        session.timer = None;

        let age = Utc::now().signed_duration_since(session.created_at);
        debug!(session = id.0, age_ms = age.num_milliseconds(), "session expired");
        Some(ExpiredSession {
            channel: session.channel,
            correct_label: session
                .options
                .iter()
                .find(|opt| opt.correct)
                .map(|opt| opt.label.clone()),
        })
    }
}
