//! Response directives - the contract with the presentation layer.
//!
//! The core never talks to a chat platform directly. Handlers produce
//! [`ResponseDirective`] values and the engine hands them, paired with a
//! target channel, to a [`Presenter`] supplied by the platform gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// Platform-assigned stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Inline mention token for reply text. The gateway renders it into
    /// the platform's native mention syntax.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform-assigned channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reaction emoji, named rather than raw so the gateway can map them
/// to whatever the platform expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmojiKey {
    Fire,
    StarStruck,
    ThumbsUp,
}

impl EmojiKey {
    pub fn glyph(&self) -> &'static str {
        match self {
            EmojiKey::Fire => "\u{1F525}",
            EmojiKey::StarStruck => "\u{1F929}",
            EmojiKey::ThumbsUp => "\u{1F44D}",
        }
    }
}

/// One name/value pair on a rich card. Order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    pub name: String,
    pub value: String,
}

impl CardField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Abstract description of a response, independent of rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseDirective {
    /// Plain text reply in the originating channel.
    TextReply(String),

    /// Structured card with ordered fields.
    RichCard {
        title: String,
        fields: Vec<CardField>,
        footer: Option<String>,
        image_url: Option<String>,
    },

    /// Interactive choice UI. The gateway reports the selection back as
    /// an `InboundEvent::Selection` carrying the session id.
    ChoicePrompt {
        prompt: String,
        options: Vec<String>,
        session: SessionId,
    },

    /// Emoji reaction on the triggering message.
    Reaction(EmojiKey),
}

/// A directive addressed to a channel, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub channel: ChannelId,
    pub directive: ResponseDirective,
}

/// Rendering boundary implemented by the platform gateway.
pub trait Presenter: Send + Sync {
    fn present(&self, outbound: Outbound);
}

/// Presenter that logs directives instead of rendering them.
///
/// Used by the binary when no platform gateway is attached, and handy in
/// integration smoke runs.
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn present(&self, outbound: Outbound) {
        match &outbound.directive {
            ResponseDirective::Reaction(emoji) => {
                tracing::info!(channel = %outbound.channel, reaction = emoji.glyph(), "directive");
            }
            directive => {
                tracing::info!(channel = %outbound.channel, ?directive, "directive");
            }
        }
    }
}
