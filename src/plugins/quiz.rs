//! Quiz command and answer handling.
//!
//! /quiz picks a random question, shuffles the answer in with its
//! decoys and opens a timed session. The selection comes back from the
//! platform as an `InboundEvent::Selection`; if the timer wins the race
//! instead, the correct answer is revealed in the channel.

use rand::seq::SliceRandom;
use tracing::warn;

use crate::bot::dispatcher::AppState;
use crate::directives::{ChannelId, Outbound, ResponseDirective, UserId};
use crate::session::{Resolution, SessionKind, SessionOption};

/// XP awarded for a correct quiz answer.
pub const XP_QUIZ_CORRECT: i64 = 50;

/// Handle /quiz - open a timed choice session.
pub fn quiz_command(state: &AppState, user: UserId, channel: ChannelId) -> Vec<ResponseDirective> {
    let question = state.catalogs.random_quiz();

    // Shuffle the correct answer in with the decoys; the correctness tag
    // travels with the option, not its position.
    let mut options: Vec<SessionOption> = Vec::with_capacity(1 + question.decoys.len());
    options.push(SessionOption::new(question.answer.clone(), true));
    options.extend(
        question
            .decoys
            .iter()
            .map(|d| SessionOption::new(d.clone(), false)),
    );
    options.shuffle(&mut rand::thread_rng());

    let labels: Vec<String> = options.iter().map(|o| o.label.clone()).collect();
    let id = state
        .sessions
        .open(SessionKind::Quiz, user, channel, options);
    arm_expiry(state, id);

    vec![ResponseDirective::ChoicePrompt {
        prompt: format!("🎯 Quiz Time!\n{}", question.question),
        options: labels,
        session: id,
    }]
}

/// Schedule the cancellable expiry timer. Resolution aborts it; if it
/// fires first, the correct answer is revealed.
fn arm_expiry(state: &AppState, id: crate::session::SessionId) {
    let registry = state.sessions.clone();
    let outbound = state.outbound.clone();
    let timeout = state.config.quiz_timeout;

    let task = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        if let Some(expired) = registry.expire(id) {
            let text = match expired.correct_label {
                Some(answer) => format!("⏰ Time's up! The correct answer was: {answer}"),
                None => "⏰ Time's up!".to_string(),
            };
            if outbound
                .send(Outbound {
                    channel: expired.channel,
                    directive: ResponseDirective::TextReply(text),
                })
                .await
                .is_err()
            {
                warn!(session = id.0, "engine outbox closed before quiz reveal");
            }
        }
    });
    state.sessions.attach_timer(id, task.abort_handle());
}

/// Build the follow-up for an accepted quiz answer.
pub fn on_answer(state: &AppState, user: UserId, resolution: &Resolution) -> Vec<ResponseDirective> {
    if resolution.correct {
        let total = match state.store.add_xp(user, XP_QUIZ_CORRECT) {
            Ok(total) => total,
            Err(err) => {
                warn!(%user, %err, "quiz XP grant rejected");
                state.store.get_xp(user)
            }
        };
        vec![ResponseDirective::TextReply(format!(
            "✅ Correct Answer! +{XP_QUIZ_CORRECT} XP (total: {total})"
        ))]
    } else {
        let reveal = resolution
            .correct_label
            .as_deref()
            .unwrap_or("(unknown)");
        vec![ResponseDirective::TextReply(format!(
            "❌ Not quite! The correct answer was: {reveal}"
        ))]
    }
}
