//! Small games and canned-answer commands: /rps and /ask.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;

use crate::catalogs::Catalogs;
use crate::directives::{CardField, ResponseDirective};

/// A rock-paper-scissors hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsChoice {
    Rock,
    Paper,
    Scissors,
}

pub const RPS_CHOICES: [RpsChoice; 3] = [RpsChoice::Rock, RpsChoice::Paper, RpsChoice::Scissors];

impl RpsChoice {
    /// Standard precedence: rock beats scissors, scissors beats paper,
    /// paper beats rock.
    pub fn beats(&self, other: RpsChoice) -> bool {
        matches!(
            (self, other),
            (RpsChoice::Rock, RpsChoice::Scissors)
                | (RpsChoice::Scissors, RpsChoice::Paper)
                | (RpsChoice::Paper, RpsChoice::Rock)
        )
    }

    fn emoji(&self) -> &'static str {
        match self {
            RpsChoice::Rock => "\u{1FAA8}",
            RpsChoice::Paper => "\u{1F4C4}",
            RpsChoice::Scissors => "\u{2702}\u{FE0F}",
        }
    }
}

impl fmt::Display for RpsChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RpsChoice::Rock => "rock",
            RpsChoice::Paper => "paper",
            RpsChoice::Scissors => "scissors",
        };
        write!(f, "{name}")
    }
}

impl FromStr for RpsChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(RpsChoice::Rock),
            "paper" => Ok(RpsChoice::Paper),
            "scissors" => Ok(RpsChoice::Scissors),
            _ => Err(()),
        }
    }
}

/// Result of one round, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duel {
    Win,
    Lose,
    Draw,
}

pub fn duel(player: RpsChoice, bot: RpsChoice) -> Duel {
    if player == bot {
        Duel::Draw
    } else if player.beats(bot) {
        Duel::Win
    } else {
        Duel::Lose
    }
}

/// Handle /rps - play one round against a uniformly sampled bot hand.
pub fn rps_command(player: RpsChoice) -> Vec<ResponseDirective> {
    let bot = *RPS_CHOICES
        .choose(&mut rand::thread_rng())
        .unwrap_or(&RpsChoice::Rock);
    vec![ResponseDirective::TextReply(round_text(player, bot))]
}

fn round_text(player: RpsChoice, bot: RpsChoice) -> String {
    let verdict = match duel(player, bot) {
        Duel::Win => "You win!",
        Duel::Lose => "I win!",
        Duel::Draw => "It's a draw!",
    };
    format!(
        "You chose {} {player}, I chose {} {bot}. {verdict}",
        player.emoji(),
        bot.emoji()
    )
}

/// Handle /ask - a canned response chosen uniformly at random. No real
/// inference happens here.
pub fn ask_command(catalogs: &Catalogs, _question: &str) -> Vec<ResponseDirective> {
    vec![ResponseDirective::RichCard {
        title: "🤖 AI Response".to_string(),
        fields: vec![CardField::new("Answer", catalogs.random_ask_reply())],
        footer: None,
        image_url: catalogs.ask.image_url.clone(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_nine_combinations_follow_precedence() {
        use Duel::*;
        use RpsChoice::*;

        let expected = [
            (Rock, Rock, Draw),
            (Rock, Paper, Lose),
            (Rock, Scissors, Win),
            (Paper, Rock, Win),
            (Paper, Paper, Draw),
            (Paper, Scissors, Lose),
            (Scissors, Rock, Lose),
            (Scissors, Paper, Win),
            (Scissors, Scissors, Draw),
        ];
        for (player, bot, outcome) in expected {
            assert_eq!(duel(player, bot), outcome, "{player} vs {bot}");
        }
    }

    #[test]
    fn round_text_announces_the_verdict() {
        assert!(round_text(RpsChoice::Rock, RpsChoice::Scissors).contains("You win!"));
        assert!(round_text(RpsChoice::Rock, RpsChoice::Rock).contains("It's a draw!"));
        assert!(round_text(RpsChoice::Rock, RpsChoice::Paper).contains("I win!"));
    }

    #[test]
    fn ask_always_answers_from_the_canned_set() {
        let catalogs = Catalogs::load().unwrap();
        let directives = ask_command(&catalogs, "will it scale?");
        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("ask must answer with a card");
        };
        assert!(catalogs.ask.replies.contains(&fields[0].value));
    }
}
