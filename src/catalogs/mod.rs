//! Static content catalogs.
//!
//! Everything the command layer reads but never writes: challenges, the
//! quiz bank, quote categories, the price table, FAQ entries and the
//! studio cards. Loaded once at startup from embedded JSON (no file I/O
//! at runtime); a parse or validation failure aborts startup.

use anyhow::{Context, ensure};
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::directives::{CardField, ResponseDirective};

const CONTENT: &str = include_str!("content.json");

/// Fallback shown by /estimate for unknown project types.
pub const PRICE_FALLBACK: &str = "Custom Pricing";

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: String,
    pub decoys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteCategory {
    pub category: String,
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceEntry {
    pub project: String,
    pub range: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AskTable {
    pub replies: Vec<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// A static rich-card definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CardTemplate {
    pub title: String,
    pub fields: Vec<CardFieldTemplate>,
    pub footer: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardFieldTemplate {
    pub name: String,
    pub value: String,
}

impl CardTemplate {
    pub fn to_directive(&self) -> ResponseDirective {
        ResponseDirective::RichCard {
            title: self.title.clone(),
            fields: self
                .fields
                .iter()
                .map(|f| CardField::new(f.name.clone(), f.value.clone()))
                .collect(),
            footer: self.footer.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WelcomeTemplate {
    pub title: String,
    /// Body text; `{name}` is replaced with the member's display name.
    pub body: String,
    pub image_url: Option<String>,
}

/// All static lookup tables, immutable after load.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalogs {
    pub challenges: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub quotes: Vec<QuoteCategory>,
    pub prices: Vec<PriceEntry>,
    pub ask: AskTable,
    pub faq: Vec<FaqEntry>,
    pub about: CardTemplate,
    pub services: CardTemplate,
    pub portfolio: CardTemplate,
    pub contact: CardTemplate,
    pub welcome: WelcomeTemplate,
}

impl Catalogs {
    /// Parse and validate the embedded content. Failure here is fatal to
    /// startup - there is no degraded mode without catalogs.
    pub fn load() -> anyhow::Result<Self> {
        let catalogs: Catalogs =
            serde_json::from_str(CONTENT).context("failed to parse embedded content.json")?;
        catalogs.validate()?;
        Ok(catalogs)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.challenges.is_empty(), "challenge catalog is empty");
        ensure!(!self.quiz.is_empty(), "quiz bank is empty");
        ensure!(!self.ask.replies.is_empty(), "ask reply table is empty");
        ensure!(!self.quotes.is_empty(), "quote catalog is empty");
        for q in &self.quiz {
            ensure!(
                !q.decoys.is_empty(),
                "quiz question {:?} has no decoy options",
                q.question
            );
        }
        for c in &self.quotes {
            ensure!(!c.quotes.is_empty(), "quote category {:?} is empty", c.category);
        }
        Ok(())
    }

    /// Price range for a project type, `None` if unlisted.
    pub fn price_for(&self, project: &str) -> Option<&str> {
        self.prices
            .iter()
            .find(|p| p.project.eq_ignore_ascii_case(project))
            .map(|p| p.range.as_str())
    }

    /// Quote category names, in catalog order.
    pub fn quote_categories(&self) -> Vec<String> {
        self.quotes.iter().map(|c| c.category.clone()).collect()
    }

    pub fn random_quote(&self, category: &str) -> Option<&str> {
        let entry = self
            .quotes
            .iter()
            .find(|c| c.category.eq_ignore_ascii_case(category))?;
        entry
            .quotes
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str())
    }

    pub fn random_challenge(&self) -> &str {
        // Validated non-empty at load.
        self.challenges
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn random_quiz(&self) -> &QuizQuestion {
        self.quiz
            .choose(&mut rand::thread_rng())
            .unwrap_or(&self.quiz[0])
    }

    pub fn random_ask_reply(&self) -> &str {
        self.ask
            .replies
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_loads_and_validates() {
        let catalogs = Catalogs::load().expect("embedded content must parse");
        assert!(!catalogs.challenges.is_empty());
        assert!(catalogs.quiz.iter().all(|q| !q.decoys.is_empty()));
        assert_eq!(
            catalogs.quote_categories(),
            vec!["Success", "Perseverance", "Innovation"]
        );
    }

    #[test]
    fn price_table_matches_published_ranges() {
        let catalogs = Catalogs::load().unwrap();
        assert_eq!(catalogs.price_for("Website"), Some("$500 - $5000"));
        assert_eq!(catalogs.price_for("AI Tool"), Some("$1000 - $10000"));
        assert_eq!(catalogs.price_for("Spaceship"), None);
    }

    #[test]
    fn random_quote_respects_category() {
        let catalogs = Catalogs::load().unwrap();
        let quote = catalogs.random_quote("Perseverance").unwrap();
        let entry = catalogs
            .quotes
            .iter()
            .find(|c| c.category == "Perseverance")
            .unwrap();
        assert!(entry.quotes.iter().any(|q| q == quote));
        assert!(catalogs.random_quote("Nonsense").is_none());
    }

    #[test]
    fn card_template_renders_ordered_fields() {
        let catalogs = Catalogs::load().unwrap();
        let ResponseDirective::RichCard { title, fields, .. } = catalogs.services.to_directive()
        else {
            panic!("card template must render a rich card");
        };
        assert_eq!(title, catalogs.services.title);
        assert_eq!(fields.len(), catalogs.services.fields.len());
        assert_eq!(fields[0].name, catalogs.services.fields[0].name);
    }
}
