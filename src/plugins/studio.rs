//! Studio information commands: /about_me, /faq, /estimate.
//!
//! /services, /portfolio and /contact render their card templates
//! directly from the catalogs and need no handler of their own.

use crate::catalogs::{Catalogs, PRICE_FALLBACK};
use crate::directives::{CardField, ResponseDirective};

/// Handle /about_me.
pub fn about_me(catalogs: &Catalogs) -> Vec<ResponseDirective> {
    vec![catalogs.about.to_directive()]
}

/// Handle /faq - every entry becomes one card field, in catalog order.
pub fn faq(catalogs: &Catalogs) -> Vec<ResponseDirective> {
    vec![ResponseDirective::RichCard {
        title: "📌 Frequently Asked Questions".to_string(),
        fields: catalogs
            .faq
            .iter()
            .map(|entry| CardField::new(entry.question.clone(), entry.answer.clone()))
            .collect(),
        footer: None,
        image_url: None,
    }]
}

/// Handle /estimate. Unknown project types get the custom-pricing
/// fallback, never an error.
pub fn estimate(catalogs: &Catalogs, project_type: &str) -> Vec<ResponseDirective> {
    let range = catalogs.price_for(project_type).unwrap_or(PRICE_FALLBACK);
    vec![ResponseDirective::RichCard {
        title: "💰 Project Price Estimate".to_string(),
        fields: vec![CardField::new(project_type, range)],
        footer: None,
        image_url: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_returns_published_range() {
        let catalogs = Catalogs::load().unwrap();
        let directives = estimate(&catalogs, "Website");
        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("estimate must render as a card");
        };
        assert_eq!(fields[0].value, "$500 - $5000");
    }

    #[test]
    fn estimate_falls_back_for_unknown_projects() {
        let catalogs = Catalogs::load().unwrap();
        let directives = estimate(&catalogs, "Spaceship");
        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("estimate must render as a card");
        };
        assert_eq!(fields[0].name, "Spaceship");
        assert_eq!(fields[0].value, PRICE_FALLBACK);
    }

    #[test]
    fn faq_lists_every_entry() {
        let catalogs = Catalogs::load().unwrap();
        let directives = faq(&catalogs);
        let ResponseDirective::RichCard { fields, .. } = &directives[0] else {
            panic!("faq must render as a card");
        };
        assert_eq!(fields.len(), catalogs.faq.len());
    }
}
