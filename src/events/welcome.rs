//! Member-join welcome event.
//!
//! Pure template rendering; no state access.

use crate::catalogs::Catalogs;
use crate::directives::{CardField, ResponseDirective};

/// Build the welcome card for a newly joined member.
pub fn member_joined(catalogs: &Catalogs, display_name: &str) -> Vec<ResponseDirective> {
    let welcome = &catalogs.welcome;
    vec![ResponseDirective::RichCard {
        title: welcome.title.clone(),
        fields: vec![CardField::new(
            "Welcome",
            welcome.body.replace("{name}", display_name),
        )],
        footer: None,
        image_url: welcome.image_url.clone(),
    }]
}
