//! Sample scope declarations.
//!
//! Used by the test suites and by the binary when it runs without a config
//! file. [`scopes`] and [`scopes_precomputed`] describe the same scopes, once
//! as a tree and once as the list normalization produces for it.

use serde_json::json;

use crate::scope::{FlatScope, NestedScope};

/// Region tree: international root, Europe with two countries, UK, Canada.
pub fn scopes() -> NestedScope {
    NestedScope::new("")
        .assign("locale", "en")
        .assign("name", "International")
        .assign("currency", "USD")
        .child(
            NestedScope::new("europe")
                .assign("name", "Europe")
                .assign("currency", "EUR")
                .child(NestedScope::new("nl").assign("locale", "nl").assign("name", "Nederland"))
                .child(NestedScope::new("be").assign("locale", "nl").assign("name", "België")),
        )
        .child(
            NestedScope::new("gb")
                .assign("name", "United Kingdom")
                .assign("currency", "GBP"),
        )
        .child(
            NestedScope::new("ca")
                .assign("name", "Canada")
                .assign("currency", "CAD")
                .child(
                    NestedScope::new("fr")
                        .assign("locale", "fr")
                        .assign("name", "Canada (français)"),
                ),
        )
}

/// The flat list [`scopes`] normalizes to.
pub fn scopes_precomputed() -> Vec<FlatScope> {
    fn entry(segments: &[&str], locale: &str, name: &str, currency: &str) -> FlatScope {
        FlatScope::new(segments.iter().copied())
            .assign("locale", locale)
            .assign("name", name)
            .assign("currency", currency)
    }

    vec![
        entry(&[], "en", "International", "USD"),
        entry(&["europe"], "en", "Europe", "EUR"),
        entry(&["europe", "nl"], "nl", "Nederland", "EUR"),
        entry(&["europe", "be"], "nl", "België", "EUR"),
        entry(&["gb"], "en", "United Kingdom", "GBP"),
        entry(&["ca"], "en", "Canada", "CAD"),
        entry(&["ca", "fr"], "fr", "Canada (français)", "CAD"),
    ]
}

/// A one-level flat declaration, one scope per language.
pub fn scopes_flat() -> Vec<FlatScope> {
    vec![
        FlatScope::new(["en"]).assign("locale", "en").assign("name", "English"),
        FlatScope::new(["fr"]).assign("locale", "fr").assign("name", "Français"),
        FlatScope::new(["nl"]).assign("locale", "nl").assign("name", "Nederlands"),
    ]
}

/// Scopes whose assigns include structured (map-valued) data.
pub fn scopes_with_map_assign() -> NestedScope {
    NestedScope::new("")
        .assign("locale", "en")
        .assign("contact", json!({ "email": "info@example.com", "phone": "+1 555 0100" }))
        .child(
            NestedScope::new("nl")
                .assign("locale", "nl")
                .assign("contact", json!({ "email": "info@example.nl", "phone": "+31 20 555 0100" })),
        )
}
