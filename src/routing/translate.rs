//! Route segment translation.
//!
//! # Responsibilities
//! - Translate the static segments of a route template per locale
//! - Leave parameters, wildcards and untranslated segments unchanged
//!
//! # Design Decisions
//! - Translation lookups happen during expansion only, never per request
//! - The catalog is supplied by the operator; this crate ships no strings

use std::collections::HashMap;
use std::fmt;

/// Source of translated path segments.
pub trait SegmentTranslator: Send + Sync + fmt::Debug {
    /// Translation of `segment` for `locale`, if the catalog has one.
    fn translate(&self, locale: &str, segment: &str) -> Option<String>;
}

/// In-memory catalog: locale -> (segment -> translation).
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    domain: String,
    catalog: HashMap<String, HashMap<String, String>>,
}

impl CatalogTranslator {
    pub fn new(domain: impl Into<String>, catalog: HashMap<String, HashMap<String, String>>) -> Self {
        Self {
            domain: domain.into(),
            catalog,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalog.keys().map(String::as_str)
    }
}

impl SegmentTranslator for CatalogTranslator {
    fn translate(&self, locale: &str, segment: &str) -> Option<String> {
        self.catalog.get(locale)?.get(segment).cloned()
    }
}

/// Translate every static segment of `template` for `locale`.
pub fn translate_path(translator: &dyn SegmentTranslator, locale: &str, template: &str) -> String {
    let translated: Vec<String> = template
        .split('/')
        .map(|segment| {
            if segment.is_empty() || segment.starts_with('{') {
                segment.to_string()
            } else {
                translator
                    .translate(locale, segment)
                    .unwrap_or_else(|| segment.to_string())
            }
        })
        .collect();
    translated.join("/")
}
