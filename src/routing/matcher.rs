//! Route patterns.
//!
//! # Responsibilities
//! - Parse axum-style patterns (`/products/{id}`, `/files/{*rest}`)
//! - Render a pattern back into a concrete, percent-encoded path
//!
//! # Design Decisions
//! - Raw path matching lives in `RouteTable`, on the same router axum uses
//! - Parameter values are encoded per segment; `/` inside a catch-all is kept

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::routing::router::RouteError;

/// Bytes that cannot appear unescaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Parameters captured while matching a path.
pub type PathParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|segment| {
                if let Some(name) = segment.strip_prefix("{*").and_then(|s| s.strip_suffix('}')) {
                    Segment::CatchAll(name.to_string())
                } else if let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Segment::Param(name.to_string())
                } else {
                    Segment::Static(segment.to_string())
                }
            })
            .collect();

        Self {
            source: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of the parameters this pattern requires.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Substitute `params` into the pattern.
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(value) => path.push_str(value),
                Segment::Param(name) => {
                    let value = lookup(params, name)?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
                Segment::CatchAll(name) => {
                    let value = lookup(params, name)?;
                    let encoded: Vec<String> = split(value)
                        .map(|part| utf8_percent_encode(part, SEGMENT).to_string())
                        .collect();
                    path.push_str(&encoded.join("/"));
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

fn lookup<'a>(params: &[(&str, &'a str)], name: &str) -> Result<&'a str, RouteError> {
    params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| RouteError::MissingParam {
            name: name.to_string(),
        })
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let pattern = PathPattern::parse("/fr/products/{id}");
        assert_eq!(pattern.as_str(), "/fr/products/{id}");
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);

        let pattern = PathPattern::parse("/docs/{*rest}");
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["rest"]);
        assert_eq!(PathPattern::parse("/en/about").param_names().count(), 0);
    }

    #[test]
    fn test_render() {
        let pattern = PathPattern::parse("/nl/products/{id}");
        assert_eq!(pattern.render(&[("id", "7")]).unwrap(), "/nl/products/7");
        assert_eq!(
            pattern.render(&[]),
            Err(RouteError::MissingParam { name: "id".into() })
        );
        assert_eq!(PathPattern::parse("/").render(&[]).unwrap(), "/");
    }

    #[test]
    fn test_render_encodes_values() {
        let pattern = PathPattern::parse("/gb/products/{id}");
        assert_eq!(pattern.render(&[("id", "a b")]).unwrap(), "/gb/products/a%20b");
        assert_eq!(pattern.render(&[("id", "x?y#z")]).unwrap(), "/gb/products/x%3Fy%23z");
        assert_eq!(pattern.render(&[("id", "a/b")]).unwrap(), "/gb/products/a%2Fb");
        assert_eq!(pattern.render(&[("id", "café")]).unwrap(), "/gb/products/caf%C3%A9");
    }

    #[test]
    fn test_render_catch_all_keeps_separators() {
        let pattern = PathPattern::parse("/docs/{*rest}");
        assert_eq!(
            pattern.render(&[("rest", "/guide/first steps/")]).unwrap(),
            "/docs/guide/first%20steps"
        );
    }
}
