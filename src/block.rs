//! Conventions for bundle block tags
//!
//! A bundle is written in a template as
//!
//! ```text
//! {% coffeescripts "js/all" %}
//!     js/a
//!     js/b
//! {% endcoffeescripts %}
//! ```
//!
//! The host engine renders the block body; these helpers turn the opening
//! tag and the rendered body into a bundle name and an ordered input list.

use crate::error::{CoffeeError, Result};

/// Tag that ends a bundle block
const CLOSING_TAG: &str = "endcoffeescripts";

/// Bundle name from the opening tag contents, e.g. `coffeescripts "js/all"`
pub fn parse_bundle_tag(contents: &str) -> Result<String> {
    let mut tokens = contents.split_whitespace();
    let tag = tokens.next().unwrap_or("");
    let name = tokens
        .next()
        .map(|t| t.trim_matches('"'))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CoffeeError::InvalidTag(format!("'{}' requires an output name", tag)))?;
    Ok(name.to_string())
}

/// Name and inputs from a whole block: the opening tag on the first
/// non-blank line, inputs on the following lines up to the closing tag
pub fn parse_bundle_block(text: &str) -> Result<(String, Vec<String>)> {
    let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
    let opening = lines
        .next()
        .ok_or_else(|| CoffeeError::InvalidTag("empty bundle block".to_string()))?;
    let name = parse_bundle_tag(strip_delimiters(opening))?;

    let body: Vec<&str> = lines
        .take_while(|l| strip_delimiters(l) != CLOSING_TAG)
        .collect();
    Ok((name, parse_bundle_body(&body.join("\n"))))
}

fn strip_delimiters(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix("{%").unwrap_or(line);
    let line = line.strip_suffix("%}").unwrap_or(line);
    line.trim()
}

/// Input names from a rendered block body: one per line, trimmed, blank lines
/// dropped, order kept
pub fn parse_bundle_body(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_with_quoted_name() {
        assert_eq!(
            parse_bundle_tag(r#"coffeescripts "js/all""#).unwrap(),
            "js/all"
        );
    }

    #[test]
    fn test_tag_with_bare_name() {
        assert_eq!(parse_bundle_tag("coffeescripts app").unwrap(), "app");
    }

    #[test]
    fn test_tag_without_name() {
        assert!(matches!(
            parse_bundle_tag("coffeescripts"),
            Err(CoffeeError::InvalidTag(_))
        ));
        assert!(matches!(
            parse_bundle_tag(r#"coffeescripts """#),
            Err(CoffeeError::InvalidTag(_))
        ));
    }

    #[test]
    fn test_body_lines() {
        let body = "\n    js/a\n\n\tjs/b  \n   \njs/c";
        assert_eq!(parse_bundle_body(body), vec!["js/a", "js/b", "js/c"]);
    }

    #[test]
    fn test_whole_block() {
        let block = r#"
{% coffeescripts "js/all" %}
    js/a
    js/b
{% endcoffeescripts %}
ignored/after
"#;
        let (name, inputs) = parse_bundle_block(block).unwrap();
        assert_eq!(name, "js/all");
        assert_eq!(inputs, vec!["js/a", "js/b"]);
    }

    #[test]
    fn test_block_without_delimiters() {
        let (name, inputs) = parse_bundle_block("coffeescripts app\nmain\n").unwrap();
        assert_eq!(name, "app");
        assert_eq!(inputs, vec!["main"]);
    }

    #[test]
    fn test_empty_block() {
        assert!(matches!(
            parse_bundle_block("\n  \n"),
            Err(CoffeeError::InvalidTag(_))
        ));
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_bundle_body("  \n\n").is_empty());
    }
}
