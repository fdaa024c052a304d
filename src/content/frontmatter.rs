//! Front-matter parsing

use serde_yaml::{Mapping, Value};

use super::ContentError;

/// Recognised front-matter fields of a post.
///
/// Every field is optional here; a value that is missing, empty, or of the
/// wrong YAML type is recorded as absent so the loader can substitute the
/// post defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub read_time: Option<String>,
    pub description: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        match split_block(content) {
            Some((yaml, body)) => Ok((Self::from_yaml(yaml)?, body)),
            None => Ok((FrontMatter::default(), content)),
        }
    }

    fn from_yaml(yaml: &str) -> Result<Self, ContentError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| ContentError::FrontMatter(e.to_string()))?;

        match value {
            Value::Null => Ok(FrontMatter::default()),
            Value::Mapping(map) => Ok(Self::from_mapping(&map)),
            other => Err(ContentError::FrontMatter(format!(
                "expected a mapping, found {}",
                type_name(&other)
            ))),
        }
    }

    fn from_mapping(map: &Mapping) -> Self {
        Self {
            title: string_or_number(map.get("title")),
            date: non_empty_string(map.get("date")),
            category: non_empty_string(map.get("category")),
            tags: string_or_vec(map.get("tags")),
            featured: map.get("featured").and_then(Value::as_bool).unwrap_or(false),
            read_time: string_or_number(map.get("readTime")),
            description: map
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// Split `---` delimited front matter from the body.
///
/// The opening marker must be the first line; the block ends at the next line
/// that is exactly `---`. Returns `None` when either marker is missing.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let (first, rest) = match content.find('\n') {
        Some(pos) => (&content[..pos], &content[pos + 1..]),
        None => (content, ""),
    };

    if first.trim_end() != "---" {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Like `non_empty_string`, but `title: 1984` or `readTime: 5` keep their number
fn string_or_number(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Number(n)) => Some(n.to_string()),
        other => non_empty_string(other),
    }
}

/// Accept both `tags: rust` and `tags: [rust, web]`; anything else is empty
fn string_or_vec(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
category: fiction
tags:
  - rust
  - writing
featured: true
readTime: 8 min
description: A short story
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.category.as_deref(), Some("fiction"));
        assert_eq!(fm.tags, vec!["rust", "writing"]);
        assert!(fm.featured);
        assert_eq!(fm.read_time.as_deref(), Some("8 min"));
        assert_eq!(fm.description.as_deref(), Some("A short story"));
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let content = "---\ntitle: Dangling\n\nBody text";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_single_string_tags() {
        let (fm, _) = FrontMatter::parse("---\ntags: Notes\n---\n").unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_wrong_shapes_are_dropped() {
        let content = r#"---
title: [42]
featured: "yes"
tags: 7
readTime: ""
category: ""
---
"#;
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(!fm.featured);
        assert!(fm.tags.is_empty());
        assert_eq!(fm.read_time, None);
        assert_eq!(fm.category, None);
    }

    #[test]
    fn test_numeric_title_and_read_time() {
        let content = "---\ntitle: 1984\nreadTime: 5\ncategory: 7\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("1984"));
        assert_eq!(fm.read_time.as_deref(), Some("5"));
        assert_eq!(fm.category, None);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unterminated\n---\nBody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter(_)));
    }

    #[test]
    fn test_non_mapping_is_error() {
        let err = FrontMatter::parse("---\n- a\n- b\n---\nBody").unwrap_err();
        assert!(err.to_string().contains("a sequence"));
    }

    #[test]
    fn test_thematic_break_later_in_body() {
        let content = "Intro\n\n---\n\nMore";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, content);
    }
}
