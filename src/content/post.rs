//! Post model

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A blog post or work entry, derived from one markdown file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// File name without the `.md` extension
    pub id: String,

    pub title: String,

    /// Publication date as written in the front matter.
    ///
    /// Kept as a string and compared lexicographically, so only zero-padded
    /// `YYYY-MM-DD` style dates sort correctly.
    pub date: String,

    pub category: String,

    pub tags: Vec<String>,

    pub featured: bool,

    /// Free-text reading time such as "5 min"
    pub read_time: String,

    pub description: String,

    /// Rendered HTML content
    pub content: String,

    /// Site path of the post page
    pub link: String,
}

impl Post {
    pub const DEFAULT_TITLE: &'static str = "Untitled";
    pub const DEFAULT_CATEGORY: &'static str = "blog";
    pub const DEFAULT_READ_TIME: &'static str = "5 min";

    /// Assemble a post from parsed front matter and rendered HTML, filling in defaults
    pub fn from_parts(id: &str, fm: FrontMatter, content: String, link_prefix: &str) -> Self {
        Self {
            id: id.to_string(),
            title: fm
                .title
                .unwrap_or_else(|| Self::DEFAULT_TITLE.to_string()),
            date: fm.date.unwrap_or_else(now_iso),
            category: fm
                .category
                .unwrap_or_else(|| Self::DEFAULT_CATEGORY.to_string()),
            tags: fm.tags,
            featured: fm.featured,
            read_time: fm
                .read_time
                .unwrap_or_else(|| Self::DEFAULT_READ_TIME.to_string()),
            description: fm.description.unwrap_or_default(),
            content,
            link: post_link(link_prefix, id),
        }
    }

    /// Whether the post carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Build the site path for a post id, e.g. `/blog/hello-world`
pub fn post_link(prefix: &str, id: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), id)
}

/// Current time in the `2024-01-15T10:30:00.000Z` form
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let post = Post::from_parts("hello", FrontMatter::default(), String::new(), "/blog");
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.category, "blog");
        assert_eq!(post.read_time, "5 min");
        assert_eq!(post.description, "");
        assert!(post.tags.is_empty());
        assert!(!post.featured);
        assert_eq!(post.link, "/blog/hello");
        // 2024-01-15T10:30:00.000Z
        assert_eq!(post.date.len(), 24);
        assert!(post.date.ends_with('Z'));
    }

    #[test]
    fn test_post_link_trailing_slash() {
        assert_eq!(post_link("/blog/", "a"), "/blog/a");
        assert_eq!(post_link("", "a"), "/a");
    }

    #[test]
    fn test_serializes_camel_case() {
        let fm = FrontMatter {
            date: Some("2024-01-10".to_string()),
            read_time: Some("3 min".to_string()),
            ..Default::default()
        };
        let post = Post::from_parts("x", fm, "<p>x</p>\n".to_string(), "/blog");
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["readTime"], "3 min");
        assert_eq!(json["date"], "2024-01-10");
        assert!(json.get("read_time").is_none());
    }
}
