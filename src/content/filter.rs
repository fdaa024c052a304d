//! Works-list filtering

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::Post;

/// Selection applied to the post list: everything, featured posts, or one category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostFilter {
    #[default]
    All,
    Featured,
    Category(String),
}

impl PostFilter {
    /// Whether a post passes the filter
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Featured => post.featured,
            PostFilter::Category(category) => post.category == *category,
        }
    }

    /// Keep the matching posts, preserving order
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        if *self == PostFilter::All {
            return posts;
        }
        posts.into_iter().filter(|p| self.matches(p)).collect()
    }
}

impl FromStr for PostFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => PostFilter::All,
            "featured" => PostFilter::Featured,
            category => PostFilter::Category(category.to_string()),
        })
    }
}

impl fmt::Display for PostFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostFilter::All => f.write_str("all"),
            PostFilter::Featured => f.write_str("featured"),
            PostFilter::Category(category) => f.write_str(category),
        }
    }
}
