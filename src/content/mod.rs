//! Content module - loads posts from the content store and renders them

mod error;
mod filter;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use filter::PostFilter;
pub use frontmatter::FrontMatter;
pub use loader::PostStore;
pub use markdown::MarkdownRenderer;
pub use post::{post_link, Post};
