//! folio: markdown-backed content for a writer's portfolio site
//!
//! This crate loads blog posts and work entries from a directory of markdown
//! files with YAML front matter, renders them to HTML, and serves them to the
//! presentation layer through a library API, a JSON API and a CLI.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::Path;

use content::{MarkdownRenderer, Post, PostStore};

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content store directory
    pub content_dir: std::path::PathBuf,
    /// Post store over `content_dir`, built once so the renderer is shared
    store: PostStore,
}

impl Folio {
    /// Create a new Folio instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load_or_default(&base_dir)?;
        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Folio instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let store = PostStore::new(
            &content_dir,
            &config.link_prefix,
            MarkdownRenderer::from_config(&config.highlight),
        );

        Self {
            config,
            base_dir,
            content_dir,
            store,
        }
    }

    /// The post store over this site's content directory
    pub fn store(&self) -> PostStore {
        self.store.clone()
    }

    /// All posts, newest first
    pub fn list_posts(&self) -> Vec<Post> {
        self.store.list_posts()
    }

    /// A single post by id
    pub fn get_post(&self, id: &str) -> Option<Post> {
        self.store.get_post(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_config_and_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "content_dir: works\nlink_prefix: /works\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("works")).unwrap();
        fs::write(
            dir.path().join("works/novel.md"),
            "---\ntitle: The Novel\ncategory: fiction\n---\nChapter one.",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let posts = folio.list_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].link, "/works/novel");
        assert_eq!(
            folio.get_post("novel").map(|p| p.category),
            Some("fiction".to_string())
        );
    }

    #[test]
    fn test_store_shares_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config::SiteConfig::default();
        config.highlight.enable = true;
        let folio = Folio::with_config(dir.path(), config);

        assert!(folio.store().shares_renderer(&folio.store()));
        assert!(folio.clone().store().shares_renderer(&folio.store()));
    }

    #[test]
    fn test_default_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("content/blog"));
        assert!(folio.list_posts().is_empty());
    }
}
