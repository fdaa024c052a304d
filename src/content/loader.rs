//! Content loader - loads posts from the content store directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, MarkdownRenderer, Post};

/// Markdown extension of post files
const POST_EXTENSION: &str = "md";

/// Reads posts from a directory of markdown files.
///
/// Nothing is cached: every call goes back to the filesystem and re-renders.
#[derive(Clone)]
pub struct PostStore {
    content_dir: PathBuf,
    link_prefix: String,
    renderer: Arc<MarkdownRenderer>,
}

impl PostStore {
    /// Create a store over `content_dir`
    pub fn new<P: Into<PathBuf>>(
        content_dir: P,
        link_prefix: &str,
        renderer: MarkdownRenderer,
    ) -> Self {
        Self {
            content_dir: content_dir.into(),
            link_prefix: link_prefix.to_string(),
            renderer: Arc::new(renderer),
        }
    }

    /// The directory this store reads from
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Whether two stores render with the same renderer instance
    pub fn shares_renderer(&self, other: &PostStore) -> bool {
        Arc::ptr_eq(&self.renderer, &other.renderer)
    }

    /// Load every post, newest first.
    ///
    /// A missing directory yields an empty list. Files that cannot be read or
    /// parsed are skipped with a warning.
    pub fn list_posts(&self) -> Vec<Post> {
        if !self.content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.content_dir);
            return Vec::new();
        }
        if !self.content_dir.is_dir() {
            tracing::error!("Content path {:?} is not a directory", self.content_dir);
            return Vec::new();
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::error!("Failed to read content directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            let Some(id) = post_id(path) else {
                continue;
            };
            if !path.is_file() {
                continue;
            }

            match self.load_file(id, path) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Skipping post {:?}: {}", path, e);
                }
            }
        }

        sort_posts(&mut posts);

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.content_dir);
        posts
    }

    /// Load one post by id, or `None` if it is missing or broken
    pub fn get_post(&self, id: &str) -> Option<Post> {
        match self.try_get_post(id) {
            Ok(post) => Some(post),
            Err(e) if e.is_not_found() => {
                tracing::debug!("{}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Error reading post {}: {}", id, e);
                None
            }
        }
    }

    /// Load one post by id, reporting why it could not be produced
    pub fn try_get_post(&self, id: &str) -> Result<Post, ContentError> {
        if !is_valid_id(id) {
            return Err(ContentError::InvalidId(id.to_string()));
        }

        let path = self
            .content_dir
            .join(format!("{}.{}", id, POST_EXTENSION));

        self.load_file(id, &path)
    }

    /// Parse and render raw file text into a post
    pub fn parse_post(&self, id: &str, raw: &str) -> Result<Post, ContentError> {
        let (fm, body) = FrontMatter::parse(raw)?;
        let content = self.renderer.render(body);
        Ok(Post::from_parts(id, fm, content, &self.link_prefix))
    }

    fn load_file(&self, id: &str, path: &Path) -> Result<Post, ContentError> {
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ContentError::NotFound(id.to_string()),
            _ => ContentError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        self.parse_post(id, &raw)
    }
}

/// Order posts by date string, descending; equal dates by id
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}

/// The post id for a path, if it names a markdown file
fn post_id(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let id = name.strip_suffix(POST_EXTENSION)?.strip_suffix('.')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Ids must name a file directly inside the content directory
pub(crate) fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\', '\0'])
}
