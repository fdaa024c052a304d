//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_valid_id;
use crate::Folio;

/// Options for a scaffolded post
#[derive(Debug, Clone, Default)]
pub struct NewPost<'a> {
    pub title: &'a str,
    /// Explicit file stem; derived from the title when absent
    pub id: Option<&'a str>,
    pub category: Option<&'a str>,
    pub featured: bool,
}

/// Write a new markdown file into the content directory and return its path
pub fn create_post(folio: &Folio, opts: &NewPost<'_>) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let id = match opts.id {
        Some(id) => id.to_string(),
        None => slug::slugify(opts.title),
    };
    if id.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", opts.title);
    }
    if !is_valid_id(&id) {
        anyhow::bail!("Invalid post id {:?}: must be a plain file name", id);
    }

    fs::create_dir_all(&folio.content_dir)?;
    let file_path = folio.content_dir.join(format!("{}.md", id));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let category = opts.category.unwrap_or(&folio.config.default_category);
    let content = scaffold(opts.title, &today, category, opts.featured);

    fs::write(&file_path, content)?;
    tracing::info!("Created post {} at {:?}", id, file_path);

    Ok(file_path)
}

fn scaffold(title: &str, date: &str, category: &str, featured: bool) -> String {
    format!(
        r#"---
title: {}
date: "{}"
category: {}
tags: []
featured: {}
readTime: 5 min
description: ""
---

"#,
        yaml_string(title),
        date,
        yaml_string(category),
        featured
    )
}

/// Quote a scalar for YAML
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let path = create_post(
            &folio,
            &NewPost {
                title: "Notes on \"Craft\": Part 1",
                category: Some("tech-writing"),
                featured: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(path.file_name().unwrap(), "notes-on-craft-part-1.md");

        let post = folio.get_post("notes-on-craft-part-1").unwrap();
        assert_eq!(post.title, "Notes on \"Craft\": Part 1");
        assert_eq!(post.category, "tech-writing");
        assert!(post.featured);
        assert!(post.tags.is_empty());
        assert_eq!(post.date.len(), 10);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let opts = NewPost {
            title: "Twice",
            ..Default::default()
        };

        create_post(&folio, &opts).unwrap();
        assert!(create_post(&folio, &opts).is_err());
    }

    #[test]
    fn test_rejects_ids_outside_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        for id in ["../../escaped", "nested/post", ".."] {
            let result = create_post(
                &folio,
                &NewPost {
                    title: "X",
                    id: Some(id),
                    ..Default::default()
                },
            );
            assert!(result.is_err(), "id {:?} should be rejected", id);
        }
        assert!(!dir.path().join("escaped.md").exists());
        assert!(!folio.content_dir.join("nested").exists());
    }

    #[test]
    fn test_default_category() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        create_post(
            &folio,
            &NewPost {
                title: "Plain",
                id: Some("plain-post"),
                ..Default::default()
            },
        )
        .unwrap();

        let post = folio.get_post("plain-post").unwrap();
        assert_eq!(post.category, "blog");
        assert!(!post.featured);
    }
}
