//! Show a single post

use anyhow::Result;

use crate::content::{ContentError, Post};
use crate::Folio;

/// Print one post. Returns `Ok(false)` when the post cannot be loaded.
pub fn run(folio: &Folio, id: &str, as_json: bool) -> Result<bool> {
    let post = match folio.store().try_get_post(id) {
        Ok(post) => post,
        Err(ContentError::NotFound(_)) => {
            eprintln!("No post with id {:?} in {:?}", id, folio.content_dir);
            return Ok(false);
        }
        Err(e) => {
            eprintln!("Could not load post {:?}: {}", id, e);
            return Ok(false);
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", summary(&post));
    }

    Ok(true)
}

/// Human-readable rendering of a post header followed by its HTML
fn summary(post: &Post) -> String {
    let mut text = format!("{}\n", post.title);
    text.push_str(&format!("  id:        {}\n", post.id));
    text.push_str(&format!("  date:      {}\n", post.date));
    text.push_str(&format!("  category:  {}\n", post.category));
    if !post.tags.is_empty() {
        text.push_str(&format!("  tags:      {}\n", post.tags.join(", ")));
    }
    text.push_str(&format!("  featured:  {}\n", post.featured));
    text.push_str(&format!("  read time: {}\n", post.read_time));
    text.push_str(&format!("  link:      {}\n", post.link));
    if !post.description.is_empty() {
        text.push_str(&format!("\n{}\n", post.description));
    }
    text.push('\n');
    text.push_str(&post.content);
    text
}
