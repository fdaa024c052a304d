//! List site content

use anyhow::Result;
use std::collections::HashMap;
use std::io::Write;

use crate::content::{Post, PostFilter};
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, filter: &PostFilter) -> Result<()> {
    let posts = filter.apply(folio.list_posts());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match content_type {
        "post" | "posts" => write_posts(&mut out, &posts)?,
        "tag" | "tags" => {
            let tags = count_by(&posts, |p| p.tags.clone());
            write_counts(&mut out, "Tags", &tags)?;
        }
        "category" | "categories" => {
            let categories = count_by(&posts, |p| vec![p.category.clone()]);
            write_counts(&mut out, "Categories", &categories)?;
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

fn write_posts<W: Write>(out: &mut W, posts: &[Post]) -> Result<()> {
    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        let marker = if post.featured { " *" } else { "" };
        writeln!(
            out,
            "  {} - {}{} [{}]",
            post.date, post.title, marker, post.id
        )?;
    }
    Ok(())
}

fn write_counts<W: Write>(out: &mut W, label: &str, counts: &[(String, usize)]) -> Result<()> {
    writeln!(out, "{} ({}):", label, counts.len())?;
    for (name, count) in counts {
        writeln!(out, "  {} ({})", name, count)?;
    }
    Ok(())
}

/// Count occurrences of the keys produced for each post, most frequent first
fn count_by<F>(posts: &[Post], keys: F) -> Vec<(String, usize)>
where
    F: Fn(&Post) -> Vec<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for key in keys(post) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
