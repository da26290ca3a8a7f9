//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create `<content_dir>/<slug>.<ext>` with a front-matter scaffold
///
/// The slug defaults to the slugified title. Existing files are never
/// overwritten.
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) || slug == "." || slug == ".." {
        anyhow::bail!("Invalid slug: {:?}", slug);
    }

    fs::create_dir_all(&blog.content_dir)?;

    let file_path = blog
        .content_dir
        .join(format!("{}.{}", slug, blog.config.extension.trim_start_matches('.')));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let published = chrono::Local::now().format("%-d %B %Y");
    let content = format!(
        r#"---
title: {}
summary: ""
label: ""
author: ""
published: "{}"
image: ""
---

"#,
        yaml_string(title),
        published
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Quote a string for a YAML scalar
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Lookup;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());

        let path = create_post(&blog, "My \"Quoted\" Post", None).unwrap();
        assert_eq!(path, dir.path().join("content/my-quoted-post.mdx"));

        let Lookup::Found(doc) = blog.store().get("my-quoted-post") else {
            panic!("new post not readable");
        };
        assert_eq!(doc.title, "My \"Quoted\" Post");
        assert_eq!(doc.summary, "");
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        create_post(&blog, "Twice", None).unwrap();
        assert!(create_post(&blog, "Twice", None).is_err());
    }

    #[test]
    fn test_create_post_custom_slug() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        create_post(&blog, "Title", Some("custom")).unwrap();
        assert!(blog.store().get("custom").is_found());
        assert!(create_post(&blog, "Title", Some("../escape")).is_err());
    }
}
