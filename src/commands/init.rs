//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Oblique Path Blog
description: Oblique Path's blog - insights on automation, web development, and modern tech.
language: en

# Home page
tagline: Latest Updates
heading: Blog Posts
intro: Discover the latest trends, tips, and best practices in modern web development.
button_text: Explore all posts
button_url: https://www.obliquepath.dev/blog

# URL
url: http://localhost:4000
root: /
blog_dir: blog

# Directory
content_dir: content
public_dir: public
extension: mdx

# Listing order: none (directory order), published, -published, title, slug
order_by: none

highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left alone, so running it twice is harmless.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let content_dir = target_dir.join("content");
    fs::create_dir_all(&content_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let sample_path = content_dir.join("hello-world.mdx");
    if !sample_path.exists() {
        let today = chrono::Local::now().format("%-d %B %Y");
        let sample_post = format!(
            r#"---
title: "Hello World"
summary: "Your very first post. Edit or delete it, then start writing."
label: "Getting Started"
author: "Oblique Path"
published: "{}"
image: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800&h=450&fit=crop"
---

Welcome to your new blog! Every `.mdx` file in `content/` is a post, and its
file name becomes the post's URL.

## Writing a post

```bash
$ oblique-blog new "My New Post"
```

## Previewing

```bash
$ oblique-blog server
```

## Publishing

```bash
$ oblique-blog generate
```
"#,
            today
        );
        fs::write(&sample_path, sample_post)?;
    }

    Ok(())
}
