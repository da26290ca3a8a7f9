//! Generator module - writes the static site using the built-in templates

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ContentDocument;
use crate::helpers;
use crate::templates::{order_posts, PostData, SitePages, ASSETS};
use crate::Blog;

/// Static site generator
pub struct Generator {
    blog: Blog,
    pages: SitePages,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            pages: SitePages::new(&blog.config)?,
        })
    }

    /// Generate the entire site
    ///
    /// Every post gets a detail page; the set of detail pages is exactly
    /// the set of slugs the content store lists.
    pub fn generate(&self, posts: &[ContentDocument]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        let mut sorted_posts = posts.to_vec();
        order_posts(&mut sorted_posts, self.blog.config.order_by);

        self.write_page(Path::new("index.html"), &self.pages.render_index(&sorted_posts)?)?;

        for post in &sorted_posts {
            let html = self.pages.render_post(post)?;
            self.write_page(&self.post_output_path(&post.slug), &html)?;
        }

        self.write_page(Path::new("404.html"), &self.pages.render_not_found()?)?;
        self.generate_post_index(&sorted_posts)?;
        self.copy_assets()?;

        Ok(())
    }

    /// Output file for a post, relative to the public directory
    pub fn post_output_path(&self, slug: &str) -> PathBuf {
        let blog_dir = self.blog.config.blog_dir.trim_matches('/');
        let mut path = PathBuf::new();
        if !blog_dir.is_empty() {
            path.push(blog_dir);
        }
        path.push(slug);
        path.push("index.html");
        path
    }

    fn write_page(&self, relative: &Path, html: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Generate posts.json with the listing metadata of every post
    fn generate_post_index(&self, posts: &[ContentDocument]) -> Result<()> {
        let index: Vec<PostData> = posts
            .iter()
            .map(|p| PostData::from_document(&self.blog.config, p))
            .collect();

        let output_path = self.blog.public_dir.join("posts.json");
        fs::write(&output_path, serde_json::to_string_pretty(&index)?)?;
        tracing::info!("Generated posts.json");

        Ok(())
    }

    /// Write the embedded stylesheet and script
    fn copy_assets(&self) -> Result<()> {
        let assets_dir = self.blog.public_dir.join("assets");
        fs::create_dir_all(&assets_dir)?;
        for asset in ASSETS {
            fs::write(assets_dir.join(asset.name), asset.body)?;
        }
        Ok(())
    }

    /// Site-relative URL of every generated detail page
    pub fn post_urls(&self, posts: &[ContentDocument]) -> Vec<String> {
        posts
            .iter()
            .map(|p| helpers::post_path(&self.blog.config, &p.slug))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn post(slug: &str, title: &str) -> ContentDocument {
        ContentDocument::parse(slug, &format!("---\ntitle: {}\n---\nBody of {}", title, slug))
            .unwrap()
    }

    #[test]
    fn test_generate_writes_pages() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        let generator = Generator::new(&blog).unwrap();

        generator
            .generate(&[post("first", "First"), post("second", "Second")])
            .unwrap();

        let public = &blog.public_dir;
        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(index.contains("/blog/first/"));
        assert!(index.contains("/blog/second/"));

        let first = fs::read_to_string(public.join("blog/first/index.html")).unwrap();
        assert!(first.contains("Body of first"));
        assert!(public.join("blog/second/index.html").exists());
        assert!(public.join("404.html").exists());
        assert!(public.join("assets/site.css").exists());
        assert!(public.join("assets/site.js").exists());

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(public.join("posts.json")).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["slug"], "first");
    }

    #[test]
    fn test_post_output_path() {
        let dir = TempDir::new().unwrap();
        let flat = SiteConfig {
            blog_dir: String::new(),
            ..Default::default()
        };
        let generator = Generator::new(&Blog::with_config(dir.path(), flat)).unwrap();
        assert_eq!(
            generator.post_output_path("a"),
            PathBuf::from("a").join("index.html")
        );

        let generator =
            Generator::new(&Blog::with_config(dir.path(), SiteConfig::default())).unwrap();
        assert_eq!(
            generator.post_output_path("a"),
            PathBuf::from("blog").join("a").join("index.html")
        );
        assert_eq!(
            generator.post_urls(&[post("a", "A")]),
            vec!["/blog/a/".to_string()]
        );
    }
}
