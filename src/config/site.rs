//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // Home page hero
    pub tagline: String,
    pub heading: String,
    pub intro: String,
    pub button_text: String,
    pub button_url: String,

    // URL
    pub url: String,
    pub root: String,
    pub blog_dir: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub extension: String,

    // Listing
    pub order_by: OrderBy,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Oblique Path Blog".to_string(),
            description: "Oblique Path's blog - insights on automation, web development, and modern tech.".to_string(),
            language: "en".to_string(),

            tagline: "Latest Updates".to_string(),
            heading: "Blog Posts".to_string(),
            intro: "Discover the latest trends, tips, and best practices in modern web development. From UI components to design systems, stay updated with our expert insights.".to_string(),
            button_text: "Explore all posts".to_string(),
            button_url: "https://www.obliquepath.dev/blog".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            extension: "mdx".to_string(),

            order_by: OrderBy::None,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        // An empty file deserializes to null, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Order of posts on the listing page
///
/// `None` keeps the content store's enumeration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBy {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "published")]
    Published,
    #[serde(rename = "-published")]
    PublishedDesc,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "slug")]
    Slug,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Oblique Path Blog");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.extension, "mdx");
        assert_eq!(config.order_by, OrderBy::None);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
content_dir: posts
order_by: -published
highlight:
  line_number: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.order_by, OrderBy::PublishedDesc);
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.extension, "mdx");
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_load_rejects_unknown_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "order_by: random\n").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
