//! Built-in site templates using Tera template engine
//!
//! Templates and static assets are embedded in the binary, so a site
//! directory only needs its config and content.

mod pages;

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::ContentDocument;
use crate::helpers;

pub use pages::{order_posts, SitePages};

/// A static file served under `/assets/`
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub name: &'static str,
    pub content_type: &'static str,
    pub body: &'static str,
}

/// Stylesheet and script shared by every page
pub const ASSETS: &[Asset] = &[
    Asset {
        name: "site.css",
        content_type: "text/css; charset=utf-8",
        body: include_str!("site/assets/site.css"),
    },
    Asset {
        name: "site.js",
        content_type: "text/javascript; charset=utf-8",
        body: include_str!("site/assets/site.js"),
    },
];

/// Look up an embedded asset by file name
pub fn asset(name: &str) -> Option<&'static Asset> {
    ASSETS.iter().find(|a| a.name == name)
}

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.set_escape_fn(helpers::escape_html);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("display_date", display_date_filter);
        tera.register_filter("date_attr", date_attr_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: human readable published date
fn display_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);
    Ok(tera::Value::String(helpers::display_date(&s)))
}

/// Tera filter: machine readable published date
fn date_attr_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_attr", "value", String, value);
    Ok(tera::Value::String(helpers::date_attr(&s)))
}

/// Site-wide values available to every template as `config`
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub language: String,
    pub tagline: String,
    pub heading: String,
    pub intro: String,
    pub button_text: String,
    pub button_url: String,
    pub home: String,
    pub stylesheet: String,
    pub script: String,
}

impl ConfigData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
            tagline: config.tagline.clone(),
            heading: config.heading.clone(),
            intro: config.intro.clone(),
            button_text: config.button_text.clone(),
            button_url: config.button_url.clone(),
            home: helpers::url_for(config, "/"),
            stylesheet: helpers::url_for(config, "/assets/site.css"),
            script: helpers::url_for(config, "/assets/site.js"),
        }
    }
}

/// A post as shown on a summary card or a detail page
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub label: String,
    pub author: String,
    pub published: String,
    pub image: String,
    pub path: String,
    pub permalink: String,
}

impl PostData {
    pub fn from_document(config: &SiteConfig, doc: &ContentDocument) -> Self {
        let path = helpers::post_path(config, &doc.slug);
        Self {
            slug: doc.slug.clone(),
            title: doc.title.clone(),
            summary: doc.summary.clone(),
            label: doc.label.clone(),
            author: doc.author.clone(),
            published: doc.published.clone(),
            image: doc.image.clone(),
            path,
            permalink: helpers::post_permalink(config, &doc.slug),
        }
    }
}
