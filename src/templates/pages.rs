//! Page rendering shared by the generator and the server

use anyhow::Result;
use chrono::Datelike;
use std::cmp::Ordering;
use tera::Context;

use super::{ConfigData, PostData, TemplateRenderer};
use crate::config::{OrderBy, SiteConfig};
use crate::content::{ContentDocument, MarkdownRenderer};
use crate::helpers::parse_published;

/// Renders the listing, detail and not-found pages of the site
pub struct SitePages {
    config: SiteConfig,
    config_data: ConfigData,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl SitePages {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            config_data: ConfigData::from_config(config),
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(
                &config.highlight.theme,
                config.highlight.line_number,
            ),
        })
    }

    /// Home page: one summary card per post, in `order_by` order
    pub fn render_index(&self, docs: &[ContentDocument]) -> Result<String> {
        let mut docs = docs.to_vec();
        order_posts(&mut docs, self.config.order_by);

        let posts: Vec<PostData> = docs
            .iter()
            .map(|doc| PostData::from_document(&self.config, doc))
            .collect();

        let mut context = self.base_context();
        context.insert("posts", &posts);
        self.templates.render("index.html", &context)
    }

    /// Detail page with the rendered post body
    pub fn render_post(&self, doc: &ContentDocument) -> Result<String> {
        let post = PostData::from_document(&self.config, doc);
        let content = self.markdown.render(&doc.body);

        let mut context = self.base_context();
        context.insert("post", &post);
        context.insert("content", &content);
        self.templates.render("post.html", &context)
    }

    pub fn render_not_found(&self) -> Result<String> {
        self.templates.render("404.html", &self.base_context())
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.config_data);
        context.insert("current_year", &chrono::Local::now().year());
        context
    }
}

/// Sort posts for the listing page
///
/// The sort is stable. Posts whose `published` value is not a recognizable
/// date go after dated ones in both date orders.
pub fn order_posts(docs: &mut [ContentDocument], order: OrderBy) {
    match order {
        OrderBy::None => {}
        OrderBy::Published => docs.sort_by(|a, b| compare_published(a, b, false)),
        OrderBy::PublishedDesc => docs.sort_by(|a, b| compare_published(a, b, true)),
        OrderBy::Title => docs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        OrderBy::Slug => docs.sort_by(|a, b| a.slug.cmp(&b.slug)),
    }
}

fn compare_published(a: &ContentDocument, b: &ContentDocument, newest_first: bool) -> Ordering {
    match (parse_published(&a.published), parse_published(&b.published)) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
