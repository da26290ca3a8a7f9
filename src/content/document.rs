//! Content document model

use serde::Serialize;

use super::FrontMatter;

/// One blog post as read from the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDocument {
    /// File name minus the document extension; used for lookup and URLs
    pub slug: String,

    pub title: String,
    pub summary: String,
    pub label: String,
    pub author: String,

    /// Publication date, kept verbatim from the metadata block
    pub published: String,

    /// Cover image URL
    pub image: String,

    /// Raw markup source, not interpreted by the store
    pub body: String,
}

impl ContentDocument {
    /// Assemble a document from its slug, parsed metadata and body
    pub fn new(slug: impl Into<String>, fm: FrontMatter, body: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: fm.title,
            summary: fm.summary,
            label: fm.label,
            author: fm.author,
            published: fm.published,
            image: fm.image,
            body: body.into(),
        }
    }

    /// Parse a document from the full text of its file
    pub fn parse(slug: impl Into<String>, content: &str) -> Result<Self, serde_yaml::Error> {
        let (fm, body) = FrontMatter::parse(content)?;
        Ok(Self::new(slug, fm, body))
    }
}
