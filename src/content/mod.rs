//! Content module - content store, front-matter and markdown rendering

mod document;
mod error;
mod frontmatter;
mod markdown;
pub mod store;

pub use document::ContentDocument;
pub use error::{DocumentError, StoreError};
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use store::{ContentStore, Lookup};
