//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::OrderBy;
pub use site::SiteConfig;
