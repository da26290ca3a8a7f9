//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/assets/site.css") // -> "/blog/assets/site.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Site-relative path of a post's detail page
///
/// # Examples
/// ```ignore
/// post_path(&config, "hello world") // -> "/blog/hello%20world/"
/// ```
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &post_route(config, slug))
}

/// Absolute URL of a post's detail page
pub fn post_permalink(config: &SiteConfig, slug: &str) -> String {
    full_url_for(config, &post_route(config, slug))
}

fn post_route(config: &SiteConfig, slug: &str) -> String {
    let blog_dir = config.blog_dir.trim_matches('/');
    let slug = encode_segment(slug);
    if blog_dir.is_empty() {
        format!("{}/", slug)
    } else {
        format!("{}/{}/", blog_dir, slug)
    }
}

/// Percent-encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
