//! List site content

use anyhow::Result;
use serde::Serialize;

use crate::templates::order_posts;
use crate::Blog;

#[derive(Serialize)]
struct ListedPost<'a> {
    slug: &'a str,
    title: &'a str,
    label: &'a str,
    author: &'a str,
    published: &'a str,
}

/// Print every post in listing order
pub fn run(blog: &Blog, json: bool) -> Result<()> {
    let mut posts = blog.store().list_all()?;
    order_posts(&mut posts, blog.config.order_by);

    if json {
        let listed: Vec<ListedPost> = posts
            .iter()
            .map(|p| ListedPost {
                slug: &p.slug,
                title: &p.title,
                label: &p.label,
                author: &p.author,
                published: &p.published,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        let published = if post.published.is_empty() {
            "-"
        } else {
            post.published.as_str()
        };
        println!("  {} - {} [{}]", published, post.title, post.slug);
    }

    Ok(())
}
