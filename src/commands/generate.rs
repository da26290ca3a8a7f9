//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
///
/// A missing content directory is a configuration error and fails the
/// run instead of producing an empty site.
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let posts = blog.store().list_all()?;
    tracing::info!("Loaded {} posts from {:?}", posts.len(), blog.content_dir);

    let generator = Generator::new(blog)?;
    for url in generator.post_urls(&posts) {
        tracing::debug!("Static path: {}", url);
    }
    generator.generate(&posts)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Watch the content directory and config, regenerating on change
///
/// Blocks the calling thread until the watcher shuts down.
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&blog.content_dir, notify::RecursiveMode::NonRecursive)?;

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = rebuild(&blog.base_dir) {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Reload the config and regenerate; config edits need a fresh Blog
fn rebuild(base_dir: &Path) -> Result<()> {
    let blog = Blog::new(base_dir)?;
    run(&blog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_generates_site() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&blog.content_dir).unwrap();
        fs::write(
            blog.content_dir.join("hello-world.mdx"),
            "---\ntitle: \"Hello\"\nauthor: \"A\"\n---\nHi there",
        )
        .unwrap();

        run(&blog).unwrap();
        assert!(blog.public_dir.join("blog/hello-world/index.html").exists());
    }

    #[test]
    fn test_dot_only_file_name_does_not_replace_index() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&blog.content_dir).unwrap();
        fs::write(
            blog.content_dir.join("...mdx"),
            "---\ntitle: Dots\n---\nDots body",
        )
        .unwrap();

        run(&blog).unwrap();
        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains("hero-heading"));
        assert!(!index.contains("Dots body"));
    }

    #[test]
    fn test_rebuild_picks_up_config_changes() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::write(dir.path().join("content/a.mdx"), "---\ntitle: A\n---\n").unwrap();

        rebuild(dir.path()).unwrap();
        assert!(dir.path().join("public/blog/a/index.html").exists());

        fs::write(dir.path().join("_config.yml"), "blog_dir: posts\n").unwrap();
        rebuild(dir.path()).unwrap();
        assert!(dir.path().join("public/posts/a/index.html").exists());
    }

    #[test]
    fn test_run_fails_without_content_dir() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        let err = run(&blog).unwrap_err();
        assert!(err.to_string().contains("Content store unavailable"));
        assert!(!blog.public_dir.exists());
    }
}
