//! Content store - reads blog posts from a directory of content files
//!
//! Every call goes back to the filesystem. There is no cache, so two calls
//! never share state and a file dropped into the directory shows up on the
//! next listing.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentDocument, DocumentError, StoreError};

/// Result of looking up a single document by slug
///
/// Missing, unreadable and malformed files all collapse into `NotFound`:
/// a reader of the site cannot tell them apart either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(ContentDocument),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Read-only view over a directory holding one file per post
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    extension: String,
}

impl ContentStore {
    /// Create a store rooted at `root` reading files with `extension`
    /// (given with or without the leading dot)
    pub fn new<P: AsRef<Path>>(root: P, extension: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Load every document in the store, in directory order
    ///
    /// Files with another extension and subdirectories are ignored. A file
    /// that cannot be read or parsed is skipped with a warning.
    pub fn list_all(&self) -> Result<Vec<ContentDocument>, StoreError> {
        self.ensure_available()?;

        let mut docs = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(self.unavailable(
                        e.into_io_error()
                            .unwrap_or_else(|| io::Error::other("cannot enumerate store")),
                    ));
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable store entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(slug) = self.slug_for(entry.path()) else {
                continue;
            };

            // Listed slugs must be fetchable through `get`
            if self.resolve(&slug).is_none() {
                tracing::warn!("Skipping post with unusable slug: {:?}", entry.path());
                continue;
            }

            match self.load(&slug, entry.path()) {
                Ok(doc) => docs.push(doc),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", entry.path(), e),
            }
        }

        tracing::debug!("Listed {} posts from {:?}", docs.len(), self.root);
        Ok(docs)
    }

    /// Slugs of every listed document, for pre-rendering detail pages
    pub fn slugs(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.list_all()?.into_iter().map(|doc| doc.slug).collect())
    }

    /// Look up one document by slug
    ///
    /// Never fails: any slug, including ones that try to leave the store
    /// root, resolves to a document or to `Lookup::NotFound`.
    pub fn get(&self, slug: &str) -> Lookup {
        let Some(path) = self.resolve(slug) else {
            tracing::debug!("Rejected slug {:?}", slug);
            return Lookup::NotFound;
        };

        match self.load(slug, &path) {
            Ok(doc) => Lookup::Found(doc),
            Err(e) => {
                tracing::debug!("Post {:?} not found: {}", slug, e);
                Lookup::NotFound
            }
        }
    }

    /// Map a slug to its file inside the store root
    ///
    /// The slug must be exactly one plain path component; separators,
    /// `.`/`..`, prefixes and NUL bytes are refused.
    fn resolve(&self, slug: &str) -> Option<PathBuf> {
        if slug.is_empty() || slug.contains(['/', '\\', '\0']) {
            return None;
        }

        let mut components = Path::new(slug).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return None,
        }

        Some(self.root.join(format!("{}.{}", slug, self.extension)))
    }

    /// Slug for a file in the store, if it carries the document extension
    fn slug_for(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;
        if ext != self.extension {
            return None;
        }
        let stem = path.file_stem()?.to_str();
        if stem.is_none() {
            tracing::warn!("Skipping post with non UTF-8 file name: {:?}", path);
        }
        stem.map(str::to_string)
    }

    fn load(&self, slug: &str, path: &Path) -> Result<ContentDocument, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        ContentDocument::parse(slug, &content).map_err(|source| DocumentError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        let metadata = fs::metadata(&self.root).map_err(|e| self.unavailable(e))?;
        if !metadata.is_dir() {
            return Err(self.unavailable(io::Error::other("not a directory")));
        }
        Ok(())
    }

    fn unavailable(&self, source: io::Error) -> StoreError {
        StoreError::StoreUnavailable {
            path: self.root.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let store = ContentStore::new(dir.path(), "mdx");
        (dir, store)
    }

    #[test]
    fn test_hello_world_scenario() {
        let (_dir, store) = store_with(&[(
            "hello-world.mdx",
            "---\ntitle: \"Hello\"\nauthor: \"A\"\n---\nHi there",
        )]);

        let docs = store.list_all().unwrap();
        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.slug, "hello-world");
        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.author, "A");
        assert_eq!(doc.summary, "");
        assert_eq!(doc.body, "Hi there");

        assert_eq!(store.get("hello-world"), Lookup::Found(doc.clone()));
        assert_eq!(store.get("missing"), Lookup::NotFound);
    }

    #[test]
    fn test_only_matching_extension_listed() {
        let (dir, store) = store_with(&[
            ("a.mdx", "---\ntitle: A\n---\n"),
            ("b.mdx", "---\ntitle: B\n---\n"),
            ("notes.md", "---\ntitle: Not a post\n---\n"),
            ("image.png", "binary"),
            ("README", "no extension"),
        ]);
        fs::create_dir(dir.path().join("drafts.mdx")).unwrap();

        let mut slugs = store.slugs().unwrap();
        slugs.sort();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_subdirectories_not_walked() {
        let (dir, store) = store_with(&[("top.mdx", "top")]);
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/inner.mdx"), "inner").unwrap();

        assert_eq!(store.slugs().unwrap(), vec!["top"]);
    }

    #[test]
    fn test_empty_store_is_empty_list() {
        let (_dir, store) = store_with(&[]);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_store_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("content"), "mdx");
        let err = store.list_all().unwrap_err();
        assert!(matches!(err, StoreError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_file_as_store_is_unavailable() {
        let (dir, _) = store_with(&[("content", "not a dir")]);
        let store = ContentStore::new(dir.path().join("content"), "mdx");
        assert!(matches!(
            store.list_all(),
            Err(StoreError::StoreUnavailable { .. })
        ));
    }

    #[test]
    fn test_malformed_post_skipped_in_listing() {
        let (_dir, store) = store_with(&[
            ("good.mdx", "---\ntitle: Good\n---\n"),
            ("bad.mdx", "---\ntitle: [unclosed\n---\n"),
        ]);

        assert_eq!(store.slugs().unwrap(), vec!["good"]);
        assert_eq!(store.get("bad"), Lookup::NotFound);
    }

    #[test]
    fn test_get_with_missing_store_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path().join("nope"), "mdx");
        assert_eq!(store.get("anything"), Lookup::NotFound);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        fs::create_dir(&content).unwrap();
        fs::write(dir.path().join("secret.mdx"), "---\ntitle: Secret\n---\n").unwrap();
        let store = ContentStore::new(&content, "mdx");

        for slug in [
            "../secret",
            "..",
            ".",
            "",
            "../../etc/passwd",
            "/etc/passwd",
            "sub/../../secret",
            "..\\secret",
            "secret\0",
        ] {
            assert_eq!(store.get(slug), Lookup::NotFound, "slug {:?}", slug);
        }
    }

    #[test]
    fn test_get_arbitrary_strings() {
        let (_dir, store) = store_with(&[("post.mdx", "body")]);
        for slug in ["post.mdx", "POST", " post", "post?x=1", "日本語", "%2e%2e"] {
            assert!(!store.get(slug).is_found(), "slug {:?}", slug);
        }
        assert!(store.get("post").is_found());
    }

    #[test]
    fn test_extension_with_leading_dot() {
        let (dir, _) = store_with(&[("a.mdx", "x")]);
        let store = ContentStore::new(dir.path(), ".mdx");
        assert_eq!(store.extension(), "mdx");
        assert!(store.get("a").is_found());
    }

    #[test]
    fn test_reads_are_fresh() {
        let (dir, store) = store_with(&[("a.mdx", "---\ntitle: First\n---\n")]);
        assert_eq!(store.list_all().unwrap()[0].title, "First");

        fs::write(dir.path().join("a.mdx"), "---\ntitle: Second\n---\n").unwrap();
        fs::write(dir.path().join("b.mdx"), "b").unwrap();

        let Lookup::Found(doc) = store.get("a") else {
            panic!("expected a");
        };
        assert_eq!(doc.title, "Second");
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_unfetchable_file_names_not_listed() {
        let (dir, store) = store_with(&[
            ("good.mdx", "---\ntitle: Good\n---\n"),
            ("...mdx", "---\ntitle: Dots\n---\n"),
        ]);
        if cfg!(unix) {
            fs::write(dir.path().join("a\\b.mdx"), "---\ntitle: Slash\n---\n").unwrap();
        }

        let docs = store.list_all().unwrap();
        assert_eq!(docs.len(), 1);
        for doc in docs {
            assert_eq!(store.get(&doc.slug), Lookup::Found(doc.clone()));
        }
    }
}
