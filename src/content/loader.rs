//! Content loader - loads collections from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentKind, Entry, EntryData, FrontMatter};
use crate::error::{ContentError, Result};

/// Something that can produce every validated entry of a collection
///
/// Queries and the OG image step only depend on this, so the backing store
/// can be swapped without touching them.
pub trait ContentSource {
    fn load(&self, kind: ContentKind) -> Result<Vec<Entry>>;
}

/// Loads collections from `<root>/<kind>/**/*.{md,mdx}`
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    /// Create a loader rooted at the content directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the files of one collection
    pub fn collection_dir(&self, kind: ContentKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Load a single entry from a file
    fn load_entry(&self, kind: ContentKind, base: &Path, path: &Path) -> Result<Entry> {
        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|source| ContentError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

        let data = EntryData::validate(kind, &fm, path)?;

        let id = match &fm.slug {
            None => entry_id(base, path),
            Some(serde_yaml::Value::String(slug)) if !slug.trim().is_empty() => {
                slug_id(slug).ok_or_else(|| {
                    ContentError::schema(path, "slug", "must be a path of non-empty segments")
                })?
            }
            Some(_) => {
                return Err(ContentError::schema(
                    path,
                    "slug",
                    "must be a non-empty string",
                ))
            }
        };

        Ok(Entry {
            id,
            kind,
            data,
            body: body.to_string(),
            source: path.to_path_buf(),
        })
    }
}

impl ContentSource for FsContentSource {
    fn load(&self, kind: ContentKind) -> Result<Vec<Entry>> {
        let dir = self.collection_dir(kind);
        if !dir.is_dir() {
            return Err(ContentError::io(
                &dir,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} collection directory not found", kind),
                ),
            ));
        }

        let mut entries = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        let walker = WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_ignored(e.path()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
                ContentError::io(path, e.into())
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if !is_markdown_file(path) {
                tracing::debug!("Skipping non-markdown file {:?}", path);
                continue;
            }

            tracing::debug!("Loading {} entry {:?}", kind, path);
            let loaded = self.load_entry(kind, &dir, path)?;

            if let Some(previous) = seen.insert(loaded.id.clone(), path.to_path_buf()) {
                return Err(ContentError::schema(
                    path,
                    "id",
                    format!("must be unique, `{}` is also used by {:?}", loaded.id, previous),
                ));
            }
            entries.push(loaded);
        }

        tracing::info!("Loaded {} {}", entries.len(), kind);
        Ok(entries)
    }
}

/// Build an entry id from its path relative to the collection directory
///
/// Each segment is slugified; a trailing `index` names its parent directory.
pub fn entry_id(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path).with_extension("");

    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(slug::slugify)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().map(String::as_str) == Some("index") {
        segments.pop();
    }

    segments.join("/")
}

/// Build an entry id from a front-matter `slug` override
///
/// Segments are slugified like generated ids. Empty segments and `.`/`..`
/// are refused so the id always stays below the output directory.
fn slug_id(slug: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in slug.trim().trim_matches('/').split('/') {
        let segment = segment.trim();
        if segment.is_empty() || segment == "." || segment == ".." {
            return None;
        }
        let slugged = slug::slugify(segment);
        if slugged.is_empty() {
            return None;
        }
        segments.push(slugged);
    }
    Some(segments.join("/"))
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx")
        .unwrap_or(false)
}

/// Files and directories starting with `_` or `.` are not content
fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('_') || n.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndescription: About {title}\npubDate: {date}\n---\n\nBody of {title}.\n")
    }

    #[test]
    fn test_load_collection() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        write(&posts, "first.md", &post("First", "2024-01-01"));
        write(&posts, "2024/Second Post.mdx", &post("Second", "2024-02-01"));
        write(&posts, "notes.txt", "not content");
        write(&posts, "_draft.md", "---\n---\n");

        let source = FsContentSource::new(tmp.path());
        let entries = source.load(ContentKind::Post).unwrap();

        assert_eq!(entries.len(), 2);
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert!(ids.contains(&"first"));
        assert!(ids.contains(&"2024/second-post"));

        let first = entries.iter().find(|e| e.id == "first").unwrap();
        assert_eq!(first.kind, ContentKind::Post);
        assert_eq!(first.data.title, "First");
        assert_eq!(first.body, "Body of First.\n");
    }

    #[test]
    fn test_missing_title_fails_collection() {
        let tmp = TempDir::new().unwrap();
        let writings = tmp.path().join("writings");
        write(&writings, "good.md", &post("Good", "2024-01-01"));
        write(
            &writings,
            "bad.md",
            "---\ndescription: no title\npubDate: 2024-01-01\n---\n",
        );

        let err = FsContentSource::new(tmp.path())
            .load(ContentKind::Writing)
            .unwrap_err();
        match err {
            ContentError::SchemaValidation { path, field, .. } => {
                assert!(path.ends_with("bad.md"));
                assert_eq!(field, "title");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let err = FsContentSource::new(tmp.path())
            .load(ContentKind::Project)
            .unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn test_slug_override_and_duplicates() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        write(
            &posts,
            "a.md",
            "---\ntitle: A\ndescription: d\npubDate: 2024-01-01\nslug: custom/path\n---\n",
        );

        let entries = FsContentSource::new(tmp.path()).load(ContentKind::Post).unwrap();
        assert_eq!(entries[0].id, "custom/path");

        write(&posts, "custom/path.md", &post("B", "2024-01-02"));
        let err = FsContentSource::new(tmp.path())
            .load(ContentKind::Post)
            .unwrap_err();
        match err {
            ContentError::SchemaValidation { field, .. } => assert_eq!(field, "id"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_slug_cannot_leave_collection() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        for slug in ["../../../escaped", "a//b", "./here", "2024/.."] {
            write(
                &posts,
                "a.md",
                &format!("---\ntitle: A\ndescription: d\npubDate: 2024-01-01\nslug: {slug}\n---\n"),
            );
            let err = FsContentSource::new(tmp.path())
                .load(ContentKind::Post)
                .unwrap_err();
            match err {
                ContentError::SchemaValidation { field, .. } => assert_eq!(field, "slug", "{slug}"),
                other => panic!("unexpected error for {slug}: {other}"),
            }
        }
    }

    #[test]
    fn test_slug_segments_are_slugified() {
        assert_eq!(slug_id("/2024/My Trip/").as_deref(), Some("2024/my-trip"));
        assert_eq!(slug_id("Hello World").as_deref(), Some("hello-world"));
        assert_eq!(slug_id("../up"), None);
    }

    #[test]
    fn test_entry_id() {
        let base = Path::new("/content/posts");
        assert_eq!(entry_id(base, Path::new("/content/posts/Hello World.md")), "hello-world");
        assert_eq!(entry_id(base, Path::new("/content/posts/2024/trip/index.md")), "2024/trip");
        assert_eq!(entry_id(base, Path::new("/content/posts/index.md")), "index");
    }
}
