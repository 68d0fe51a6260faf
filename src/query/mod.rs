//! Collection queries
//!
//! Every listing is sorted newest first by publication date. The sort is
//! stable, so entries published at the same instant keep load order.

use std::collections::{HashMap, HashSet};

use crate::content::{ContentKind, ContentSource, Entry};
use crate::error::Result;

/// Read-only queries over an injected content source
pub struct Query<'a> {
    source: &'a dyn ContentSource,
}

impl<'a> Query<'a> {
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self { source }
    }

    /// All entries of one kind, most recent first
    pub fn list(&self, kind: ContentKind) -> Result<Vec<Entry>> {
        let mut entries = self.source.load(kind)?;
        sort_by_date_desc(&mut entries);
        Ok(entries)
    }

    pub fn list_posts(&self) -> Result<Vec<Entry>> {
        self.list(ContentKind::Post)
    }

    pub fn list_writings(&self) -> Result<Vec<Entry>> {
        self.list(ContentKind::Writing)
    }

    pub fn list_projects(&self) -> Result<Vec<Entry>> {
        self.list(ContentKind::Project)
    }

    /// Every collection, each sorted newest first
    pub fn load_all(&self) -> Result<Collections> {
        Ok(Collections {
            posts: self.list_posts()?,
            writings: self.list_writings()?,
            projects: self.list_projects()?,
        })
    }
}

/// The three sorted collections of a build
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub posts: Vec<Entry>,
    pub writings: Vec<Entry>,
    pub projects: Vec<Entry>,
}

impl Collections {
    pub fn get(&self, kind: ContentKind) -> &[Entry] {
        match kind {
            ContentKind::Post => &self.posts,
            ContentKind::Writing => &self.writings,
            ContentKind::Project => &self.projects,
        }
    }

    /// The `count` most recent posts
    pub fn latest_posts(&self, count: usize) -> &[Entry] {
        &self.posts[..count.min(self.posts.len())]
    }

    /// Projects marked `pinned: true`, most recent first
    pub fn pinned_projects(&self) -> impl Iterator<Item = &Entry> {
        self.projects.iter().filter(|p| p.data.pinned())
    }

    pub fn len(&self) -> usize {
        self.posts.len() + self.writings.len() + self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort entries by publication date, newest first
pub fn sort_by_date_desc(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.data.pub_date.cmp(&a.data.pub_date));
}

/// Count entries per tag, most used first, then by name
pub fn tag_counts(entries: &[Entry]) -> Vec<(String, usize)> {
    let mut tags: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        let distinct: HashSet<&str> = entry.data.tags().iter().map(String::as_str).collect();
        for tag in distinct {
            *tags.entry(tag).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = tags
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}
