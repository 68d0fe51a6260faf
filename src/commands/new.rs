//! Create a new content file

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::ContentKind;
use crate::helpers::format_date;
use crate::Folio;

/// Scaffold a content file whose front-matter passes validation
///
/// The description is a placeholder to be edited before publishing.
pub fn create_entry(folio: &Folio, title: &str, kind: ContentKind) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Title must not be empty");
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let target_dir = folio.content_dir.join(kind.dir_name());
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {:?}", target_dir))?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = format_date(None, "YYYY-MM-DD HH:mm:ss");
    let mut content = String::from("---\n");
    content.push_str(&format!("title: {}\n", serde_yaml::to_string(title)?.trim_end()));
    content.push_str(&format!("description: {}\n", serde_yaml::to_string(title)?.trim_end()));
    content.push_str(&format!("pubDate: {}\n", now));
    if kind == ContentKind::Project {
        content.push_str("pinned: false\n");
    }
    content.push_str("tags: []\n");
    content.push_str("---\n\n");

    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created {} entry {:?}", kind, file_path);

    Ok(file_path)
}
