//! List site content

use anyhow::Result;

use crate::content::ContentKind;
use crate::helpers::format_date;
use crate::query::{tag_counts, Query};
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    for line in lines(folio, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Output lines for `list <content_type>`
pub fn lines(folio: &Folio, content_type: &str) -> Result<Vec<String>> {
    let source = folio.source();
    let query = Query::new(&source);
    let mut out = Vec::new();

    if let Some(kind) = ContentKind::from_name(content_type) {
        let entries = query.list(kind)?;
        out.push(format!("{} ({}):", capitalize(kind.dir_name()), entries.len()));
        for entry in entries {
            let pin = if entry.data.pinned() { " *" } else { "" };
            out.push(format!(
                "  {} - {} [{}]{}",
                format_date(Some(entry.data.pub_date.into()), &folio.config.date_format),
                entry.data.title,
                entry.id,
                pin
            ));
        }
        return Ok(out);
    }

    match content_type {
        "tag" | "tags" => {
            let mut entries = query.list_posts()?;
            entries.extend(query.list_writings()?);
            let tags = tag_counts(&entries);
            out.push(format!("Tags ({}):", tags.len()));
            for (tag, count) in tags {
                out.push(format!("  {} ({})", tag, count));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, writings, projects, tags",
                content_type
            );
        }
    }

    Ok(out)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
