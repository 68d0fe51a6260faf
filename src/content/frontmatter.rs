//! Front-matter parsing

use serde::Deserialize;
use serde_yaml::Value;
use std::collections::HashMap;

/// Raw front-matter of a content file, before schema validation
///
/// Every field is kept as an untyped YAML value so that validation can
/// report exactly which field is wrong and why.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub pub_date: Option<Value>,
    pub updated_date: Option<Value>,
    pub hero_image: Option<Value>,
    pub og_image: Option<Value>,
    pub tags: Option<Value>,
    pub pinned: Option<Value>,
    /// Overrides the id derived from the file path
    pub slug: Option<Value>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content that does not open with a `---` fence has no front-matter. An
    /// opening fence without a closing one is treated the same way.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}');
        let trimmed = content.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };

        // The opening fence must be alone on its line
        let Some(line_end) = rest.find('\n') else {
            return Ok((FrontMatter::default(), content));
        };
        if !rest[..line_end].trim().is_empty() {
            return Ok((FrontMatter::default(), content));
        }
        let rest = &rest[line_end + 1..];

        let Some((yaml_content, remaining)) = split_closing_fence(rest) else {
            return Ok((FrontMatter::default(), content));
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, remaining))
    }
}

/// Find the closing `---` line, returning (yaml, body)
fn split_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }
    None
}
