//! Validated content entries

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_yaml::Value;
use std::fmt;
use std::path::{Path, PathBuf};

use super::FrontMatter;
use crate::error::{ContentError, Result};
use crate::helpers::{parse_date_string, DateInput};

/// The content variants of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Writing,
    Project,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Post, ContentKind::Writing, ContentKind::Project];

    /// Directory holding this collection, relative to the content directory
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Post => "posts",
            ContentKind::Writing => "writings",
            ContentKind::Project => "projects",
        }
    }

    /// Parse a user-supplied kind name (singular or plural)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "post" | "posts" => Some(ContentKind::Post),
            "writing" | "writings" => Some(ContentKind::Writing),
            "project" | "projects" => Some(ContentKind::Project),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Fields only some variants carry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum EntryExtension {
    None,
    Project { pinned: Option<bool> },
}

/// Front-matter shared by every variant, after validation
#[derive(Debug, Clone, PartialEq)]
pub struct EntryData {
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Local>,
    pub updated_date: Option<DateTime<Local>>,
    pub hero_image: Option<String>,
    pub og_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub extension: EntryExtension,
}

impl EntryData {
    /// Validate raw front-matter against the schema of `kind`
    ///
    /// The first violation is returned; nothing is partially accepted.
    pub fn validate(kind: ContentKind, fm: &FrontMatter, path: &Path) -> Result<Self> {
        let v = Validator { path };

        let title = v.required_string("title", fm.title.as_ref())?;
        let description = v.required_string("description", fm.description.as_ref())?;
        let pub_date = v.required_date("pubDate", fm.pub_date.as_ref())?;
        let updated_date = v.optional_date("updatedDate", fm.updated_date.as_ref())?;
        let hero_image = v.optional_string("heroImage", fm.hero_image.as_ref())?;
        let og_image = v.optional_string("ogImage", fm.og_image.as_ref())?;
        let tags = v.optional_strings("tags", fm.tags.as_ref())?;

        let extension = match kind {
            ContentKind::Project => EntryExtension::Project {
                pinned: v.optional_bool("pinned", fm.pinned.as_ref())?,
            },
            ContentKind::Post | ContentKind::Writing => EntryExtension::None,
        };

        Ok(Self {
            title,
            description,
            pub_date,
            updated_date,
            hero_image,
            og_image,
            tags,
            extension,
        })
    }

    /// Tags in front-matter order, empty when none were given
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Whether a project asked to be pinned
    pub fn pinned(&self) -> bool {
        matches!(
            self.extension,
            EntryExtension::Project { pinned: Some(true) }
        )
    }
}

/// One validated content file
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Unique within its collection
    pub id: String,
    pub kind: ContentKind,
    pub data: EntryData,
    /// Raw markdown after the front-matter
    pub body: String,
    /// Full source file path
    pub source: PathBuf,
}

struct Validator<'a> {
    path: &'a Path,
}

impl Validator<'_> {
    fn fail(&self, field: &str, constraint: &str) -> ContentError {
        ContentError::schema(self.path, field, constraint)
    }

    fn required_string(&self, field: &str, value: Option<&Value>) -> Result<String> {
        match value {
            None => Err(self.fail(field, "is required")),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(self.fail(field, "must be a non-empty string"))
            }
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.fail(field, "must be a string")),
        }
    }

    fn optional_string(&self, field: &str, value: Option<&Value>) -> Result<Option<String>> {
        match value {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.fail(field, "must be a string")),
        }
    }

    fn optional_strings(&self, field: &str, value: Option<&Value>) -> Result<Option<Vec<String>>> {
        let Some(value) = value else {
            return Ok(None);
        };
        let Value::Sequence(items) = value else {
            return Err(self.fail(field, "must be a list of strings"));
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(self.fail(field, "must be a list of strings")),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn optional_bool(&self, field: &str, value: Option<&Value>) -> Result<Option<bool>> {
        match value {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.fail(field, "must be a boolean")),
        }
    }

    fn required_date(&self, field: &str, value: Option<&Value>) -> Result<DateTime<Local>> {
        match self.optional_date(field, value)? {
            Some(date) => Ok(date),
            None => Err(self.fail(field, "is required")),
        }
    }

    fn optional_date(&self, field: &str, value: Option<&Value>) -> Result<Option<DateTime<Local>>> {
        let parsed = match value {
            None => return Ok(None),
            Some(Value::String(s)) => parse_date_string(s),
            Some(Value::Number(n)) => n.as_i64().and_then(|ms| DateInput::Millis(ms).coerce()),
            Some(_) => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| self.fail(field, "must be a valid date"))
    }
}
