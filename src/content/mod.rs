//! Content module - schemas, validation and loading of collections

mod entry;
mod frontmatter;
pub mod loader;

pub use entry::{ContentKind, Entry, EntryData, EntryExtension};
pub use frontmatter::FrontMatter;
pub use loader::{ContentSource, FsContentSource};
