//! Helper functions
//!
//! Date formatting for display plus the small text utilities used when
//! writing XML artifacts.

mod date;
mod text;

pub use date::*;
pub use text::*;
