//! Error types for content loading and image generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading content or producing build artifacts
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid front-matter in {path:?}: `{field}` {constraint}")]
    SchemaValidation {
        path: PathBuf,
        field: String,
        constraint: String,
    },

    #[error("Missing asset: {path:?}")]
    MissingAsset { path: PathBuf },

    #[error("Duplicate OG image route: {id}")]
    DuplicateRoute { id: String },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed YAML in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ContentError {
    pub(crate) fn schema(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::SchemaValidation {
            path: path.into(),
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
