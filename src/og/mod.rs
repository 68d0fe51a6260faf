//! Open Graph preview images
//!
//! Every post and writing gets one preview image, addressed by its id. The
//! route table is built once per build; rendering is delegated to an
//! [`OgRenderer`].

mod render;

use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::OgConfig;
use crate::content::Entry;
use crate::error::{ContentError, Result};

pub use render::{OgRenderer, SvgRenderer};

/// Directory (under the output directory) holding the images
pub const OG_DIR: &str = "og";

/// Logo drawn on every image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoOptions {
    pub path: PathBuf,
    /// Display width in pixels; height follows the aspect ratio
    pub size: u32,
}

/// Everything needed to render one preview image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImageOptions {
    pub title: String,
    pub description: String,
    pub bg_gradient: [[u8; 3]; 2],
    pub logo: LogoOptions,
    pub fonts: Vec<PathBuf>,
}

/// Fixed styling shared by every image of a build
#[derive(Debug, Clone, PartialEq)]
pub struct OgAssets {
    pub bg_gradient: [[u8; 3]; 2],
    pub logo: LogoOptions,
    pub fonts: Vec<PathBuf>,
}

impl OgAssets {
    /// Resolve configured asset paths against the site base directory
    pub fn from_config(config: &OgConfig, base_dir: &Path) -> Self {
        Self {
            bg_gradient: config.bg_gradient,
            logo: LogoOptions {
                path: base_dir.join(&config.logo),
                size: config.logo_size,
            },
            fonts: config.fonts.iter().map(|f| base_dir.join(f)).collect(),
        }
    }

    /// Image options for one entry
    pub fn options_for(&self, entry: &Entry) -> OgImageOptions {
        OgImageOptions {
            title: entry.data.title.clone(),
            description: entry.data.description.clone(),
            bg_gradient: self.bg_gradient,
            logo: self.logo.clone(),
            fonts: self.fonts.clone(),
        }
    }
}

/// Id -> image options, in insertion order (posts first, then writings)
#[derive(Debug, Clone, Default)]
pub struct OgRoutes {
    routes: IndexMap<String, OgImageOptions>,
}

impl OgRoutes {
    /// Index posts and writings by id
    ///
    /// Posts and writings share one URL space, so an id used by both is
    /// rejected.
    pub fn build(posts: &[Entry], writings: &[Entry], assets: &OgAssets) -> Result<Self> {
        let mut routes = IndexMap::with_capacity(posts.len() + writings.len());

        for entry in posts.iter().chain(writings) {
            if routes.contains_key(&entry.id) {
                return Err(ContentError::DuplicateRoute {
                    id: entry.id.clone(),
                });
            }
            routes.insert(entry.id.clone(), assets.options_for(entry));
        }

        Ok(Self { routes })
    }

    pub fn get(&self, id: &str) -> Option<&OgImageOptions> {
        self.routes.get(id)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OgImageOptions)> {
        self.routes.iter().map(|(id, opts)| (id.as_str(), opts))
    }

    /// Every distinct asset the routes reference
    fn asset_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = Vec::new();
        for opts in self.routes.values() {
            for path in std::iter::once(&opts.logo.path).chain(opts.fonts.iter()) {
                if !paths.contains(&path.as_path()) {
                    paths.push(path.as_path());
                }
            }
        }
        paths
    }
}

/// Public URL path of the image for `id`
pub fn route_path(id: &str, extension: &str) -> String {
    format!("{}/{}.{}", OG_DIR, id, extension)
}

/// Render and write every image under `<out_dir>/og/`
///
/// Assets are checked before anything is written; any failure aborts the
/// whole step. Returns the number of images written.
pub fn write_all(routes: &OgRoutes, renderer: &dyn OgRenderer, out_dir: &Path) -> Result<usize> {
    for path in routes.asset_paths() {
        if !path.is_file() {
            return Err(ContentError::MissingAsset {
                path: path.to_path_buf(),
            });
        }
    }

    let mut written = 0;
    for (id, options) in routes.iter() {
        let bytes = renderer.render(options)?;
        let output_path = out_dir.join(route_path(id, renderer.extension()));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ContentError::io(parent, e))?;
        }
        fs::write(&output_path, bytes).map_err(|e| ContentError::io(&output_path, e))?;
        tracing::debug!("Wrote OG image {:?}", output_path);
        written += 1;
    }

    tracing::info!("Generated {} OG images", written);
    Ok(written)
}
