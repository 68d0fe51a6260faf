//! Site configuration (folio.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable holding the Twikoo environment id
pub const TWIKOO_ENV_VAR: &str = "PUBLIC_TWIKOO_ENV_ID";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub default_language: String,
    pub site_name: String,
    pub domain: String,
    pub meta: MetaConfig,
    pub google_analytics_id: String,
    pub social: Vec<SocialLink>,

    // Features
    pub rss: bool,
    pub navigation: NavigationConfig,
    pub latest_posts: usize,
    pub comments: CommentsConfig,
    pub page_meta: PageMetaConfig,
    pub og: OgConfig,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Date / Time format
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            site_name: "Just Build it...".to_string(),
            domain: "https://vikuuu.github.io".to_string(),
            meta: MetaConfig::default(),
            google_analytics_id: String::new(),
            social: vec![SocialLink {
                icon: "github".to_string(),
                label: "GitHub".to_string(),
                link: "https://github.com/Vikuuu".to_string(),
            }],

            rss: true,
            navigation: NavigationConfig::default(),
            latest_posts: 5,
            comments: CommentsConfig::default(),
            page_meta: PageMetaConfig::default(),
            og: OgConfig::default(),

            content_dir: "src/content".to_string(),
            public_dir: "dist".to_string(),

            date_format: "YYYY-MM-DD".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.resolve_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Fill values that are sourced from the environment
    ///
    /// An explicit value in the file wins over the environment.
    pub fn resolve_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.comments.twikoo.env_id.is_empty() {
            self.comments.twikoo.env_id = lookup(TWIKOO_ENV_VAR).unwrap_or_default();
        }
    }

    /// Whether the comment widget should be rendered at all
    pub fn comments_active(&self) -> bool {
        self.comments.enabled
            && self.comments.twikoo.enabled
            && !self.comments.twikoo.env_id.is_empty()
    }
}

/// Site metadata used in page heads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    pub favicon: String,
    pub url: String,
    pub title: String,
    pub slogan: String,
    pub description: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            favicon: "/avatar.png".to_string(),
            url: "https://vikuuu.github.io".to_string(),
            title: "Just Build it...".to_string(),
            slogan: "Reinventing the wheel...?".to_string(),
            description: "Reading, Photography, Programming, Traveling".to_string(),
        }
    }
}

/// A social profile link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub icon: String,
    pub label: String,
    pub link: String,
}

/// Which top-level navigation entries are shown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub home: bool,
    pub archive: bool,
    pub writings: bool,
    pub about: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            home: true,
            archive: true,
            writings: true,
            about: true,
        }
    }
}

/// Comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enabled: bool,
    pub twikoo: TwikooConfig,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            twikoo: TwikooConfig::default(),
        }
    }
}

/// Twikoo comment backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwikooConfig {
    pub enabled: bool,
    pub env_id: String,
}

impl Default for TwikooConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            env_id: String::new(),
        }
    }
}

/// Per-page head metadata for the listing pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetaConfig {
    pub archive: PageMeta,
    pub writings: PageMeta,
    pub about: PageMeta,
}

impl Default for PageMetaConfig {
    fn default() -> Self {
        Self {
            archive: PageMeta {
                title: "All Posts".to_string(),
                description: "Here are all the posts".to_string(),
                og_image: "/images/page-meta/en/archive.png".to_string(),
            },
            writings: PageMeta {
                title: "Writings".to_string(),
                description: "Here are all my writings".to_string(),
                og_image: String::new(),
            },
            about: PageMeta {
                title: "About Me".to_string(),
                description: "Here is Guoqi Sun's self-introduction".to_string(),
                og_image: "/images/page-meta/en/about.png".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub og_image: String,
}

/// Open Graph image assets and styling
///
/// Asset paths are relative to the site base directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OgConfig {
    pub logo: String,
    pub logo_size: u32,
    pub fonts: Vec<String>,
    pub bg_gradient: [[u8; 3]; 2],
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            logo: "public/avatar.png".to_string(),
            logo_size: 100,
            fonts: vec!["public/fonts/hwmc.otf".to_string()],
            bg_gradient: [[6, 38, 45], [8, 3, 2]],
        }
    }
}
