//! Generator module - writes the build artifacts for the rendering layer

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

use crate::config::SiteConfig;
use crate::content::{ContentKind, Entry, EntryExtension};
use crate::helpers::{date_xml, escape_xml, format_date, strip_invalid_xml_chars};
use crate::og::{self, OgAssets, OgRenderer, OgRoutes, SvgRenderer};
use crate::query::Collections;
use crate::Folio;

/// Number of posts included in the Atom feed
const FEED_LIMIT: usize = 20;

/// Build artifact writer
pub struct Generator<'a> {
    folio: &'a Folio,
    renderer: Box<dyn OgRenderer>,
}

/// Summary of one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub entries: usize,
    pub og_images: usize,
    pub feed: bool,
}

impl<'a> Generator<'a> {
    /// Create a generator using the built-in SVG renderer
    pub fn new(folio: &'a Folio) -> Self {
        Self::with_renderer(folio, Box::new(SvgRenderer::new()))
    }

    pub fn with_renderer(folio: &'a Folio, renderer: Box<dyn OgRenderer>) -> Self {
        Self { folio, renderer }
    }

    /// Write every artifact for the loaded collections
    pub fn generate(&self, collections: &Collections) -> Result<BuildReport> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create output directory {:?}", public_dir))?;

        let og_images = self.generate_og_images(collections)?;
        self.generate_manifest(collections)?;

        let feed = self.folio.config.rss;
        if feed {
            self.generate_atom_feed(&collections.posts)?;
        }

        Ok(BuildReport {
            entries: collections.len(),
            og_images,
            feed,
        })
    }

    /// Render one preview image per post and writing
    fn generate_og_images(&self, collections: &Collections) -> Result<usize> {
        let assets = OgAssets::from_config(&self.folio.config.og, &self.folio.base_dir);
        let routes = OgRoutes::build(&collections.posts, &collections.writings, &assets)?;
        let written = og::write_all(&routes, self.renderer.as_ref(), &self.folio.public_dir)?;
        Ok(written)
    }

    /// Write content.json for the rendering layer
    fn generate_manifest(&self, collections: &Collections) -> Result<()> {
        let config = &self.folio.config;
        let manifest = Manifest {
            site: config,
            posts: self.manifest_entries(&collections.posts),
            writings: self.manifest_entries(&collections.writings),
            projects: self.manifest_entries(&collections.projects),
            latest_posts: collections
                .latest_posts(config.latest_posts)
                .iter()
                .map(|p| p.id.as_str())
                .collect(),
            pinned_projects: collections
                .pinned_projects()
                .map(|p| p.id.as_str())
                .collect(),
        };

        let output_path = self.folio.public_dir.join("content.json");
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(&output_path, json)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::info!("Generated content.json");

        Ok(())
    }

    fn manifest_entries<'e>(&self, entries: &'e [Entry]) -> Vec<ManifestEntry<'e>> {
        entries
            .iter()
            .map(|e| {
                ManifestEntry::new(e, &self.folio.config.date_format, self.renderer.extension())
            })
            .collect()
    }

    /// Generate Atom feed of the newest posts
    fn generate_atom_feed(&self, posts: &[Entry]) -> Result<()> {
        let config = &self.folio.config;
        let base_url = config.domain.trim_end_matches('/');
        let updated = posts
            .iter()
            .map(|p| p.data.updated_date.unwrap_or(p.data.pub_date))
            .max()
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!(
            "  <title>{}</title>\n",
            escape_xml(&config.meta.title)
        ));
        feed.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            escape_xml(&config.meta.description)
        ));
        feed.push_str(&format!("  <link href=\"{}/atom.xml\" rel=\"self\"/>\n", base_url));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.site_name)
        ));

        for post in posts.iter().take(FEED_LIMIT) {
            let link = format!("{}{}", base_url, entry_path(post));
            feed.push_str("  <entry>\n");
            feed.push_str(&format!(
                "    <title>{}</title>\n",
                escape_xml(&strip_invalid_xml_chars(&post.data.title))
            ));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                post.data.pub_date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                post.data.updated_date.unwrap_or(post.data.pub_date).to_rfc3339()
            ));
            for tag in post.data.tags() {
                feed.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(tag)));
            }
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&strip_invalid_xml_chars(&post.data.description))
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.folio.public_dir.join("atom.xml");
        fs::write(&output_path, feed)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }
}

/// Site-relative page path of an entry
pub fn entry_path(entry: &Entry) -> String {
    format!("/{}/{}/", entry.kind.dir_name(), entry.id)
}

#[derive(Serialize)]
struct Manifest<'a> {
    site: &'a SiteConfig,
    posts: Vec<ManifestEntry<'a>>,
    writings: Vec<ManifestEntry<'a>>,
    projects: Vec<ManifestEntry<'a>>,
    latest_posts: Vec<&'a str>,
    pinned_projects: Vec<&'a str>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    id: &'a str,
    kind: ContentKind,
    path: String,
    title: &'a str,
    description: &'a str,
    pub_date: String,
    updated_date: Option<String>,
    display_date: String,
    tags: &'a [String],
    hero_image: Option<&'a str>,
    og_image: Option<&'a str>,
    og_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinned: Option<bool>,
}

impl<'a> ManifestEntry<'a> {
    fn new(entry: &'a Entry, date_format: &str, og_extension: &str) -> Self {
        let data = &entry.data;
        let generated_og = match entry.kind {
            ContentKind::Post | ContentKind::Writing => {
                Some(format!("/{}", og::route_path(&entry.id, og_extension)))
            }
            ContentKind::Project => None,
        };
        let pinned = match data.extension {
            EntryExtension::Project { pinned } => Some(pinned.unwrap_or(false)),
            EntryExtension::None => None,
        };

        Self {
            id: &entry.id,
            kind: entry.kind,
            path: entry_path(entry),
            title: &data.title,
            description: &data.description,
            pub_date: date_xml(&data.pub_date),
            updated_date: data.updated_date.as_ref().map(date_xml),
            display_date: format_date(Some(data.pub_date.into()), date_format),
            tags: data.tags(),
            hero_image: data.hero_image.as_deref(),
            og_image: data.og_image.as_deref(),
            og_image_url: data.og_image.clone().or(generated_og),
            pinned,
        }
    }
}
