//! SVG rendering of preview images

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

use super::OgImageOptions;
use crate::error::{ContentError, Result};
use crate::helpers::{escape_xml, strip_invalid_xml_chars, truncate, word_wrap};

/// Turns image options into encoded image bytes
pub trait OgRenderer {
    fn render(&self, options: &OgImageOptions) -> Result<Vec<u8>>;

    /// File extension of the produced images
    fn extension(&self) -> &'static str;
}

/// Renders a self-contained 1200x630 SVG
///
/// The logo and fonts are embedded as data URIs so the file needs nothing
/// else at display time.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub title_size: u32,
    pub description_size: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 630,
            padding: 60,
            title_size: 64,
            description_size: 36,
        }
    }
}

const TITLE_MAX_LINES: usize = 3;
const DESCRIPTION_MAX_LINES: usize = 4;
const LINE_HEIGHT: f32 = 1.25;

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Approximate characters per line for a font size
    fn chars_per_line(&self, font_size: u32) -> usize {
        let usable = self.width.saturating_sub(self.padding * 2) as f32;
        // Average glyph advance is roughly half the em size
        ((usable / (font_size as f32 * 0.55)) as usize).max(1)
    }

    fn text_block(
        &self,
        text: &str,
        font_size: u32,
        max_lines: usize,
        top: f32,
        fill: &str,
        weight: &str,
    ) -> (String, f32) {
        let text = strip_invalid_xml_chars(text);
        let lines = wrap_lines(&text, self.chars_per_line(font_size), max_lines);
        let line_height = font_size as f32 * LINE_HEIGHT;

        let mut svg = format!(
            r#"<text font-family="{}" font-size="{}" font-weight="{}" fill="{}">"#,
            FONT_STACK, font_size, weight, fill
        );
        let mut y = top;
        for line in &lines {
            y += line_height;
            svg.push_str(&format!(
                r#"<tspan x="{}" y="{:.0}">{}</tspan>"#,
                self.padding,
                y,
                escape_xml(line)
            ));
        }
        svg.push_str("</text>");
        (svg, y)
    }
}

const FONT_STACK: &str = "og-font, sans-serif";

impl OgRenderer for SvgRenderer {
    fn render(&self, options: &OgImageOptions) -> Result<Vec<u8>> {
        let logo = data_uri(&options.logo.path)?;
        let mut font_faces = String::new();
        for font in &options.fonts {
            font_faces.push_str(&format!(
                "@font-face{{font-family:og-font;src:url({});}}",
                data_uri(font)?
            ));
        }

        let [from, to] = options.bg_gradient;
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        svg.push_str("<defs>");
        svg.push_str(&format!(
            r#"<linearGradient id="bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient>"#,
            rgb(from),
            rgb(to)
        ));
        svg.push_str(&format!("<style>{}</style>", font_faces));
        svg.push_str("</defs>");
        svg.push_str(r#"<rect width="100%" height="100%" fill="url(#bg)"/>"#);

        let padding = self.padding as f32;
        let logo_size = options.logo.size as f32;
        svg.push_str(&format!(
            r#"<image x="{p}" y="{p}" width="{s}" height="{s}" preserveAspectRatio="xMinYMin meet" href="{uri}"/>"#,
            p = self.padding,
            s = options.logo.size,
            uri = logo
        ));

        let title_top = padding + logo_size + padding / 2.0;
        let (title, title_bottom) = self.text_block(
            &options.title,
            self.title_size,
            TITLE_MAX_LINES,
            title_top,
            "#ffffff",
            "bold",
        );
        svg.push_str(&title);

        let (description, _) = self.text_block(
            &options.description,
            self.description_size,
            DESCRIPTION_MAX_LINES,
            title_bottom + padding / 3.0,
            "#c8c8c8",
            "normal",
        );
        svg.push_str(&description);
        svg.push_str("</svg>\n");

        Ok(svg.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

/// Wrap to at most `max_lines`, marking the cut with an ellipsis
fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = word_wrap(text, width);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = truncate(&format!("{} ...", last), width, Some("..."));
        }
    }
    lines
}

fn rgb([r, g, b]: [u8; 3]) -> String {
    format!("rgb({},{},{})", r, g, b)
}

/// Read an asset and encode it as a data URI
fn data_uri(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ContentError::MissingAsset {
            path: path.to_path_buf(),
        },
        _ => ContentError::io(path, e),
    })?;
    Ok(format!("data:{};base64,{}", mime_type(path), STANDARD.encode(bytes)))
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("otf") => "font/otf",
        Some("ttf") => "font/ttf",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
