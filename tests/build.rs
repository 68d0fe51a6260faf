use std::fs;
use std::path::Path;

use folio_rs::config::SiteConfig;
use folio_rs::{ContentError, Folio};
use tempfile::TempDir;

fn write(base: &Path, rel: &str, content: &[u8]) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn entry(title: &str, date: &str, extra: &str) -> Vec<u8> {
    format!("---\ntitle: {title}\ndescription: Notes on {title}\npubDate: {date}\n{extra}---\n\nBody.\n")
        .into_bytes()
}

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();
    write(base, "public/avatar.png", b"\x89PNG");
    write(base, "public/fonts/hwmc.otf", b"OTTO");
    write(base, "src/content/posts/older.md", &entry("Older", "2023-05-01", "tags: [rust]\n"));
    write(base, "src/content/posts/newer.md", &entry("Newer", "2024-02-10", "tags: [rust, web]\n"));
    write(base, "src/content/writings/essay.mdx", &entry("Essay", "2024-01-01", ""));
    write(base, "src/content/projects/tool.md", &entry("Tool", "2022-01-01", "pinned: true\n"));
    tmp
}

#[test]
fn generate_writes_all_artifacts() {
    let tmp = site();
    let folio = Folio::with_config(tmp.path(), SiteConfig::default());

    let report = folio.generate().unwrap();
    assert_eq!(report.entries, 4);
    assert_eq!(report.og_images, 3);
    assert!(report.feed);

    let dist = tmp.path().join("dist");
    for id in ["older", "newer", "essay"] {
        let svg = fs::read_to_string(dist.join(format!("og/{id}.svg"))).unwrap();
        assert!(svg.contains(&format!("Notes on {}", id[..1].to_uppercase() + &id[1..])));
    }
    assert!(!dist.join("og/tool.svg").exists());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dist.join("content.json")).unwrap()).unwrap();
    let post_ids: Vec<_> = manifest["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(post_ids, ["newer", "older"]);
    assert_eq!(manifest["posts"][0]["display_date"], "2024-02-10");
    assert_eq!(manifest["posts"][0]["og_image_url"], "/og/newer.svg");
    assert_eq!(manifest["projects"][0]["pinned"], true);
    assert_eq!(manifest["pinned_projects"][0], "tool");
    assert_eq!(manifest["site"]["latest_posts"], 5);

    let feed = fs::read_to_string(dist.join("atom.xml")).unwrap();
    assert!(feed.contains("<title>Newer</title>"));
    assert!(feed.find("Newer").unwrap() < feed.find("Older").unwrap());
    assert!(!feed.contains("Essay"));
}

#[test]
fn rss_disabled_skips_feed() {
    let tmp = site();
    let config = SiteConfig {
        rss: false,
        ..SiteConfig::default()
    };
    let folio = Folio::with_config(tmp.path(), config);

    let report = folio.generate().unwrap();
    assert!(!report.feed);
    assert!(!tmp.path().join("dist/atom.xml").exists());
}

#[test]
fn invalid_entry_fails_the_build() {
    let tmp = site();
    write(
        tmp.path(),
        "src/content/writings/broken.md",
        b"---\ndescription: no title here\npubDate: 2024-01-01\n---\n",
    );
    let folio = Folio::with_config(tmp.path(), SiteConfig::default());

    let err = folio.generate().unwrap_err();
    let schema = err
        .chain()
        .find_map(|e| e.downcast_ref::<ContentError>())
        .expect("schema error in chain");
    assert!(matches!(
        schema,
        ContentError::SchemaValidation { field, .. } if field == "title"
    ));
    assert!(!tmp.path().join("dist/content.json").exists());
}

#[test]
fn missing_font_fails_the_build() {
    let tmp = site();
    fs::remove_file(tmp.path().join("public/fonts/hwmc.otf")).unwrap();
    let folio = Folio::with_config(tmp.path(), SiteConfig::default());

    let err = folio.generate().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::MissingAsset { .. })
    ));
    assert!(!tmp.path().join("dist/og").exists());
}

#[test]
fn config_file_is_loaded() {
    let tmp = site();
    write(
        tmp.path(),
        "folio.yml",
        b"site_name: Test Site\npublic_dir: out\ndate_format: DD/MM/YYYY\nlatest_posts: 1\n",
    );
    let folio = Folio::new(tmp.path()).unwrap();
    assert_eq!(folio.config.site_name, "Test Site");
    assert_eq!(folio.public_dir, tmp.path().join("out"));

    folio.generate().unwrap();
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("out/content.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["posts"][0]["display_date"], "10/02/2024");
    assert_eq!(manifest["latest_posts"].as_array().unwrap().len(), 1);

    folio.clean().unwrap();
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn slug_cannot_escape_output_dir() {
    let tmp = site();
    write(
        tmp.path(),
        "src/content/posts/sneaky.md",
        &entry("Sneaky", "2024-01-01", "slug: ../../../escaped\n"),
    );
    let folio = Folio::with_config(tmp.path(), SiteConfig::default());

    let err = folio.generate().unwrap_err();
    let schema = err
        .chain()
        .find_map(|e| e.downcast_ref::<ContentError>())
        .expect("schema error in chain");
    assert!(matches!(
        schema,
        ContentError::SchemaValidation { field, .. } if field == "slug"
    ));
    assert!(!tmp.path().join("escaped.svg").exists());
    assert!(!tmp.path().parent().unwrap().join("escaped.svg").exists());
}
