//! Generate build artifacts

use anyhow::{Context, Result};

use crate::generator::{BuildReport, Generator};
use crate::query::Query;
use crate::Folio;

/// Load every collection and write the artifacts
pub fn run(folio: &Folio) -> Result<BuildReport> {
    let start = std::time::Instant::now();

    let source = folio.source();
    let collections = Query::new(&source)
        .load_all()
        .with_context(|| format!("Failed to load content from {:?}", folio.content_dir))?;

    tracing::info!(
        "Loaded {} posts, {} writings and {} projects",
        collections.posts.len(),
        collections.writings.len(),
        collections.projects.len()
    );

    let report = Generator::new(folio).generate(&collections)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(report)
}
