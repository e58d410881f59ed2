use anyhow::{Context, Result};
use scraper::Html;
use tracing::info;

use crate::emit::Emitter;
use crate::parser::node::{HtmlDocument, Markup};
use crate::parser::{self, Catalog};
use crate::render::Renderer;

/// Render → extract → emit. Only a renderer or emitter failure is fatal;
/// a page with no usable sections emits an empty catalog.
pub async fn run_pipeline<R: Renderer, E: Emitter>(
    renderer: &R,
    emitter: &mut E,
    markup: &Markup,
) -> Result<Catalog> {
    let page = renderer
        .render()
        .await
        .context("Renderer produced no document")?;

    let catalog = {
        let html = Html::parse_document(&page.html);
        parser::process_document(&HtmlDocument::new(&html, markup))
    };
    info!(
        source = %page.source,
        sections = catalog.sections,
        valid = catalog.valid,
        unique = catalog.endpoints.len(),
        "Extracted endpoint catalog"
    );

    emitter
        .emit(&catalog.endpoints)
        .context("Failed to emit catalog")?;
    Ok(catalog)
}

// ── Tests ──
