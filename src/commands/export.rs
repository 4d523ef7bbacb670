use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::services::config_service::{self, validate_interval};
use crate::services::widget_service::{generate_widget, render_preview_page, WidgetOptions};
use super::AppContext;

pub fn widget_options(ctx: &AppContext, interval_ms: Option<u64>, pause_on_hover: bool) -> anyhow::Result<WidgetOptions> {
    if let Some(ms) = interval_ms {
        validate_interval(ms)?;
    }
    Ok(ctx.config()?.widget_options(interval_ms, pause_on_hover))
}

pub fn export_widget(
    ctx: &AppContext,
    output: Option<&Path>,
    interval_ms: Option<u64>,
    pause_on_hover: bool,
) -> anyhow::Result<()> {
    let slides = ctx.store().active()?;
    let options = widget_options(ctx, interval_ms, pause_on_hover)?;
    let code = generate_widget(&slides, &options)?;

    match output {
        Some(path) => {
            fs::write(path, &code)
                .with_context(|| format!("Failed to write widget to {}", path.display()))?;
            tracing::info!(path = %path.display(), slides = slides.len(), "Widget exported");
            eprintln!("Wrote widget with {} active slide(s) to {}", slides.len(), path.display());
        }
        None => println!("{code}"),
    }
    Ok(())
}

/// Writes `preview.html` into the exports directory and returns its path.
pub fn export_preview_page(ctx: &AppContext, interval_ms: Option<u64>) -> anyhow::Result<PathBuf> {
    let slides = ctx.store().active()?;
    let config = ctx.config()?;
    let options = widget_options(ctx, interval_ms, false)?;
    let page = render_preview_page(&slides, &options)?;

    let exports_dir = get_exports_dir(ctx, &config)?;
    let path = exports_dir.join("preview.html");
    fs::write(&path, page).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), slides = slides.len(), "Preview page written");
    Ok(path)
}

pub fn get_exports_dir(ctx: &AppContext, config: &config_service::Config) -> anyhow::Result<PathBuf> {
    config_service::get_exports_dir(ctx.data_dir(), config).context("Failed to create exports directory")
}
