use std::path::PathBuf;

use crate::services::config_service;
use super::AppContext;

pub fn show_config(ctx: &AppContext) -> anyhow::Result<()> {
    let config = ctx.config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!("effective interval: {} ms", config.autoplay_interval().as_millis());
    println!("data dir: {}", ctx.data_dir().display());
    Ok(())
}

pub fn set_interval(ctx: &AppContext, ms: u64) -> anyhow::Result<()> {
    config_service::set_autoplay_interval(ctx.data_dir(), ms)?;
    println!("Auto-advance interval set to {ms} ms");
    Ok(())
}

pub fn set_pause_on_hover(ctx: &AppContext, enabled: bool) -> anyhow::Result<()> {
    config_service::set_pause_on_hover(ctx.data_dir(), enabled)?;
    println!("Pause on hover {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub fn set_exports_dir(ctx: &AppContext, dir: PathBuf) -> anyhow::Result<()> {
    let config = config_service::set_exports_dir(ctx.data_dir(), dir)?;
    if let Some(dir) = config.exports_dir {
        println!("Exports directory set to {}", dir.display());
    }
    Ok(())
}
