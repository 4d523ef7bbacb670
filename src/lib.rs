mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod services;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command, ConfigAction};
use commands::*;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heroreel_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = AppContext::new(cli.data_dir.as_deref())?;

    match cli.command {
        Command::List { search, active, json } => list_slides(&ctx, search.as_deref(), active, json),
        Command::Show { id } => show_slide(&ctx, &id),
        Command::Create(args) => create_slide(&ctx, args),
        Command::Update(args) => update_slide(&ctx, args),
        Command::Delete { id, yes } => delete_slide(&ctx, &id, yes),
        Command::Move { id, direction } => move_slide(&ctx, &id, direction.into()),
        Command::Toggle { id } => toggle_slide(&ctx, &id),
        Command::Stats { json } => slide_stats(&ctx, json),
        Command::Export { output, interval_ms, pause_on_hover } => {
            export_widget(&ctx, output.as_deref(), interval_ms, pause_on_hover)
        }
        Command::Preview { interval_ms, html, open, seconds } => {
            preview_slides(&ctx, interval_ms, html, open, seconds).await
        }
        Command::Config { action } => match action {
            ConfigAction::Show => show_config(&ctx),
            ConfigAction::SetInterval { ms } => set_interval(&ctx, ms),
            ConfigAction::SetPauseOnHover { enabled } => set_pause_on_hover(&ctx, enabled),
            ConfigAction::SetExportsDir { dir } => set_exports_dir(&ctx, dir),
        },
    }
}
