use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::{MoveDirection, SlideStatus};

#[derive(Parser)]
#[command(
    name = "heroreel",
    version,
    about = "Manage homepage hero slides and export them as a self-contained carousel widget"
)]
pub struct Cli {
    /// Directory holding slides.json and config.json
    #[arg(long, global = true, env = "HEROREEL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List slides in display order
    List {
        /// Only slides whose title or description contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only active slides
        #[arg(long)]
        active: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print one slide as JSON
    Show { id: String },
    /// Add a new slide at the end of the list
    Create(CreateArgs),
    /// Change fields of an existing slide
    Update(UpdateArgs),
    /// Delete a slide (asks for confirmation)
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Move a slide one position up or down
    Move {
        id: String,
        #[arg(value_enum)]
        direction: DirectionArg,
    },
    /// Flip a slide between active and inactive
    Toggle { id: String },
    /// Show total / active / inactive counts
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Generate the embeddable widget snippet for the active slides
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Auto-advance period in milliseconds (defaults to config, then 6000)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Pause auto-advance while the pointer is over the widget
        #[arg(long)]
        pause_on_hover: bool,
    },
    /// Preview the active slides as a running carousel
    Preview {
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Write preview.html to the exports directory instead of running in the terminal
        #[arg(long)]
        html: bool,
        /// Open the written preview page in the default browser
        #[arg(long, requires = "html")]
        open: bool,
        /// Stop the terminal preview after this many seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    /// Background image URL (also the poster for direct videos)
    #[arg(long)]
    pub image: String,
    /// Background video: a YouTube link or a direct video file URL
    #[arg(long)]
    pub video: Option<String>,
    #[arg(long)]
    pub play_link: Option<String>,
    #[arg(long)]
    pub info_link: Option<String>,
    /// Create the slide as inactive
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    /// Pass an empty string to remove the video
    #[arg(long)]
    pub video: Option<String>,
    /// Pass an empty string to remove the link
    #[arg(long)]
    pub play_link: Option<String>,
    /// Pass an empty string to remove the link
    #[arg(long)]
    pub info_link: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set the default auto-advance period
    SetInterval { ms: u64 },
    /// Enable or disable hover pause in exported widgets
    SetPauseOnHover {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Set where preview pages are written
    SetExportsDir { dir: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for SlideStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => SlideStatus::Active,
            StatusArg::Inactive => SlideStatus::Inactive,
        }
    }
}
