use clap::Parser;
use crate::types::*;

#[derive(Parser, Debug)]
#[command(
    name = "digital-blasphemy-sync",
    about = "Download Digital Blasphemy wallpapers matching a resolution",
    disable_help_flag = true
)]
pub struct Cli {
    /// Required width of wallpapers
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Required height of wallpapers
    #[arg(short = 'h', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Required type of wallpapers
    #[arg(short = 't', long = "type", value_enum, ignore_case = true)]
    pub layout: LayoutType,

    /// Path to put wallpapers
    #[arg(short = 'p', long = "path")]
    pub path: String,

    /// Digital Blasphemy API key.
    /// Prefer the API_KEY environment variable; --api-key is visible in process listings.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the Digital Blasphemy API
    #[arg(long, default_value = "https://api.digitalblasphemy.com")]
    pub api_base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum concurrent downloads within a page (default: the whole page)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads_num: Option<u64>,

    /// Report what would be downloaded without downloading
    #[arg(long)]
    pub dry_run: bool,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}
