use crate::catalog::ClientConfig;
use crate::download::SyncConfig;
use crate::types::LayoutType;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
///
/// Built once from the parsed command line and never mutated afterwards.
/// The pipeline and the HTTP client each read their own projection of it
/// ([`SyncConfig`] and [`ClientConfig`]).
pub struct Config {
    pub directory: PathBuf,
    pub api_key: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub threads_num: Option<usize>,
    pub width: u32,
    pub height: u32,
    pub layout: LayoutType,
    pub dry_run: bool,
    pub no_progress_bar: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("layout", &self.layout)
            .field("directory", &self.directory)
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_cli(cli: crate::cli::Cli) -> anyhow::Result<Self> {
        let api_key = cli.api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!("API_KEY is not set");
        }
        if cli.path.trim().is_empty() {
            anyhow::bail!("--path must not be empty");
        }
        let threads_num = cli
            .threads_num
            .map(usize::try_from)
            .transpose()
            .map_err(|_| anyhow::anyhow!("--threads-num is too large"))?;

        Ok(Self {
            directory: expand_tilde(&cli.path),
            api_key,
            api_base_url: cli.api_base_url,
            timeout_secs: cli.timeout_secs,
            threads_num,
            width: cli.width,
            height: cli.height,
            layout: cli.layout,
            dry_run: cli.dry_run,
            no_progress_bar: cli.no_progress_bar,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            directory: self.directory.clone(),
            width: self.width,
            height: self.height,
            layout: self.layout,
            concurrent_downloads: self.threads_num,
            dry_run: self.dry_run,
            no_progress_bar: self.no_progress_bar,
        }
    }
}
