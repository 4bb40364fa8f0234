//! Sync engine. Walks the catalog one page at a time, newest first, and
//! downloads every wallpaper on the page that has the requested layout and
//! resolution and is not already on disk. Items within a page are processed
//! concurrently; the next page is only fetched once all of them finished.

pub mod error;
pub mod paths;
pub mod resolution;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::{AccountInfo, CatalogClient, CatalogItem, DownloadRequest};
use crate::types::{LayoutType, SortOrder};

pub use error::SyncError;

/// Subset of application config consumed by the sync engine.
/// Decoupled from CLI parsing so the engine can be tested independently.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub(crate) directory: PathBuf,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) layout: LayoutType,
    /// Cap on in-flight items per page; `None` runs the whole page at once.
    pub(crate) concurrent_downloads: Option<usize>,
    pub(crate) dry_run: bool,
    pub(crate) no_progress_bar: bool,
}

/// What happened to a single catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// No variant for the configured layout and size.
    NoMatchingResolution,
    /// Target file already on disk.
    AlreadyPresent,
    Downloaded,
    /// Advertised resolution the API could not serve (404).
    Unavailable,
    /// Dry run: would have been downloaded.
    WouldDownload,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub pages: u32,
    pub downloaded: usize,
    pub already_present: usize,
    pub unavailable: usize,
    pub no_match: usize,
    pub would_download: usize,
}

impl SyncSummary {
    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::NoMatchingResolution => self.no_match += 1,
            ItemOutcome::AlreadyPresent => self.already_present += 1,
            ItemOutcome::Downloaded => self.downloaded += 1,
            ItemOutcome::Unavailable => self.unavailable += 1,
            ItemOutcome::WouldDownload => self.would_download += 1,
        }
    }

    pub fn items(&self) -> usize {
        self.downloaded
            + self.already_present
            + self.unavailable
            + self.no_match
            + self.would_download
    }
}

/// Create a progress bar with a consistent template.
///
/// Returns `ProgressBar::hidden()` when the user passed `--no-progress-bar` or
/// stdout is not a TTY (e.g. piped output, cron jobs).
fn create_progress_bar(no_progress_bar: bool, total: u64) -> ProgressBar {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .expect("valid template")
        .progress_chars("=> "),
    );
    pb
}

/// Entry point for the sync engine.
///
/// Fetches the account once, then pages through the catalog in descending
/// order until the page count reported by the latest response is exhausted.
/// Fatal item errors surface only after every item of their page has
/// finished; no further page is fetched after one.
pub async fn sync_wallpapers(
    client: &dyn CatalogClient,
    config: &SyncConfig,
) -> Result<SyncSummary, SyncError> {
    let account = client
        .fetch_account_info()
        .await
        .map_err(SyncError::AccountInfo)?;
    tracing::info!(
        plus = account.is_plus_member,
        "Fetched account information{}",
        account
            .display_name
            .as_deref()
            .map(|n| format!(" for {}", n))
            .unwrap_or_default()
    );

    let mut summary = SyncSummary::default();
    let mut current_page: u32 = 1;

    loop {
        let page = client
            .fetch_page(current_page, SortOrder::Descending)
            .await
            .map_err(|source| SyncError::Page {
                page: current_page,
                source,
            })?;
        let total_pages = page.total_pages;
        tracing::info!(
            page = page.page_number,
            total_pages,
            items = page.items.len(),
            "Processing page"
        );

        let outcomes = process_page(client, &page.items, config, &account).await?;
        let mut page_summary = SyncSummary::default();
        for outcome in outcomes {
            page_summary.record(outcome);
            summary.record(outcome);
        }
        summary.pages += 1;
        tracing::debug!(
            page = current_page,
            downloaded = page_summary.downloaded,
            already_present = page_summary.already_present,
            unavailable = page_summary.unavailable,
            no_match = page_summary.no_match,
            "Page complete"
        );

        current_page += 1;
        if current_page > total_pages {
            break;
        }
    }

    Ok(summary)
}

/// Run one orchestrator task per item and wait for all of them.
///
/// Results are collected before any error is inspected, so a fatal failure
/// never interrupts its siblings. The first fatal error in item order wins.
async fn process_page(
    client: &dyn CatalogClient,
    items: &[CatalogItem],
    config: &SyncConfig,
    account: &AccountInfo,
) -> Result<Vec<ItemOutcome>, SyncError> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let concurrency = config.concurrent_downloads.unwrap_or(items.len()).max(1);
    let pb = create_progress_bar(config.no_progress_bar, items.len() as u64);
    let pb_ref = &pb;

    let results: Vec<Result<ItemOutcome, SyncError>> = stream::iter(items)
        .map(|item| async move {
            let result = fetch_wallpaper(client, item, config, account, pb_ref).await;
            pb_ref.inc(1);
            result
        })
        .buffered(concurrency)
        .collect()
        .await;

    pb.finish_and_clear();
    results.into_iter().collect()
}

/// Make sure the wallpaper for `item` is on disk, downloading it if needed.
///
/// Only a 404 from the download is tolerated; every other failure is
/// returned as [`SyncError::Item`].
pub async fn fetch_wallpaper(
    client: &dyn CatalogClient,
    item: &CatalogItem,
    config: &SyncConfig,
    account: &AccountInfo,
    pb: &ProgressBar,
) -> Result<ItemOutcome, SyncError> {
    let Some(variant) =
        resolution::select_resolution(item, config.layout, config.width, config.height)
    else {
        tracing::debug!(
            id = item.id,
            "No {} {}x{} variant for {}",
            config.layout,
            config.width,
            config.height,
            item.name
        );
        return Ok(ItemOutcome::NoMatchingResolution);
    };

    let Some(filename) = paths::filename_from_image_url(&variant.image) else {
        pb.suspend(|| {
            tracing::warn!(
                id = item.id,
                "Wallpaper {} has no filename in image URL '{}', skipping",
                item.name,
                variant.image
            );
        });
        return Ok(ItemOutcome::NoMatchingResolution);
    };

    let download_path = paths::local_download_path(&config.directory, &filename);
    let exists = tokio::fs::try_exists(&download_path)
        .await
        .map_err(|source| SyncError::Disk {
            path: download_path.display().to_string(),
            source,
        })?;
    if exists {
        tracing::debug!("{} already exists", download_path.display());
        return Ok(ItemOutcome::AlreadyPresent);
    }

    if config.dry_run {
        pb.suspend(|| tracing::info!("[DRY RUN] Would download {}", download_path.display()));
        return Ok(ItemOutcome::WouldDownload);
    }

    let request = DownloadRequest {
        layout: config.layout,
        width: config.width,
        height: config.height,
        item_id: item.id,
        show_watermark: !account.is_plus_member,
    };
    pb.set_message(filename);
    tracing::debug!(
        id = item.id,
        variant = variant.label.as_deref().unwrap_or_default(),
        path = %download_path.display(),
        "Need to download {}",
        item.name
    );

    match client.download_item(&download_path, &request).await {
        Ok(()) => {
            pb.suspend(|| tracing::info!("Downloaded {}", download_path.display()));
            Ok(ItemOutcome::Downloaded)
        }
        Err(e) if e.is_not_found() => {
            pb.suspend(|| {
                tracing::info!(
                    id = item.id,
                    "Unable to download wallpaper {}. The API listed this resolution but does not have it: {}",
                    item.name,
                    e
                );
            });
            Ok(ItemOutcome::Unavailable)
        }
        Err(source) => Err(SyncError::Item {
            id: item.id,
            name: item.name.clone(),
            source,
        }),
    }
}

/// Log the end-of-run summary.
pub fn log_summary(summary: &SyncSummary, config: &SyncConfig, elapsed: Duration) {
    if config.dry_run {
        tracing::info!("── Dry Run Summary ──");
        tracing::info!("  {} files would be downloaded", summary.would_download);
    } else {
        tracing::info!("── Summary ──");
        tracing::info!(
            "  {} downloaded, {} already present, {} unavailable",
            summary.downloaded,
            summary.already_present,
            summary.unavailable
        );
    }
    tracing::info!(
        "  {} wallpapers on {} pages, {} without a {} {}x{} variant",
        summary.items(),
        summary.pages,
        summary.no_match,
        config.layout,
        config.width,
        config.height
    );
    tracing::info!("  destination: {}", config.directory.display());
    tracing::info!("  elapsed: {}", format_duration(elapsed));
}

/// Convenience wrapper timing a full run and logging its summary.
pub async fn run(
    client: &dyn CatalogClient,
    config: &SyncConfig,
) -> Result<SyncSummary, SyncError> {
    let started = Instant::now();
    let summary = sync_wallpapers(client, config).await?;
    log_summary(&summary, config, started.elapsed());
    Ok(summary)
}

fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {:02}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
