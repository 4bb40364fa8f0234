use thiserror::Error;

use crate::catalog::CatalogError;

/// Fatal pipeline errors, tagged with the stage that failed.
///
/// Tolerated 404s never become a `SyncError`; they are reported as
/// [`super::ItemOutcome::Unavailable`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Unable to get account information")]
    AccountInfo(#[source] CatalogError),

    #[error("Unable to get page {page} of wallpapers")]
    Page {
        page: u32,
        #[source]
        source: CatalogError,
    },

    #[error("Unable to download wallpaper {name} ({id})")]
    Item {
        id: u64,
        name: String,
        #[source]
        source: CatalogError,
    },

    #[error("Unable to check for existing file {path}")]
    Disk {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
