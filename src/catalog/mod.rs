//! Catalog service: account lookup, paged wallpaper listing, and single
//! wallpaper download against the Digital Blasphemy v2 API.
//!
//! The download pipeline only sees the [`CatalogClient`] trait so it can be
//! driven by a scripted implementation in tests.

pub mod client;
pub mod error;
mod file;
mod responses;
pub mod types;

pub use client::{ClientConfig, HttpCatalogClient};
pub use error::CatalogError;
pub use types::{AccountInfo, CatalogItem, CatalogPage, DownloadRequest, ResolutionVariant};

use std::path::Path;

use crate::types::SortOrder;

/// Remote wallpaper catalog.
///
/// Implementations must be usable from many concurrent downloads at once.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_account_info(&self) -> Result<AccountInfo, CatalogError>;

    async fn fetch_page(&self, page: u32, order: SortOrder) -> Result<CatalogPage, CatalogError>;

    /// Download the wallpaper described by `request` to `destination`.
    ///
    /// Returns [`CatalogError::NotFound`] when the catalog advertised the
    /// resolution but has no asset for it.
    async fn download_item(
        &self,
        destination: &Path,
        request: &DownloadRequest,
    ) -> Result<(), CatalogError>;
}
