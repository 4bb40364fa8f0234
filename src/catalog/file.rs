use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::error::CatalogError;

/// Hidden `.part` file next to the destination. The item id keeps two
/// wallpapers that share a filename from writing into the same temp file.
fn temp_download_path(download_path: &Path, item_id: u64) -> PathBuf {
    let download_dir = download_path
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let filename = download_path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    download_dir.join(format!(".{}.{}.part", filename, item_id))
}

/// Stream `url` to `download_path` through a `.part` temp file.
///
/// The destination only appears once the body has been fully written, so an
/// interrupted transfer is never mistaken for an existing wallpaper on the
/// next run. Returns the number of bytes written.
pub(crate) async fn download_file(
    client: &Client,
    url: &str,
    download_path: &Path,
    item_id: u64,
) -> Result<u64, CatalogError> {
    let part_path = temp_download_path(download_path, item_id);

    let result = attempt_download(client, url, download_path, &part_path).await;
    if result.is_err() {
        let _ = fs::remove_file(&part_path).await;
    }
    result
}

async fn attempt_download(
    client: &Client,
    url: &str,
    download_path: &Path,
    part_path: &Path,
) -> Result<u64, CatalogError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| CatalogError::Http {
            source,
            url: url.to_string(),
        })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound {
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        return Err(CatalogError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
            message: format!("downloading {}", download_path.display()),
        });
    }

    let content_length = response.content_length();

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(part_path)
        .await
        .map_err(disk_error(part_path))?;

    let mut bytes_written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| {
            tracing::warn!(
                "Body decode error for {} (content_length={:?}, bytes_so_far={}): {}",
                download_path.display(),
                content_length,
                bytes_written,
                source
            );
            CatalogError::Http {
                source,
                url: url.to_string(),
            }
        })?;
        file.write_all(&chunk)
            .await
            .map_err(disk_error(part_path))?;
        bytes_written += chunk.len() as u64;
    }
    file.flush().await.map_err(disk_error(part_path))?;
    drop(file);

    fs::rename(part_path, download_path)
        .await
        .map_err(disk_error(download_path))?;

    Ok(bytes_written)
}

fn disk_error(path: &Path) -> impl FnOnce(std::io::Error) -> CatalogError + '_ {
    move |source| CatalogError::Disk {
        path: path.display().to_string(),
        source,
    }
}
