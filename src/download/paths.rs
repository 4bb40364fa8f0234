use std::path::{Path, PathBuf};

use anyhow::Context;
use reqwest::Url;

/// Local filename for an image URL: its final non-empty path segment.
///
/// Query strings and fragments are ignored. Relative or otherwise
/// unparseable URLs fall back to splitting on `/`. Returns `None` when no
/// usable segment remains after cleaning.
pub fn filename_from_image_url(image_url: &str) -> Option<String> {
    let segment = match Url::parse(image_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string),
        Err(_) => image_url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').find(|s| !s.is_empty()))
            .map(str::to_string),
    }?;

    let clean = clean_filename(&segment);
    if clean.is_empty() || clean == "." || clean == ".." {
        None
    } else {
        Some(clean)
    }
}

/// Clean a filename by removing characters that are invalid on common
/// filesystems: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`.
pub fn clean_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect()
}

/// Destination path of a wallpaper inside the output directory.
pub fn local_download_path(directory: &Path, filename: &str) -> PathBuf {
    directory.join(filename)
}

/// Create the output directory (and parents) if missing.
///
/// Fails when the path exists but is not a directory.
pub fn ensure_directory(path: &Path) -> anyhow::Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => anyhow::bail!("{} is not a valid directory", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display())),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to inspect directory {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_absolute_url() {
        assert_eq!(
            filename_from_image_url("https://cdn.example.com/content/wallpapers/foo.jpg").as_deref(),
            Some("foo.jpg")
        );
    }

    #[test]
    fn test_filename_ignores_query_and_fragment() {
        assert_eq!(
            filename_from_image_url("https://cdn.example.com/w/bar.png?sig=abc#top").as_deref(),
            Some("bar.png")
        );
    }

    #[test]
    fn test_filename_ignores_trailing_slash() {
        assert_eq!(
            filename_from_image_url("https://cdn.example.com/w/baz.jpg/").as_deref(),
            Some("baz.jpg")
        );
    }

    #[test]
    fn test_filename_from_relative_path() {
        assert_eq!(
            filename_from_image_url("/wallpapers/dual/qux.jpg?x=1").as_deref(),
            Some("qux.jpg")
        );
        assert_eq!(filename_from_image_url("plain.jpg").as_deref(), Some("plain.jpg"));
    }

    #[test]
    fn test_filename_none_when_no_segment() {
        assert_eq!(filename_from_image_url("https://cdn.example.com/"), None);
        assert_eq!(filename_from_image_url(""), None);
        assert_eq!(filename_from_image_url("https://cdn.example.com/w/.."), None);
    }

    #[test]
    fn test_clean_filename_removes_invalid_chars() {
        assert_eq!(clean_filename("a:b*c?d\"e<f>g|h.jpg"), "abcdefgh.jpg");
        assert_eq!(clean_filename("normal.jpg"), "normal.jpg");
    }

    #[test]
    fn test_local_download_path() {
        assert_eq!(
            local_download_path(Path::new("/tmp/out"), "foo.jpg"),
            PathBuf::from("/tmp/out/foo.jpg")
        );
    }

    #[test]
    fn test_ensure_directory_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_directory_accepts_existing() {
        let dir = tempfile::tempdir().unwrap();
        ensure_directory(dir.path()).unwrap();
    }

    #[test]
    fn test_ensure_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let err = ensure_directory(&file).unwrap_err();
        assert!(err.to_string().contains("is not a valid directory"));
    }
}
