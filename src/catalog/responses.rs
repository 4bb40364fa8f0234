//! Response envelopes of the v2 API.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use super::types::{AccountInfo, CatalogItem, CatalogPage};

#[derive(Debug, Deserialize)]
pub(crate) struct AccountResponse {
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfo {
    #[serde(default)]
    pub plus: bool,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<AccountResponse> for AccountInfo {
    fn from(response: AccountResponse) -> Self {
        Self {
            is_plus_member: response.user.plus,
            display_name: response.user.display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WallpapersResponse {
    #[serde(alias = "dbcore")]
    pub db_core: WallpapersCore,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WallpapersCore {
    pub total_pages: u32,
    #[serde(default, deserialize_with = "keyed_or_listed")]
    pub wallpapers: Vec<CatalogItem>,
}

impl WallpapersResponse {
    pub fn into_page(self, page_number: u32) -> CatalogPage {
        CatalogPage {
            page_number,
            total_pages: self.db_core.total_pages,
            items: self.db_core.wallpapers,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadResponse {
    pub download: DownloadLink,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadLink {
    pub url: String,
}

/// Wallpapers arrive as an object keyed by id, in listing order. An empty
/// page is serialized as `[]` instead of `{}`.
fn keyed_or_listed<'de, D>(deserializer: D) -> Result<Vec<CatalogItem>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Keyed(IndexMap<String, CatalogItem>),
        Listed(Vec<CatalogItem>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Keyed(map) => map.into_values().collect(),
        Raw::Listed(list) => list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_plus_member() {
        let r: AccountResponse = serde_json::from_value(json!({
            "db_core": {"timestamp": 1},
            "user": {"id": 1, "display_name": "someone", "plus": true, "active": true}
        }))
        .unwrap();
        let info = AccountInfo::from(r);
        assert!(info.is_plus_member);
        assert_eq!(info.display_name.as_deref(), Some("someone"));
    }

    #[test]
    fn test_account_missing_plus_defaults_false() {
        let r: AccountResponse = serde_json::from_value(json!({"user": {}})).unwrap();
        assert!(!AccountInfo::from(r).is_plus_member);
    }

    #[test]
    fn test_wallpapers_keep_listing_order() {
        // Raw text: `json!` would hand the keys over already sorted.
        let body = r#"{
            "db_core": {
                "total_pages": 3,
                "wallpapers": {
                    "900": {"id": 900, "name": "newest"},
                    "12": {"id": 12, "name": "middle"},
                    "450": {"id": 450, "name": "oldest"}
                }
            }
        }"#;
        let r: WallpapersResponse = serde_json::from_slice(body.as_bytes()).unwrap();
        let page = r.into_page(2);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_pages, 3);
        let ids: Vec<u64> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![900, 12, 450]);
    }

    #[test]
    fn test_wallpapers_empty_array() {
        let r: WallpapersResponse =
            serde_json::from_value(json!({"db_core": {"total_pages": 1, "wallpapers": []}}))
                .unwrap();
        assert!(r.into_page(1).items.is_empty());
    }

    #[test]
    fn test_wallpapers_missing_field() {
        let r: WallpapersResponse =
            serde_json::from_value(json!({"dbcore": {"total_pages": 0}})).unwrap();
        let page = r.into_page(1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_download_link() {
        let r: DownloadResponse = serde_json::from_value(json!({
            "download": {"expiration": 1700000000, "url": "https://dl.example.com/a.jpg?sig=1"}
        }))
        .unwrap();
        assert_eq!(r.download.url, "https://dl.example.com/a.jpg?sig=1");
    }
}
