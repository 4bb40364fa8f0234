use serde::{Deserialize, Deserializer};

use crate::types::LayoutType;

/// Account details relevant to downloading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub is_plus_member: bool,
    pub display_name: Option<String>,
}

/// One page of the wallpaper listing.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub page_number: u32,
    /// Authoritative page count as reported by this response.
    pub total_pages: u32,
    /// Wallpapers in the order the API listed them.
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub resolutions: Option<Resolutions>,
}

/// Resolution variants grouped by layout. Any layout may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resolutions {
    #[serde(default)]
    pub single: Option<Vec<ResolutionVariant>>,
    #[serde(default)]
    pub dual: Option<Vec<ResolutionVariant>>,
    #[serde(default)]
    pub triple: Option<Vec<ResolutionVariant>>,
    #[serde(default)]
    pub mobile: Option<Vec<ResolutionVariant>>,
}

impl Resolutions {
    pub fn for_layout(&self, layout: LayoutType) -> Option<&[ResolutionVariant]> {
        let list = match layout {
            LayoutType::Single => &self.single,
            LayoutType::Dual => &self.dual,
            LayoutType::Triple => &self.triple,
            LayoutType::Mobile => &self.mobile,
        };
        list.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolutionVariant {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub width: String,
    #[serde(deserialize_with = "string_or_number")]
    pub height: String,
    /// Image URL; its final path segment is the local filename.
    pub image: String,
}

/// Parameters of a single wallpaper download. Built per item, used once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub layout: LayoutType,
    pub width: u32,
    pub height: u32,
    pub item_id: u64,
    /// `true` unless the account is a plus member.
    pub show_watermark: bool,
}

/// The API encodes dimensions as strings; accept bare numbers too and
/// normalize them to their decimal form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
