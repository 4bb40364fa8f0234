use crate::catalog::{CatalogItem, ResolutionVariant};
use crate::types::LayoutType;

/// Pick the variant of `item` published for `layout` at exactly
/// `width x height`.
///
/// Dimensions are compared in their decimal string form, as the API encodes
/// them. The first match in list order wins.
pub fn select_resolution(
    item: &CatalogItem,
    layout: LayoutType,
    width: u32,
    height: u32,
) -> Option<&ResolutionVariant> {
    let variants = item.resolutions.as_ref()?.for_layout(layout)?;

    let width = width.to_string();
    let height = height.to_string();
    variants
        .iter()
        .find(|v| v.width == width && v.height == height)
}
