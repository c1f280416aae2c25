//! Product extraction from leaf listings
//!
//! One record per product item on the loaded page, in DOM order. Only the
//! first page of a listing is read; pagination links are never followed.

use crate::crawler::dom::{extract_optional, Accessor};
use crate::crawler::SelectorSet;
use crate::output::{CategoryPath, ProductRecord};
use scraper::{ElementRef, Html};

/// Extracts every product item on a leaf listing
///
/// Each field is read independently through [`extract_optional`]; a field
/// the item does not carry is left empty and never drops the record.
///
/// # Arguments
///
/// * `document` - The loaded leaf page
/// * `selectors` - Compiled catalog selectors
/// * `path` - Category path the leaf was reached through
/// * `leaf_url` - URL of the leaf page, stored on every record
pub fn extract_products(
    document: &Html,
    selectors: &SelectorSet,
    path: &CategoryPath,
    leaf_url: &str,
) -> Vec<ProductRecord> {
    document
        .select(&selectors.product_item)
        .map(|item| extract_item(item, selectors, path, leaf_url))
        .collect()
}

fn extract_item(
    item: ElementRef<'_>,
    selectors: &SelectorSet,
    path: &CategoryPath,
    leaf_url: &str,
) -> ProductRecord {
    ProductRecord {
        sku: extract_optional(
            item,
            &selectors.product_wrapper,
            Accessor::Attr(&selectors.sku_attribute),
        ),
        product_name: extract_optional(item, &selectors.product_name, Accessor::Text),
        product_url: extract_optional(item, &selectors.product_url, Accessor::Attr("content")),
        image_url: extract_optional(item, &selectors.product_image, Accessor::Attr("src")),
        price_gross: extract_optional(item, &selectors.price_gross, Accessor::Text),
        price_net: extract_optional(item, &selectors.price_net, Accessor::Text),
        price_numeric: extract_optional(item, &selectors.price_numeric, Accessor::Attr("content")),
        currency: extract_optional(item, &selectors.currency, Accessor::Attr("content")),
        unit: extract_optional(item, &selectors.price_unit, Accessor::Text),
        availability: extract_optional(item, &selectors.availability, Accessor::Text),
        ..ProductRecord::new(path, leaf_url)
    }
}
