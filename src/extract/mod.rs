//! Record extraction for Gallery-Harvest
//!
//! Each supported collection site implements the same three-operation
//! [`Extractor`] contract against its own page structure; the crawl driver is
//! written once against the trait and stays site-agnostic.

mod model_gallery;
mod national_gallery;
mod record;

pub use model_gallery::ModelGalleryExtractor;
pub use national_gallery::NationalGalleryExtractor;
pub use record::{or_not_available, DetailRecord, NOT_AVAILABLE};

use crate::HarvestError;
use scraper::{Html, Selector};
use url::Url;

/// A (title, locator) pair discovered on a list page
///
/// The locator is already resolved to its absolute comparable form; it is the
/// identity used by the visited set and, later, the sink's natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReference {
    pub title: String,
    pub locator: Url,
}

/// Site-specific extraction capability
///
/// All three operations are pure with respect to the supplied document.
/// `list_items` returning an empty sequence and `next_page` returning `None`
/// are both valid, meaningful outcomes (end of collection / last page), not
/// errors.
pub trait Extractor {
    /// Name of the source this extractor understands (matches config)
    fn source_name(&self) -> &'static str;

    /// Item references on a list page, in page order
    fn list_items(&self, document: &Html, base: &Url) -> Vec<ItemReference>;

    /// Builds a record from a detail page
    ///
    /// Never fails: fields absent from the page carry the `"N/A"` sentinel.
    fn detail_fields(&self, document: &Html) -> DetailRecord;

    /// Locator of the following list page, if the pagination offers one
    fn next_page(&self, document: &Html, base: &Url) -> Option<Url>;
}

/// Looks up the extractor for a configured source name
pub fn for_source(name: &str) -> Result<Box<dyn Extractor>, HarvestError> {
    match name {
        "national-gallery" => Ok(Box::new(NationalGalleryExtractor)),
        "model-gallery" => Ok(Box::new(ModelGalleryExtractor)),
        other => Err(HarvestError::UnknownSource(other.to_string())),
    }
}

/// Source names with a registered extractor
pub fn known_sources() -> &'static [&'static str] {
    &["national-gallery", "model-gallery"]
}

/// Text content of the first element matching `css`, trimmed
///
/// Returns None when the selector matches nothing or only whitespace.
pub(crate) fn text_of(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
