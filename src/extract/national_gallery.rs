//! Extractor for the National Gallery of Ireland online collection
//!
//! The collection runs on eMuseum: list pages present artworks as
//! `div.list-item-inner` tiles linking to detail pages, detail pages carry
//! labelled field blocks (`div.<name>Field` wrapping a
//! `span.detailFieldValue`), and the pager exposes the next list page as
//! `a.emuseum-pager-button.next-page-link`.

use crate::extract::{or_not_available, text_of, DetailRecord, Extractor, ItemReference};
use crate::url::resolve_reference;
use scraper::{Html, Selector};
use url::Url;

/// Detail field blocks and where their values land in the record schema
const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("title", "div.titleField span.detailFieldValue"),
    ("date", "div.displayDateField span.detailFieldValue"),
    ("medium", "div.mediumField span.detailFieldValue"),
    ("dimensions", "div.dimensionsField span.detailFieldValue"),
    ("catalogue_number", "div.invnoField span.detailFieldValue"),
    ("credit_line", "div.creditlineField span.detailFieldValue"),
];

pub struct NationalGalleryExtractor;

impl Extractor for NationalGalleryExtractor {
    fn source_name(&self) -> &'static str {
        "national-gallery"
    }

    fn list_items(&self, document: &Html, base: &Url) -> Vec<ItemReference> {
        let mut items = Vec::new();

        if let Ok(selector) = Selector::parse("div.list-item-inner h3 a[href]") {
            for element in document.select(&selector) {
                let title = element.text().collect::<String>().trim().to_string();
                if title.is_empty() {
                    continue;
                }

                if let Some(href) = element.value().attr("href") {
                    if let Some(locator) = resolve_reference(base, href) {
                        items.push(ItemReference { title, locator });
                    }
                }
            }
        }

        items
    }

    fn detail_fields(&self, document: &Html) -> DetailRecord {
        let mut record = DetailRecord::empty();

        for (field, css) in DETAIL_FIELDS {
            let value = or_not_available(text_of(document, css));
            match *field {
                "title" => record.title = value,
                "date" => record.date = value,
                "medium" => record.medium = value,
                "dimensions" => record.dimensions = value,
                "catalogue_number" => record.catalogue_number = value,
                "credit_line" => record.credit_line = value,
                _ => unreachable!("unmapped detail field"),
            }
        }

        record
    }

    fn next_page(&self, document: &Html, base: &Url) -> Option<Url> {
        let selector = Selector::parse("a.emuseum-pager-button.next-page-link").ok()?;

        document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("href"))
            .and_then(|href| resolve_reference(base, href))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::NOT_AVAILABLE;

    fn base() -> Url {
        Url::parse("http://onlinecollection.nationalgallery.ie/categories/classifications/Paintings")
            .unwrap()
    }

    const LIST_PAGE: &str = r#"
        <html><body>
        <div class="list-item-inner">
            <h3><a href="/objects/123/the-taking-of-christ">The Taking of Christ</a></h3>
        </div>
        <div class="list-item-inner">
            <h3><a href="/objects/456/a-view-of-powerscourt">A View of Powerscourt Waterfall</a></h3>
        </div>
        <a class="emuseum-pager-button next-page-link" href="/categories/classifications/Paintings?page=2">Next</a>
        </body></html>
    "#;

    const DETAIL_PAGE: &str = r#"
        <html><body>
        <div class="titleField"><span class="detailFieldValue">The Taking of Christ</span></div>
        <div class="displayDateField"><span class="detailFieldValue">1602</span></div>
        <div class="mediumField"><span class="detailFieldValue">Oil on canvas</span></div>
        <div class="dimensionsField"><span class="detailFieldValue">133.5 x 169.5 cm</span></div>
        <div class="invnoField"><span class="detailFieldValue">L.14702</span></div>
        <div class="creditlineField"><span class="detailFieldValue">On indefinite loan</span></div>
        </body></html>
    "#;

    #[test]
    fn test_list_items() {
        let document = Html::parse_document(LIST_PAGE);
        let items = NationalGalleryExtractor.list_items(&document, &base());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "The Taking of Christ");
        assert_eq!(
            items[0].locator.as_str(),
            "http://onlinecollection.nationalgallery.ie/objects/123/the-taking-of-christ"
        );
        assert_eq!(items[1].title, "A View of Powerscourt Waterfall");
    }

    #[test]
    fn test_list_items_empty_page() {
        let document = Html::parse_document("<html><body><p>No results.</p></body></html>");
        let items = NationalGalleryExtractor.list_items(&document, &base());
        assert!(items.is_empty());
    }

    #[test]
    fn test_detail_fields_full() {
        let document = Html::parse_document(DETAIL_PAGE);
        let record = NationalGalleryExtractor.detail_fields(&document);

        assert_eq!(record.title, "The Taking of Christ");
        assert_eq!(record.date, "1602");
        assert_eq!(record.medium, "Oil on canvas");
        assert_eq!(record.dimensions, "133.5 x 169.5 cm");
        assert_eq!(record.catalogue_number, "L.14702");
        assert_eq!(record.credit_line, "On indefinite loan");
        // Fields eMuseum does not expose stay at the sentinel
        assert_eq!(record.artist, NOT_AVAILABLE);
        assert_eq!(record.location_status, NOT_AVAILABLE);
    }

    #[test]
    fn test_detail_fields_missing_medium() {
        let html = r#"
            <html><body>
            <div class="displayDateField"><span class="detailFieldValue">1880</span></div>
            <div class="invnoField"><span class="detailFieldValue">NGI.4313</span></div>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let record = NationalGalleryExtractor.detail_fields(&document);

        assert_eq!(record.date, "1880");
        assert_eq!(record.catalogue_number, "NGI.4313");
        assert_eq!(record.medium, NOT_AVAILABLE);
        assert_eq!(record.dimensions, NOT_AVAILABLE);
    }

    #[test]
    fn test_next_page() {
        let document = Html::parse_document(LIST_PAGE);
        let next = NationalGalleryExtractor.next_page(&document, &base()).unwrap();
        assert_eq!(
            next.as_str(),
            "http://onlinecollection.nationalgallery.ie/categories/classifications/Paintings?page=2"
        );
    }

    #[test]
    fn test_next_page_absent() {
        let document = Html::parse_document("<html><body></body></html>");
        assert!(NationalGalleryExtractor.next_page(&document, &base()).is_none());
    }
}
