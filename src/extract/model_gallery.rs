//! Extractor for The Model, Sligo (Niland Collection)
//!
//! The collection is a WordPress site: list pages render artworks as
//! `li.artwork` entries (title in an `abbr` title attribute, artist as a
//! `rel="tag"` link), detail pages are posts whose `div.post-content`
//! paragraphs describe the work, and pagination is a `ul.pagination` where
//! the link after the `li.active` entry leads to the next page.

use crate::extract::{or_not_available, text_of, DetailRecord, Extractor, ItemReference, NOT_AVAILABLE};
use crate::url::resolve_reference;
use scraper::{Html, Selector};
use url::Url;

pub struct ModelGalleryExtractor;

impl Extractor for ModelGalleryExtractor {
    fn source_name(&self) -> &'static str {
        "model-gallery"
    }

    fn list_items(&self, document: &Html, base: &Url) -> Vec<ItemReference> {
        let mut items = Vec::new();

        let item_selector = match Selector::parse("li.artwork") {
            Ok(s) => s,
            Err(_) => return items,
        };
        let abbr_selector = Selector::parse("abbr[title]").ok();
        let link_selector = Selector::parse("a[href]").ok();

        for artwork in document.select(&item_selector) {
            // Items without a link cannot be visited; skip them rather than
            // emit an unvisitable reference.
            let href = link_selector
                .as_ref()
                .and_then(|s| artwork.select(s).next())
                .and_then(|a| a.value().attr("href"));

            let locator = match href.and_then(|h| resolve_reference(base, h)) {
                Some(l) => l,
                None => continue,
            };

            let title = abbr_selector
                .as_ref()
                .and_then(|s| artwork.select(s).next())
                .and_then(|abbr| abbr.value().attr("title"))
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            items.push(ItemReference { title, locator });
        }

        items
    }

    fn detail_fields(&self, document: &Html) -> DetailRecord {
        let mut record = DetailRecord::empty();

        record.artist = or_not_available(text_of(document, "a[rel=\"tag\"]"));
        record.description = or_not_available(collect_post_content(document));

        record
    }

    fn next_page(&self, document: &Html, base: &Url) -> Option<Url> {
        // The entry following the active page marker is the next page; on the
        // last page there is no following sibling and the crawl ends.
        let selector = Selector::parse("ul.pagination li.active + li a[href]").ok()?;

        document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("href"))
            .and_then(|href| resolve_reference(base, href))
    }
}

/// Joins the non-empty paragraphs of the post body
fn collect_post_content(document: &Html) -> Option<String> {
    let selector = Selector::parse("div.post-content p").ok()?;

    let paragraphs: Vec<String> = document
        .select(&selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.themodel.ie/art-and-artists/the-niland-collection/").unwrap()
    }

    const LIST_PAGE: &str = r#"
        <html><body>
        <ul>
            <li class="artwork">
                <a href="https://www.themodel.ie/artwork/the-sick-call"><abbr title="The Sick Call">The Sick…</abbr></a>
                <a rel="tag" href="/artists/jack-b-yeats">Jack B. Yeats</a>
            </li>
            <li class="artwork">
                <a href="https://www.themodel.ie/artwork/island-funeral"><abbr title="Island Funeral">Island…</abbr></a>
                <a rel="tag" href="/artists/jack-b-yeats">Jack B. Yeats</a>
            </li>
            <li class="artwork">
                <span>No link for this one</span>
            </li>
        </ul>
        <ul class="pagination">
            <li><a href="?sf_paged=1">1</a></li>
            <li class="active"><a href="?sf_paged=2">2</a></li>
            <li><a href="?sf_paged=3">3</a></li>
        </ul>
        </body></html>
    "#;

    const DETAIL_PAGE: &str = r#"
        <html><body>
        <a rel="tag" href="/artists/jack-b-yeats">Jack B. Yeats</a>
        <div class="post-content">
            <p>Oil on canvas, 1920.</p>
            <p></p>
            <p>Purchased by the Sligo corporation.</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_list_items_skips_linkless_entries() {
        let document = Html::parse_document(LIST_PAGE);
        let items = ModelGalleryExtractor.list_items(&document, &base());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "The Sick Call");
        assert_eq!(
            items[0].locator.as_str(),
            "https://www.themodel.ie/artwork/the-sick-call"
        );
        assert_eq!(items[1].title, "Island Funeral");
    }

    #[test]
    fn test_detail_fields() {
        let document = Html::parse_document(DETAIL_PAGE);
        let record = ModelGalleryExtractor.detail_fields(&document);

        assert_eq!(record.artist, "Jack B. Yeats");
        assert_eq!(
            record.description,
            "Oil on canvas, 1920.\nPurchased by the Sligo corporation."
        );
        assert_eq!(record.medium, NOT_AVAILABLE);
    }

    #[test]
    fn test_detail_fields_no_post_content() {
        let document = Html::parse_document("<html><body><p>bare page</p></body></html>");
        let record = ModelGalleryExtractor.detail_fields(&document);
        assert_eq!(record.description, NOT_AVAILABLE);
        assert_eq!(record.artist, NOT_AVAILABLE);
    }

    #[test]
    fn test_next_page_follows_active_sibling() {
        let document = Html::parse_document(LIST_PAGE);
        let next = ModelGalleryExtractor.next_page(&document, &base()).unwrap();
        // resolve_reference collapses the trailing slash into comparable form
        assert_eq!(
            next.as_str(),
            "https://www.themodel.ie/art-and-artists/the-niland-collection?sf_paged=3"
        );
    }

    #[test]
    fn test_next_page_on_last_page() {
        let html = r#"
            <ul class="pagination">
                <li><a href="?sf_paged=1">1</a></li>
                <li class="active"><a href="?sf_paged=2">2</a></li>
            </ul>
        "#;
        let document = Html::parse_document(html);
        assert!(ModelGalleryExtractor.next_page(&document, &base()).is_none());
    }
}
