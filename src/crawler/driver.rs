//! Harvest driver - the pagination traversal state machine
//!
//! The driver walks a collection one list page at a time: fetch the page,
//! extract item references, visit each detail page, persist the record,
//! then advance along the pagination. Pagination traversal is an unbounded
//! walk whose end signal is ambiguous (an empty page, a repeated link, or a
//! missing pager control), so all three are treated as valid termination.
//!
//! A broken detail page must not halt ingestion of the remaining thousands:
//! failures are isolated at item granularity, recorded as skips, and the run
//! continues. List-page failures end the run.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::visited::VisitedSet;
use crate::extract::{DetailRecord, Extractor, ItemReference, NOT_AVAILABLE};
use crate::storage::RecordSink;
use crate::{extract, HarvestError};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Why a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// A list page yielded no items, or the pagination offered no next page
    EndOfCollection,
    /// The next-page locator pointed at an already-visited list page
    PaginationCycle,
    /// An operator stop request was honored at a phase boundary
    Stopped,
    /// A non-recoverable failure ended the run early
    Failed(String),
}

impl Termination {
    /// True when the collection was walked to a natural end
    pub fn is_done(&self) -> bool {
        matches!(self, Self::EndOfCollection | Self::PaginationCycle)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfCollection => write!(f, "end of collection"),
            Self::PaginationCycle => write!(f, "pagination cycle detected"),
            Self::Stopped => write!(f, "stopped by operator"),
            Self::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Final accounting for one harvest run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    pub pages_visited: u32,
    pub items_persisted: u32,
    pub items_skipped: u32,
    pub termination: Termination,
}

/// Cooperative stop request, honored at phase-transition boundaries
///
/// Cloned into whatever reacts to the operator (a Ctrl-C handler); the driver
/// checks it between phases and never mid-extraction, so the sink and visited
/// state stay consistent when a run is cut short.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Traversal phases of the driver
enum Phase {
    AtListPage(Url),
    VisitingDetail {
        items: VecDeque<ItemReference>,
        next: Option<Url>,
    },
    Advancing {
        next: Option<Url>,
    },
    Done(Termination),
}

/// Per-run mutable state, owned exclusively by the driver
///
/// Visited sets live in process memory only: a crash loses dedup history and
/// a restart may re-fetch already-seen pages, but the sink's natural-key
/// idempotency keeps re-runs from re-inserting.
struct RunState {
    visited_pages: VisitedSet,
    visited_items: VisitedSet,
    pages_visited: u32,
    items_persisted: u32,
    items_skipped: u32,
    consecutive_item_failures: u32,
}

impl RunState {
    fn new() -> Self {
        Self {
            visited_pages: VisitedSet::new(),
            visited_items: VisitedSet::new(),
            pages_visited: 0,
            items_persisted: 0,
            items_skipped: 0,
            consecutive_item_failures: 0,
        }
    }

    fn summary(&self, termination: Termination) -> HarvestSummary {
        HarvestSummary {
            pages_visited: self.pages_visited,
            items_persisted: self.items_persisted,
            items_skipped: self.items_skipped,
            termination,
        }
    }
}

/// The harvest driver
///
/// Written once against the [`Extractor`] and [`RecordSink`] contracts and
/// otherwise site-agnostic. One fetch is in flight at a time; detail records
/// are persisted in the order their references were discovered.
pub struct Harvester {
    fetcher: Fetcher,
    extractor: Box<dyn Extractor>,
    stop: StopHandle,
    max_consecutive_item_failures: u32,
}

impl Harvester {
    pub fn new(
        fetcher: Fetcher,
        extractor: Box<dyn Extractor>,
        max_consecutive_item_failures: u32,
        stop: StopHandle,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            stop,
            max_consecutive_item_failures,
        }
    }

    /// Builds a harvester for the configured source
    pub fn from_config(config: &Config, stop: StopHandle) -> Result<Self, HarvestError> {
        let fetcher = Fetcher::new(&config.user_agent, &config.harvest)?;
        let extractor = extract::for_source(&config.source.name)?;
        Ok(Self::new(
            fetcher,
            extractor,
            config.harvest.max_consecutive_item_failures,
            stop,
        ))
    }

    /// Walks the collection from the given list page until termination
    ///
    /// Always returns a summary; a terminal failure is carried in
    /// [`Termination::Failed`] so the counts accumulated before the failure
    /// survive for the final report.
    pub async fn run(&self, start: &Url, sink: &mut dyn RecordSink) -> HarvestSummary {
        let mut state = RunState::new();

        tracing::info!(source = self.extractor.source_name(), start = %start, "harvest starting");

        let termination = match self.drive(start, sink, &mut state).await {
            Ok(termination) => termination,
            Err(e) => {
                tracing::error!(error = %e, "harvest aborted");
                Termination::Failed(e.to_string())
            }
        };

        tracing::info!(
            pages = state.pages_visited,
            persisted = state.items_persisted,
            skipped = state.items_skipped,
            termination = %termination,
            "harvest finished"
        );

        state.summary(termination)
    }

    async fn drive(
        &self,
        start: &Url,
        sink: &mut dyn RecordSink,
        state: &mut RunState,
    ) -> Result<Termination, HarvestError> {
        let mut phase = Phase::AtListPage(start.clone());

        loop {
            if self.stop.is_requested() {
                return Ok(Termination::Stopped);
            }

            phase = match phase {
                Phase::AtListPage(page) => self.enter_list_page(page, state).await?,

                Phase::VisitingDetail { mut items, next } => match items.pop_front() {
                    Some(item) => {
                        self.visit_detail(&item, sink, state).await?;
                        Phase::VisitingDetail { items, next }
                    }
                    None => Phase::Advancing { next },
                },

                Phase::Advancing { next } => match next {
                    None => Phase::Done(Termination::EndOfCollection),
                    Some(url) if state.visited_pages.contains(url.as_str()) => {
                        tracing::info!(url = %url, "next page already visited, ending run");
                        Phase::Done(Termination::PaginationCycle)
                    }
                    Some(url) => Phase::AtListPage(url),
                },

                Phase::Done(termination) => return Ok(termination),
            };
        }
    }

    /// Fetches a list page and queues its not-yet-visited item references
    ///
    /// List-page fetch failures are page-level and propagate: with no page
    /// there are no references to iterate and nothing to isolate per item.
    async fn enter_list_page(&self, page: Url, state: &mut RunState) -> Result<Phase, HarvestError> {
        state.visited_pages.mark_and_check(page.as_str());

        let document =
            self.fetcher
                .fetch(&page)
                .await
                .map_err(|e| HarvestError::ListPage {
                    url: page.to_string(),
                    message: e.to_string(),
                })?;
        state.pages_visited += 1;

        let discovered = self.extractor.list_items(&document, &page);
        let next = self.extractor.next_page(&document, &page);

        tracing::info!(url = %page, items = discovered.len(), "list page fetched");

        // A successfully fetched page with zero items is the natural
        // end-of-collection signal, not an error.
        if discovered.is_empty() {
            return Ok(Phase::Done(Termination::EndOfCollection));
        }

        let items: VecDeque<ItemReference> = discovered
            .into_iter()
            .filter(|item| {
                let fresh = state.visited_items.mark_and_check(item.locator.as_str());
                if !fresh {
                    tracing::debug!(locator = %item.locator, "item already visited, skipping");
                }
                fresh
            })
            .collect();

        Ok(Phase::VisitingDetail { items, next })
    }

    /// Visits one detail page and persists its record
    ///
    /// Fetch and extraction failures are confined to the item: the skip is
    /// logged and recorded, and the run moves on. Only the sink failing or
    /// the consecutive-failure bound being hit ends the run here.
    async fn visit_detail(
        &self,
        item: &ItemReference,
        sink: &mut dyn RecordSink,
        state: &mut RunState,
    ) -> Result<(), HarvestError> {
        match self.harvest_item(item).await {
            Ok(record) => {
                if sink.upsert(&record)? {
                    state.items_persisted += 1;
                    tracing::info!(locator = %item.locator, title = %record.title, "item persisted");
                } else {
                    tracing::debug!(locator = %item.locator, "duplicate natural key, ignored");
                }
                state.consecutive_item_failures = 0;
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(locator = %item.locator, error = %reason, "item skipped");
                sink.record_skip(item.locator.as_str(), &reason)?;
                state.items_skipped += 1;
                state.consecutive_item_failures += 1;

                if state.consecutive_item_failures >= self.max_consecutive_item_failures {
                    return Err(HarvestError::ItemFailureLimit {
                        count: state.consecutive_item_failures,
                    });
                }
            }
        }

        Ok(())
    }

    async fn harvest_item(&self, item: &ItemReference) -> Result<DetailRecord, HarvestError> {
        let document = self.fetcher.fetch(&item.locator).await?;

        let mut record = self.extractor.detail_fields(&document);
        record.locator = item.locator.to_string();

        // The list page is the fallback title source for sites whose detail
        // pages do not repeat it.
        if record.title == NOT_AVAILABLE {
            record.title = item.title.clone();
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_handle_starts_clear() {
        let stop = StopHandle::new();
        assert!(!stop.is_requested());
    }

    #[test]
    fn test_stop_handle_shared_across_clones() {
        let stop = StopHandle::new();
        let clone = stop.clone();
        clone.request_stop();
        assert!(stop.is_requested());
    }

    #[test]
    fn test_termination_is_done() {
        assert!(Termination::EndOfCollection.is_done());
        assert!(Termination::PaginationCycle.is_done());
        assert!(!Termination::Stopped.is_done());
        assert!(!Termination::Failed("boom".to_string()).is_done());
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(Termination::EndOfCollection.to_string(), "end of collection");
        assert_eq!(
            Termination::Failed("no page".to_string()).to_string(),
            "failed: no page"
        );
    }
}
