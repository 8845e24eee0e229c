//! Visited-set tracking for a single harvest run
//!
//! Dedup state is held purely in process memory: a crash mid-harvest loses
//! it and a restart may re-fetch already-seen pages, but the sink's
//! natural-key idempotency keeps re-runs safe. Persisted crawl checkpoints
//! are an optional enhancement, not assumed.

use std::collections::HashSet;
use std::sync::Mutex;

/// Append-only set of locators consumed during the current run
///
/// `mark_and_check` is a single atomic check-and-insert, so the driver can
/// later be parallelized without opening a race between the membership check
/// and the insert.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the locator; true if it was newly inserted
    pub fn mark_and_check(&self, locator: &str) -> bool {
        self.inner.lock().unwrap().insert(locator.to_string())
    }

    /// Membership test without inserting
    pub fn contains(&self, locator: &str) -> bool {
        self.inner.lock().unwrap().contains(locator)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_check_first_insert() {
        let visited = VisitedSet::new();
        assert!(visited.mark_and_check("https://example.com/objects/1"));
    }

    #[test]
    fn test_mark_and_check_duplicate() {
        let visited = VisitedSet::new();
        assert!(visited.mark_and_check("https://example.com/objects/1"));
        assert!(!visited.mark_and_check("https://example.com/objects/1"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_contains_does_not_insert() {
        let visited = VisitedSet::new();
        assert!(!visited.contains("https://example.com/page2"));
        assert!(visited.is_empty());
        assert!(visited.mark_and_check("https://example.com/page2"));
        assert!(visited.contains("https://example.com/page2"));
    }
}
