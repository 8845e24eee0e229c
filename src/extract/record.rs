//! Fixed-schema catalogue record
//!
//! Every harvested artwork becomes a [`DetailRecord`] with the same set of
//! fields regardless of source site. Fields a page does not carry hold the
//! [`NOT_AVAILABLE`] sentinel instead of being omitted, so downstream
//! consumers (the survey export) can rely on a fixed column set.

/// Sentinel stored for fields the source page does not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// One artwork record, as extracted from a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub title: String,
    pub locator: String,
    pub artist: String,
    pub date: String,
    pub medium: String,
    pub dimensions: String,
    pub catalogue_number: String,
    pub credit_line: String,
    pub classification: String,
    pub location_status: String,
    pub description: String,
}

impl DetailRecord {
    /// Column names, in persistence order
    pub const COLUMNS: [&'static str; 11] = [
        "title",
        "locator",
        "artist",
        "date",
        "medium",
        "dimensions",
        "catalogue_number",
        "credit_line",
        "classification",
        "location_status",
        "description",
    ];

    /// Creates a record with every field set to the sentinel
    pub fn empty() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            locator: NOT_AVAILABLE.to_string(),
            artist: NOT_AVAILABLE.to_string(),
            date: NOT_AVAILABLE.to_string(),
            medium: NOT_AVAILABLE.to_string(),
            dimensions: NOT_AVAILABLE.to_string(),
            catalogue_number: NOT_AVAILABLE.to_string(),
            credit_line: NOT_AVAILABLE.to_string(),
            classification: NOT_AVAILABLE.to_string(),
            location_status: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
        }
    }

    /// Field values in the same order as [`Self::COLUMNS`]
    pub fn values(&self) -> [&str; 11] {
        [
            &self.title,
            &self.locator,
            &self.artist,
            &self.date,
            &self.medium,
            &self.dimensions,
            &self.catalogue_number,
            &self.credit_line,
            &self.classification,
            &self.location_status,
            &self.description,
        ]
    }

    /// The key the sink deduplicates on
    ///
    /// The locator is the natural key; catalogue numbers stand in when a
    /// source has no stable per-item URL.
    pub fn natural_key(&self) -> &str {
        if self.locator != NOT_AVAILABLE {
            &self.locator
        } else {
            &self.catalogue_number
        }
    }
}

impl Default for DetailRecord {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lifts an optionally extracted value into the fixed schema
///
/// Empty strings count as absent so whitespace-only page elements do not
/// produce empty columns.
pub fn or_not_available(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_all_sentinel() {
        let record = DetailRecord::empty();
        for value in record.values() {
            assert_eq!(value, NOT_AVAILABLE);
        }
    }

    #[test]
    fn test_values_align_with_columns() {
        let mut record = DetailRecord::empty();
        record.title = "The Taking of Christ".to_string();
        record.medium = "Oil on canvas".to_string();

        let values = record.values();
        assert_eq!(values.len(), DetailRecord::COLUMNS.len());
        assert_eq!(values[0], "The Taking of Christ");
        assert_eq!(values[4], "Oil on canvas");
    }

    #[test]
    fn test_natural_key_prefers_locator() {
        let mut record = DetailRecord::empty();
        record.locator = "https://example.com/objects/1".to_string();
        record.catalogue_number = "NGI.123".to_string();
        assert_eq!(record.natural_key(), "https://example.com/objects/1");
    }

    #[test]
    fn test_natural_key_falls_back_to_catalogue_number() {
        let mut record = DetailRecord::empty();
        record.catalogue_number = "NGI.123".to_string();
        assert_eq!(record.natural_key(), "NGI.123");
    }

    #[test]
    fn test_or_not_available() {
        assert_eq!(or_not_available(Some("1602".to_string())), "1602");
        assert_eq!(or_not_available(Some("   ".to_string())), NOT_AVAILABLE);
        assert_eq!(or_not_available(None), NOT_AVAILABLE);
    }
}
