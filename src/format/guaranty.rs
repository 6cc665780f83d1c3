use super::Format;
use super::simple::WARRANTY_YES;
use crate::record::{FormattedRecord, RawItem};

/// Marks the product as covered when the feed carries a separate guaranty term.
pub struct GuarantyFormatter;

impl Format for GuarantyFormatter {
    fn format(&self, raw: &RawItem) -> FormattedRecord {
        let mut record = FormattedRecord::new();
        if raw
            .get("guaranty")
            .is_some_and(|term| !term.trim_matches('-').is_empty())
        {
            record.insert("warranty", WARRANTY_YES);
        }
        record
    }
}
