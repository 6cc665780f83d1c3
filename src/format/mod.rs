//! Record formatters.
//!
//! Each formatter looks at the raw item as flattened from the feed and returns
//! a partial record. [`run_pipeline`] merges the partial records in order, so
//! a later formatter overrides keys set by an earlier one.

mod characteristics;
mod defaults;
mod description;
mod guaranty;
mod images;
mod simple;

pub use characteristics::CharacteristicsFormatter;
pub use defaults::DefaultFieldsFormatter;
pub use description::DescriptionFormatter;
pub use guaranty::GuarantyFormatter;
pub use images::ImagesFormatter;
pub use simple::SimpleFieldsFormatter;

use crate::record::{FormattedRecord, RawItem};
use clap::ValueEnum;

pub trait Format {
    fn format(&self, raw: &RawItem) -> FormattedRecord;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatterKind {
    DefaultFields,
    SimpleFields,
    Description,
    Images,
    Characteristics,
    Guaranty,
}

impl FormatterKind {
    pub fn format(&self, raw: &RawItem) -> FormattedRecord {
        match self {
            FormatterKind::DefaultFields => DefaultFieldsFormatter.format(raw),
            FormatterKind::SimpleFields => SimpleFieldsFormatter.format(raw),
            FormatterKind::Description => DescriptionFormatter.format(raw),
            FormatterKind::Images => ImagesFormatter.format(raw),
            FormatterKind::Characteristics => CharacteristicsFormatter.format(raw),
            FormatterKind::Guaranty => GuarantyFormatter.format(raw),
        }
    }
}

pub const DEFAULT_FORMATTERS: [FormatterKind; 6] = [
    FormatterKind::DefaultFields,
    FormatterKind::SimpleFields,
    FormatterKind::Description,
    FormatterKind::Images,
    FormatterKind::Characteristics,
    FormatterKind::Guaranty,
];

/// Run every formatter against the same raw item and merge the results.
///
/// When no formatter produces anything the raw item is returned as is.
pub fn run_pipeline(formatters: &[FormatterKind], raw: RawItem) -> FormattedRecord {
    let mut formatted = FormattedRecord::new();
    for formatter in formatters {
        formatted.merge(formatter.format(&raw));
    }

    if formatted.is_empty() { raw } else { formatted }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_formatter_wins() {
        let raw: RawItem = [("vat", "10")].into_iter().collect();

        let record = run_pipeline(
            &[FormatterKind::DefaultFields, FormatterKind::SimpleFields],
            raw.clone(),
        );
        assert_eq!(record.get("vat"), Some("10"));

        let record = run_pipeline(
            &[FormatterKind::SimpleFields, FormatterKind::DefaultFields],
            raw,
        );
        assert_eq!(record.get("vat"), Some("20"));
    }

    #[test]
    fn test_formatters_see_raw_item_only() {
        // Images must not pick up the raw "images" copied by SimpleFields.
        let raw: RawItem = [("images", "old.jpg"), ("preview_picture", "new.jpg")]
            .into_iter()
            .collect();

        let record = run_pipeline(&DEFAULT_FORMATTERS, raw);
        assert_eq!(record.get("images"), Some("new.jpg"));
    }

    #[test]
    fn test_empty_pipeline_passes_through() {
        let raw: RawItem = [("id", "1"), ("category", "Safes")].into_iter().collect();
        assert_eq!(run_pipeline(&[], raw.clone()), raw);
    }

    #[test]
    fn test_description_only_without_text_passes_through() {
        let raw: RawItem = [("id", "7")].into_iter().collect();
        let record = run_pipeline(&[FormatterKind::Description], raw.clone());
        assert_eq!(record, raw);
    }
}
