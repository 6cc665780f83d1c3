use super::Format;
use crate::record::{FormattedRecord, RawItem};

/// Constant values every product row carries.
pub struct DefaultFieldsFormatter;

impl Format for DefaultFieldsFormatter {
    fn format(&self, _raw: &RawItem) -> FormattedRecord {
        [
            ("vat", "20"),
            ("available", "под заказ"),
            ("unit_measurement", "Шт"),
        ]
        .into_iter()
        .collect()
    }
}
