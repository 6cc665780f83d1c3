use super::Format;
use crate::record::{FormattedRecord, RawItem};

const SIMPLE_FIELDS: &[&str] = &[
    "id",
    "name",
    "manufacturer",
    "price22",
    "vat",
    "category",
    "images",
    "warranty",
    "country",
    "unit_measurement",
    "available",
    "weight",
    "outer_depth",
    "outer_width",
    "outer_height",
];

const PADDING: char = '-';
const ID_SUFFIX: &str = "S";

pub const WARRANTY_YES: &str = "Да";
pub const WARRANTY_NO: &str = "Нет";

/// Fields copied straight from the feed with `-` padding removed.
pub struct SimpleFieldsFormatter;

impl Format for SimpleFieldsFormatter {
    fn format(&self, raw: &RawItem) -> FormattedRecord {
        let mut record: FormattedRecord = raw
            .iter()
            .filter(|(name, _)| SIMPLE_FIELDS.contains(name))
            .map(|(name, value)| (name, value.trim_matches(PADDING)))
            .collect();

        let has_warranty = record.get("warranty").is_some_and(|w| !w.is_empty());
        record.insert(
            "warranty",
            if has_warranty { WARRANTY_YES } else { WARRANTY_NO },
        );

        if let Some(id) = record.get("id").filter(|id| !id.is_empty()) {
            let id = format!("{}{}", id, ID_SUFFIX);
            record.insert("id", id);
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_padding() {
        let raw: RawItem = [("weight", "-5kg-"), ("name", "--Box")].into_iter().collect();
        let record = SimpleFieldsFormatter.format(&raw);

        assert_eq!(record.get("weight"), Some("5kg"));
        assert_eq!(record.get("name"), Some("Box"));
    }

    #[test]
    fn test_drops_unlisted_fields() {
        let raw: RawItem = [("color", "red"), ("id", "1")].into_iter().collect();
        let record = SimpleFieldsFormatter.format(&raw);

        assert_eq!(record.get("color"), None);
        assert_eq!(record.get("id"), Some("1S"));
    }

    #[test]
    fn test_warranty_values() {
        let raw: RawItem = [("warranty", "12 months")].into_iter().collect();
        assert_eq!(SimpleFieldsFormatter.format(&raw).get("warranty"), Some(WARRANTY_YES));

        let raw: RawItem = [("warranty", "-")].into_iter().collect();
        assert_eq!(SimpleFieldsFormatter.format(&raw).get("warranty"), Some(WARRANTY_NO));

        let raw = RawItem::new();
        assert_eq!(SimpleFieldsFormatter.format(&raw).get("warranty"), Some(WARRANTY_NO));
    }

    #[test]
    fn test_empty_id_gets_no_suffix() {
        let raw: RawItem = [("id", "")].into_iter().collect();
        assert_eq!(SimpleFieldsFormatter.format(&raw).get("id"), Some(""));
    }
}
