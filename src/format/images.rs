use super::Format;
use crate::record::{FormattedRecord, RawItem};

const IMAGES_FIELDS: &[&str] = &["preview_picture", "detail_picture", "additional_photo"];

/// Fields that may list several comma-separated references.
const MULTI_VALUE_FIELDS: &[&str] = &["additional_photo"];

const MAX_IMAGES: usize = 10;

/// Comma-joined list of image references, capped at [`MAX_IMAGES`].
pub struct ImagesFormatter;

impl Format for ImagesFormatter {
    fn format(&self, raw: &RawItem) -> FormattedRecord {
        let images: Vec<&str> = IMAGES_FIELDS
            .iter()
            .filter_map(|field| raw.get(field).map(|value| (*field, value)))
            .flat_map(|(field, value)| {
                if MULTI_VALUE_FIELDS.contains(&field) {
                    value.split(',').map(str::trim).collect::<Vec<_>>()
                } else {
                    vec![value]
                }
            })
            .filter(|image| !image.is_empty())
            .take(MAX_IMAGES)
            .collect();

        let mut record = FormattedRecord::new();
        record.insert("images", images.join(","));
        record
    }
}
