use super::Format;
use crate::record::{FormattedRecord, RawItem};
use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

const DESCRIPTION_FIELDS: &[&str] = &["preview_text", "detail_text"];

const VALID_HTML_TAGS: &[&str] = &["p", "h2", "ul", "ol", "li", "br"];

const HTML_ENTITIES: &[&str] = &[
    "&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&nbsp;", "&copy;", "&reg;", "&trade;",
    "&laquo;", "&raquo;", "&bull;", "&hellip;", "&mdash;", "&ndash;", "&tilde;", "&deg;",
    "&times;", "&divide;",
];

lazy_static! {
    static ref RE_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref RE_DECLARATION: Regex = Regex::new(r"<![^>]*>").unwrap();
    static ref RE_TAG: Regex = Regex::new(r"</?([A-Za-z][A-Za-z0-9]*)\b[^>]*>").unwrap();
}

/// First non-empty product text, decoded and reduced to basic structural markup.
pub struct DescriptionFormatter;

impl Format for DescriptionFormatter {
    fn format(&self, raw: &RawItem) -> FormattedRecord {
        let mut record = FormattedRecord::new();
        if let Some(text) = DESCRIPTION_FIELDS
            .iter()
            .filter_map(|field| raw.get(field))
            .find(|text| !text.is_empty())
        {
            record.insert("description", clean_html(text));
        }
        record
    }
}

fn has_html_entity(text: &str) -> bool {
    HTML_ENTITIES.iter().any(|entity| text.contains(entity))
}

/// Decode HTML entities until none of the known ones remain.
///
/// Feeds double-escape descriptions (`&amp;lt;p&amp;gt;`), so one pass is not
/// enough.
pub fn clear_html_entities(text: &str) -> String {
    let mut text = text.to_string();
    while has_html_entity(&text) {
        let decoded = decode_html_entities(&text).into_owned();
        if decoded == text {
            break;
        }
        text = decoded;
    }
    text
}

/// Unwrap every tag outside [`VALID_HTML_TAGS`], keeping its text.
pub fn strip_invalid_tags(html: &str) -> String {
    let html = RE_COMMENT.replace_all(html, "");
    let html = RE_DECLARATION.replace_all(&html, "");
    RE_TAG
        .replace_all(&html, |caps: &Captures| {
            let name = caps[1].to_ascii_lowercase();
            if VALID_HTML_TAGS.contains(&name.as_str()) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn clean_html(text: &str) -> String {
    strip_invalid_tags(&clear_html_entities(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_text_comes_first() {
        let raw: RawItem = [("detail_text", "detail"), ("preview_text", "preview")]
            .into_iter()
            .collect();
        let record = DescriptionFormatter.format(&raw);
        assert_eq!(record.get("description"), Some("preview"));
    }

    #[test]
    fn test_falls_back_to_detail_text() {
        let raw: RawItem = [("preview_text", ""), ("detail_text", "detail")]
            .into_iter()
            .collect();
        let record = DescriptionFormatter.format(&raw);
        assert_eq!(record.get("description"), Some("detail"));
    }

    #[test]
    fn test_no_text_gives_empty_record() {
        let raw: RawItem = [("name", "Box")].into_iter().collect();
        assert!(DescriptionFormatter.format(&raw).is_empty());
    }

    #[test]
    fn test_decodes_nested_entities() {
        assert_eq!(clear_html_entities("&amp;lt;p&amp;gt;"), "<p>");
        assert_eq!(clear_html_entities("5&nbsp;&deg;C"), "5\u{a0}°C");
    }

    #[test]
    fn test_decoding_plain_text_is_noop() {
        let text = "<p>Steel safe, 30 kg & more</p>";
        assert_eq!(clear_html_entities(text), text);
        assert_eq!(clear_html_entities(&clear_html_entities(text)), text);
    }

    #[test]
    fn test_keeps_only_structural_tags() {
        let html = r#"<div class="x"><p>Safe <b>steel</b></p><ul><li>one</li></ul><br><span>x</span></div>"#;
        assert_eq!(
            strip_invalid_tags(html),
            "<p>Safe steel</p><ul><li>one</li></ul><br>x"
        );
    }

    #[test]
    fn test_strips_comments_and_doctype() {
        let html = "<!DOCTYPE html><!-- note --><h2>Title</h2>";
        assert_eq!(strip_invalid_tags(html), "<h2>Title</h2>");
    }

    #[test]
    fn test_escaped_markup_is_cleaned() {
        let raw: RawItem = [("preview_text", "&lt;p&gt;&lt;strong&gt;Box&lt;/strong&gt;&lt;/p&gt;")]
            .into_iter()
            .collect();
        let record = DescriptionFormatter.format(&raw);
        assert_eq!(record.get("description"), Some("<p>Box</p>"));
    }
}
