//! Streaming extraction of product records from the catalog feed.
//!
//! The feed nests `<section>` elements inside `<sections>` groups; every
//! `<item>` belongs to the section most recently opened at the configured
//! depth. Items are flattened one at a time and dropped once formatted, so
//! memory use does not grow with the size of the feed.

use crate::category::CategoryTracker;
use crate::error::{Error, Result};
use crate::format::{run_pipeline, FormatterKind};
use crate::record::{FormattedRecord, RawItem};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::encoding::Decoder;
use quick_xml::Reader;
use std::io::BufRead;
use tracing::{debug, info};

pub const DEFAULT_CATEGORY_DEPTH: usize = 1;

const NONAME: &str = "Noname";

#[derive(Debug)]
enum Node {
    Sections,
    Section,
    SectionName,
    Item,
    ItemField(String),
    Other,
}

struct SectionState {
    depth: usize,
    named: bool,
    position: u64,
}

/// Scan state kept apart from the reader so events borrowed from the read
/// buffer can be handled without borrowing the whole extractor.
struct Scan {
    formatters: Vec<FormatterKind>,
    category_depth: usize,
    tracker: CategoryTracker,
    stack: Vec<Node>,
    sections: Vec<SectionState>,
    item: Option<RawItem>,
    text: String,
    seen_root: bool,
    parsed: usize,
}

pub struct Extractor<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    scan: Scan,
    done: bool,
}

impl<R: BufRead> Extractor<R> {
    pub fn new(source: R, formatters: &[FormatterKind], category_depth: usize) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            scan: Scan {
                formatters: formatters.to_vec(),
                category_depth,
                tracker: CategoryTracker::new(),
                stack: Vec::new(),
                sections: Vec::new(),
                item: None,
                text: String::new(),
                seen_root: false,
                parsed: 0,
            },
            done: false,
        }
    }

    /// Number of records produced so far.
    pub fn parsed(&self) -> usize {
        self.scan.parsed
    }

    fn next_record(&mut self) -> Result<Option<FormattedRecord>> {
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf);
            let position = self.reader.buffer_position() as u64;

            let decoder = self.reader.decoder();

            let record = match event {
                Ok(Event::Start(ref e)) => {
                    self.scan.open(e, decoder, position)?;
                    None
                }
                Ok(Event::Empty(ref e)) => {
                    self.scan.open(e, decoder, position)?;
                    self.scan.close(position)?
                }
                Ok(Event::End(_)) => self.scan.close(position)?,
                Ok(Event::Text(ref t)) => {
                    let text = decoder.decode(t).map_err(|e| xml_error(position, e))?;
                    self.scan.push_text(&text);
                    None
                }
                Ok(Event::CData(ref t)) => {
                    let text = decoder.decode(t).map_err(|e| xml_error(position, e))?;
                    self.scan.push_text(&text);
                    None
                }
                Ok(Event::GeneralRef(ref r)) => {
                    let name = decoder.decode(r).map_err(|e| xml_error(position, e))?;
                    let text = resolve_reference(&name)
                        .ok_or_else(|| xml_error(position, format!("invalid reference &{};", name)))?;
                    self.scan.push_text(&text);
                    None
                }
                Ok(Event::Eof) => {
                    self.scan.finish(position)?;
                    return Ok(None);
                }
                Ok(_) => None,
                Err(e) => return Err(xml_error(position, e)),
            };

            if record.is_some() {
                return Ok(record);
            }
        }
    }
}

impl<R: BufRead> Iterator for Extractor<R> {
    type Item = Result<FormattedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl Scan {
    fn open(&mut self, e: &BytesStart, decoder: Decoder, position: u64) -> Result<()> {
        self.seen_root = true;
        let name = e.name();
        let name = name.as_ref();

        let node = match (self.stack.last(), name) {
            (Some(Node::Item), _) => {
                self.text.clear();
                let field = decoder.decode(name).map_err(|e| xml_error(position, e))?;
                Node::ItemField(field.into_owned())
            }
            _ if self.item.is_some() => Node::Other,
            (_, b"sections") => {
                self.tracker.enter_section_group();
                Node::Sections
            }
            (_, b"section") => {
                self.sections.push(SectionState {
                    depth: self.tracker.depth(),
                    named: false,
                    position,
                });
                Node::Section
            }
            (Some(Node::Section), b"name") => {
                self.text.clear();
                Node::SectionName
            }
            (_, b"item") => {
                self.item = Some(RawItem::new());
                Node::Item
            }
            _ => Node::Other,
        };

        self.stack.push(node);
        Ok(())
    }

    fn close(&mut self, position: u64) -> Result<Option<FormattedRecord>> {
        let Some(node) = self.stack.pop() else {
            return Err(xml_error(position, "unexpected closing tag"));
        };

        match node {
            Node::Sections => {
                if !self.tracker.leave_section_group() {
                    return Err(Error::UnbalancedSections { position });
                }
            }
            Node::Section => {
                if let Some(section) = self.sections.pop() {
                    if !section.named {
                        return Err(Error::MissingSectionName {
                            position: section.position,
                        });
                    }
                }
            }
            Node::SectionName => {
                if let Some(section) = self.sections.last_mut() {
                    let name = std::mem::take(&mut self.text);
                    self.tracker.record_section_name(section.depth, name);
                    section.named = true;
                }
            }
            Node::ItemField(field) => {
                let value = std::mem::take(&mut self.text);
                if let Some(item) = self.item.as_mut() {
                    item.insert(field, value);
                }
            }
            Node::Item => {
                if let Some(item) = self.item.take() {
                    return self.finish_item(item).map(Some);
                }
            }
            Node::Other => {}
        }

        Ok(None)
    }

    fn push_text(&mut self, text: &str) {
        if matches!(self.stack.last(), Some(Node::SectionName | Node::ItemField(_))) {
            self.text.push_str(text);
        }
    }

    fn finish_item(&mut self, mut item: RawItem) -> Result<FormattedRecord> {
        let Some(category) = self.tracker.category_at(self.category_depth) else {
            let label = item.get("name").or(item.get("id")).unwrap_or(NONAME);
            return Err(Error::MissingCategory {
                depth: self.category_depth,
                item: label.to_string(),
            });
        };
        item.insert("category", category);

        let record = run_pipeline(&self.formatters, item);
        self.parsed += 1;

        info!("Product {:?} was parsed", record.get("name").unwrap_or(NONAME));
        debug!("Products parsed: {}", self.parsed);

        Ok(record)
    }

    fn finish(&self, position: u64) -> Result<()> {
        if !self.seen_root {
            return Err(xml_error(position, "no element found"));
        }
        if !self.stack.is_empty() {
            return Err(xml_error(position, "unexpected end of document"));
        }
        Ok(())
    }
}

/// Resolve `&name;` found in character data.
///
/// Unknown named entities are kept as written so HTML entities embedded in
/// descriptions survive until the description formatter decodes them.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let code = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    match resolve_predefined_entity(name) {
        Some(text) => Some(text.to_string()),
        None => Some(format!("&{};", name)),
    }
}

fn xml_error(position: u64, details: impl std::fmt::Display) -> Error {
    Error::Xml {
        position,
        details: details.to_string(),
    }
}

/// Extract every record from `source`, failing on the first error.
pub fn extract<R: BufRead>(
    source: R,
    formatters: &[FormatterKind],
    category_depth: usize,
) -> Result<Vec<FormattedRecord>> {
    info!("Parsing products");

    let mut extractor = Extractor::new(source, formatters, category_depth);
    let records = extractor.by_ref().collect::<Result<Vec<_>>>()?;

    info!("Products parsed: {}", extractor.parsed());
    Ok(records)
}
