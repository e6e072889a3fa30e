//! Plain-text extraction from `.docx` packages.
//!
//! Only `word/document.xml` is read. Paragraphs become blank-line separated
//! blocks, table rows become lines with cells joined by ` | `.

use std::io::{Cursor, Read};

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub(crate) enum DocxError {
    #[error("invalid docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("failed to read word/document.xml: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed text escape: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
}

pub(crate) fn extract_text(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    flatten_document_xml(&xml)
}

#[derive(Default)]
struct Flattener {
    blocks: Vec<String>,
    paragraph: String,
    cell_paragraphs: Vec<String>,
    row_cells: Vec<String>,
    table_rows: Vec<String>,
    table_depth: usize,
    in_run: bool,
    in_text: bool,
}

impl Flattener {
    fn start(&mut self, name: &[u8]) {
        match name {
            b"p" => self.paragraph.clear(),
            b"r" => self.in_run = true,
            b"t" => self.in_text = self.in_run,
            b"tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table_rows.clear();
                }
            }
            b"tr" if self.table_depth == 1 => self.row_cells.clear(),
            b"tc" if self.table_depth == 1 => self.cell_paragraphs.clear(),
            _ => self.empty(name),
        }
    }

    fn empty(&mut self, name: &[u8]) {
        if !self.in_run {
            return;
        }
        match name {
            b"tab" => self.paragraph.push('\t'),
            b"br" | b"cr" => self.paragraph.push('\n'),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"p" => {
                let paragraph = std::mem::take(&mut self.paragraph);
                if paragraph.trim().is_empty() {
                    return;
                }
                if self.table_depth > 0 {
                    self.cell_paragraphs.push(paragraph);
                } else {
                    self.blocks.push(paragraph);
                }
            }
            b"r" => self.in_run = false,
            b"t" => self.in_text = false,
            b"tc" if self.table_depth == 1 => {
                self.row_cells.push(self.cell_paragraphs.join(" "));
            }
            b"tr" if self.table_depth == 1 => {
                let cells = std::mem::take(&mut self.row_cells);
                if cells.iter().any(|cell| !cell.is_empty()) {
                    self.table_rows.push(cells.join(" | "));
                }
            }
            b"tbl" => {
                self.table_depth = self.table_depth.saturating_sub(1);
                if self.table_depth == 0 && !self.table_rows.is_empty() {
                    self.blocks.push(self.table_rows.join("\n"));
                    self.table_rows.clear();
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_text {
            self.paragraph.push_str(text);
        }
    }
}

fn flatten_document_xml(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut state = Flattener::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => state.start(element.local_name().as_ref()),
            Event::Empty(element) => state.empty(element.local_name().as_ref()),
            Event::End(element) => state.end(element.local_name().as_ref()),
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text);
                state.text(&unescape(&raw)?);
            }
            Event::CData(data) => state.text(&String::from_utf8_lossy(&data)),
            Event::GeneralRef(reference) => {
                let name = String::from_utf8_lossy(&reference);
                if let Some(resolved) = resolve_reference(&name) {
                    state.text(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(state.blocks.join("\n\n"))
}

fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}
