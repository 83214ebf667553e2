//! `.docx` raw text: the paragraphs of `word/document.xml`, each followed by a
//! blank line. Tabs and manual line breaks inside a paragraph are kept.
//!
//! Text boxes and shapes are stored twice under `mc:AlternateContent`; only the
//! `mc:Choice` branch is read.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extraction::{BackendError, DocumentTextBackend};

const MAIN_PART: &str = "word/document.xml";

pub struct DocxBackend;

impl DocumentTextBackend for DocxBackend {
    fn extract_raw_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut xml = String::new();
        archive.by_name(MAIN_PART)?.read_to_string(&mut xml)?;
        paragraphs_to_text(&xml)
    }
}

fn paragraphs_to_text(xml: &str) -> Result<String, BackendError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;
    // nesting depth inside `mc:Fallback`
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if e.local_name().as_ref() == b"Fallback" => fallback_depth += 1,
            Event::End(ref e) if e.local_name().as_ref() == b"Fallback" => {
                fallback_depth = fallback_depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ if fallback_depth > 0 => {}
            Event::Start(ref e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Text(ref e) if in_run_text => {
                text.push_str(&e.unescape()?);
            }
            _ => {}
        }
    }

    Ok(text)
}
