//! Format-specific document readers and extension dispatch

use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::RawRecord;

/// Capability implemented by each format reader
///
/// Readers are stateless; a failed load surfaces a distinguishable error
/// rather than silently returning an empty record list.
pub trait DocumentReader: Send + Sync {
    /// Load a file into one or more records
    fn load(&self, path: &Path) -> Result<Vec<RawRecord>>;

    /// Short format name, used in logs and record metadata
    fn format_name(&self) -> &'static str;
}

/// Resolve a reader for `path` by file extension
///
/// The dispatch table is fixed and case-sensitive; unmatched extensions
/// resolve to `None`, which callers treat as a recoverable skip.
pub fn resolve_reader(path: &Path) -> Option<&'static dyn DocumentReader> {
    let extension = path.extension()?.to_str()?;
    match extension {
        "pdf" => Some(&PdfReader),
        "oc" | "docx" => Some(&DocxReader),
        "html" => Some(&HtmlReader),
        "json" => Some(&JsonReader),
        "csv" => Some(&CsvReader),
        "txt" | "data" | "dat" => Some(&TextReader),
        _ => None,
    }
}

fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn base_record(path: &Path, text: String, format: &'static str) -> RawRecord {
    let hash = content_hash(&text);
    RawRecord::new(path, text)
        .with_metadata("format", json!(format))
        .with_metadata("content_hash", json!(hash))
}

/// Plain text reader (`.txt`, `.data`, `.dat`)
pub struct TextReader;

impl DocumentReader for TextReader {
    fn load(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let data = fs::read(path).map_err(|e| Error::read_failure(path, e.to_string()))?;
        let text = String::from_utf8_lossy(&data).into_owned();
        Ok(vec![base_record(path, text, self.format_name())])
    }

    fn format_name(&self) -> &'static str {
        "text"
    }
}

/// PDF reader backed by pdf-extract, with a lopdf page count
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn load(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let data = fs::read(path).map_err(|e| Error::read_failure(path, e.to_string()))?;
        let raw = pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| Error::read_failure(path, format!("PDF extraction failed: {}", e)))?;

        let text = cleanup_pdf_text(&raw);
        if text.trim().is_empty() {
            return Err(Error::read_failure(
                path,
                "no extractable text content in PDF",
            ));
        }

        let mut record = base_record(path, text, self.format_name());
        if let Ok(doc) = lopdf::Document::load_mem(&data) {
            record = record.with_metadata("total_pages", json!(doc.get_pages().len()));
        }
        Ok(vec![record])
    }

    fn format_name(&self) -> &'static str {
        "pdf"
    }
}

/// Normalize extracted PDF text: smart punctuation and ligatures to ASCII,
/// null bytes removed, blank lines dropped.
fn cleanup_pdf_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\0' => {}
            '\u{2010}' | '\u{2011}' | '\u{2013}' => cleaned.push('-'),
            '\u{2014}' => cleaned.push_str("--"),
            '\u{2018}' | '\u{2019}' => cleaned.push('\''),
            '\u{201C}' | '\u{201D}' => cleaned.push('"'),
            '\u{00A0}' => cleaned.push(' '),
            '\u{FB00}' => cleaned.push_str("ff"),
            '\u{FB01}' => cleaned.push_str("fi"),
            '\u{FB02}' => cleaned.push_str("fl"),
            '\u{FB03}' => cleaned.push_str("ffi"),
            '\u{FB04}' => cleaned.push_str("ffl"),
            _ => cleaned.push(c),
        }
    }
    cleaned
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Word reader for `.docx` and the legacy `.oc` alias, backed by docx-rs
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn load(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let data = fs::read(path).map_err(|e| Error::read_failure(path, e.to_string()))?;
        let doc = docx_rs::read_docx(&data)
            .map_err(|e| Error::read_failure(path, format!("DOCX parse failed: {}", e)))?;

        let mut text = String::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                text.push('\n');
            }
        }

        Ok(vec![base_record(path, text, self.format_name())])
    }

    fn format_name(&self) -> &'static str {
        "docx"
    }
}

/// HTML reader extracting body text via scraper
pub struct HtmlReader;

impl DocumentReader for HtmlReader {
    fn load(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let data = fs::read(path).map_err(|e| Error::read_failure(path, e.to_string()))?;
        let html = String::from_utf8_lossy(&data);
        let document = scraper::Html::parse_document(&html);

        let body_selector = scraper::Selector::parse("body").unwrap();
        let mut text = String::new();
        if let Some(body) = document.select(&body_selector).next() {
            for fragment in body.text() {
                let trimmed = fragment.trim();
                if !trimmed.is_empty() {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(trimmed);
                }
            }
        }

        Ok(vec![base_record(path, text, self.format_name())])
    }

    fn format_name(&self) -> &'static str {
        "html"
    }
}

/// JSON reader flattening string values depth-first into text lines
pub struct JsonReader;

impl JsonReader {
    fn collect_strings(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::String(s) => out.push(s.clone()),
            Value::Array(items) => {
                for item in items {
                    Self::collect_strings(item, out);
                }
            }
            Value::Object(map) => {
                for item in map.values() {
                    Self::collect_strings(item, out);
                }
            }
            _ => {}
        }
    }
}

impl DocumentReader for JsonReader {
    fn load(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let data = fs::read(path).map_err(|e| Error::read_failure(path, e.to_string()))?;
        let value: Value = serde_json::from_slice(&data)
            .map_err(|e| Error::read_failure(path, format!("JSON parse failed: {}", e)))?;

        let mut lines = Vec::new();
        Self::collect_strings(&value, &mut lines);
        Ok(vec![base_record(path, lines.join("\n"), self.format_name())])
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}

/// CSV reader emitting one record per data row
pub struct CsvReader;

impl DocumentReader for CsvReader {
    fn load(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| Error::read_failure(path, e.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|e| Error::read_failure(path, e.to_string()))?
            .clone();

        let mut records = Vec::new();
        for (row_index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| Error::read_failure(path, e.to_string()))?;
            let text = headers
                .iter()
                .zip(row.iter())
                .map(|(header, value)| format!("{}: {}", header, value))
                .collect::<Vec<_>>()
                .join("\n");
            records.push(
                base_record(path, text, self.format_name()).with_metadata("row", json!(row_index)),
            );
        }
        Ok(records)
    }

    fn format_name(&self) -> &'static str {
        "csv"
    }
}
