//! Text extraction from various file formats

use crate::error::{Result, ResumeMatcherError};
use log::debug;
use lopdf::{Document, Encoding, Object, ObjectId};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeMatcherError::Io)?;

        extract_pdf_text(&bytes).map_err(|e| match e {
            ResumeMatcherError::PdfExtraction(msg) => ResumeMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }
}

/// Extract the text of a PDF page by page.
///
/// Each page that yields text contributes that text followed by a single
/// newline. Pages that yield nothing, or whose extraction fails, are skipped.
/// Only a document that cannot be opened at all is an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ResumeMatcherError::PdfExtraction(format!("cannot open document: {}", e)))?;

    let mut text = String::new();
    for (page_num, page_id) in doc.get_pages() {
        match page_text(&doc, page_id) {
            Ok(page) if !page.trim().is_empty() => {
                text.push_str(page.trim_end());
                text.push('\n');
            }
            Ok(_) => debug!("Page {} has no extractable text, skipping", page_num),
            Err(e) => debug!("Page {} extraction failed, skipping: {}", page_num, e),
        }
    }

    Ok(text)
}

/// Text shown on one page, one output line per text line.
///
/// Line moves (`Td`/`TD` with a vertical offset, `Tm`, `T*`, `'`, `"`) and
/// the end of a text object start a new line.
fn page_text(doc: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings: BTreeMap<Vec<u8>, Encoding> = doc
        .get_page_fonts(page_id)?
        .into_iter()
        .filter_map(|(name, font)| match font.get_font_encoding(doc) {
            Ok(encoding) => Some((name, encoding)),
            Err(e) => {
                debug!("Unusable font encoding, ignoring font: {}", e);
                None
            }
        })
        .collect();
    let content = doc.get_and_decode_page_content(page_id)?;

    let mut text = String::new();
    let mut encoding: Option<&Encoding> = None;
    for operation in &content.operations {
        let operands = operation.operands.as_slice();
        match operation.operator.as_str() {
            "Tf" => {
                encoding = operands
                    .first()
                    .and_then(|font| font.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "Tj" | "TJ" => push_shown_text(&mut text, encoding, operands),
            "'" => {
                break_line(&mut text);
                push_shown_text(&mut text, encoding, operands);
            }
            "\"" => {
                break_line(&mut text);
                push_shown_text(&mut text, encoding, operands.get(2..).unwrap_or_default());
            }
            "Td" | "TD" => {
                let moves_down = operands
                    .get(1)
                    .and_then(|ty| ty.as_float().ok())
                    .is_some_and(|ty| ty != 0.0);
                if moves_down {
                    break_line(&mut text);
                }
            }
            "Tm" | "T*" | "ET" => break_line(&mut text),
            _ => {}
        }
    }

    Ok(text)
}

fn break_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn push_shown_text(text: &mut String, encoding: Option<&Encoding>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => match encoding {
                Some(encoding) => match Document::decode_text(encoding, bytes) {
                    Ok(decoded) => text.push_str(&decoded),
                    Err(e) => debug!("Could not decode shown text: {}", e),
                },
                None => {
                    if let Ok(decoded) = std::str::from_utf8(bytes) {
                        text.push_str(decoded);
                    }
                }
            },
            Object::Array(items) => push_shown_text(text, encoding, items),
            // Large negative kerning inside TJ is a word gap.
            Object::Integer(offset) if *offset < -100 => text.push(' '),
            Object::Real(offset) if *offset < -100.0 => text.push(' '),
            _ => {}
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ResumeMatcherError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(ResumeMatcherError::Io)?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render markdown and strip it back down to plain text.
///
/// Block elements (paragraphs, list items, headings) stay separated by a
/// blank line; soft breaks inside a paragraph stay single newlines.
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    static BLOCK_END_RE: OnceLock<Regex> = OnceLock::new();
    let block_end_re = BLOCK_END_RE
        .get_or_init(|| Regex::new(r"</(p|li|h[1-6]|pre|blockquote)>").expect("valid block regex"));
    let text = block_end_re.replace_all(&html_output, "\n\n");

    let text = text
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
    let clean_text = tag_re.replace_all(&text, "");

    let mut blocks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in clean_text.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks.join("\n\n")
}
