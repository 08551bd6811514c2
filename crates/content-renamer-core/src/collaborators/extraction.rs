//! Document text extraction.
//!
//! Pure Rust extraction for the document kinds that have a reader crate:
//! - PDF via pdf-extract
//! - XLSX via calamine
//! - DOCX via docx-rs
//! - text-like formats (txt, md, csv, tsv, html, xml, eml, rtf) read directly
//!
//! Everything else the classifier calls a document (doc, odt, ppt, pptx, msg,
//! epub) is reported as unsupported, which fails that one file.

use calamine::{open_workbook, Reader, Xlsx};
use log::{debug, warn};
use std::path::Path;

use super::{CollaboratorError, TextExtractor};

/// Extracts plain text from document files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn is_plain_text_ext(ext: &str) -> bool {
        matches!(
            ext,
            "txt" | "md" | "csv" | "tsv" | "html" | "xml" | "eml" | "rtf"
        )
    }

    fn read_plain_text(path: &Path) -> Result<String, CollaboratorError> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn extract_pdf(path: &Path) -> Result<String, CollaboratorError> {
        let bytes = std::fs::read(path)?;

        // pdf-extract can panic on malformed fonts
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        })) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(CollaboratorError::Parse(format!(
                "PDF {}: {}",
                path.display(),
                e
            ))),
            Err(_) => {
                warn!("PDF extraction panicked for {}", path.display());
                Err(CollaboratorError::Parse(format!(
                    "PDF {}: extractor panicked",
                    path.display()
                )))
            }
        }
    }

    fn extract_xlsx(path: &Path) -> Result<String, CollaboratorError> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e| CollaboratorError::Parse(format!("XLSX {}: {}", path.display(), e)))?;

        let mut all_text = String::new();
        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

        for sheet_name in &sheet_names {
            if let Ok(range) = workbook.worksheet_range(sheet_name) {
                for row in range.rows() {
                    let row_text: Vec<String> = row
                        .iter()
                        .map(|cell| cell.to_string())
                        .filter(|s| !s.is_empty())
                        .collect();

                    if !row_text.is_empty() {
                        all_text.push_str(&row_text.join(" "));
                        all_text.push('\n');
                    }
                }
            }
        }

        Ok(all_text)
    }

    fn extract_docx(path: &Path) -> Result<String, CollaboratorError> {
        let bytes = std::fs::read(path)?;
        let doc = docx_rs::read_docx(&bytes)
            .map_err(|e| CollaboratorError::Parse(format!("DOCX {}: {}", path.display(), e)))?;

        let mut all_text = String::new();
        for child in &doc.document.children {
            Self::push_docx_content(child, &mut all_text);
        }

        Ok(all_text)
    }

    fn push_paragraph(para: &docx_rs::Paragraph, output: &mut String) {
        for child in &para.children {
            match child {
                docx_rs::ParagraphChild::Run(run) => Self::push_run(run, output),
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    for run in &link.children {
                        if let docx_rs::ParagraphChild::Run(r) = run {
                            Self::push_run(r, output);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn push_run(run: &docx_rs::Run, output: &mut String) {
        for run_child in &run.children {
            if let docx_rs::RunChild::Text(text) = run_child {
                output.push_str(&text.text);
            }
        }
    }

    fn push_docx_content(element: &docx_rs::DocumentChild, output: &mut String) {
        match element {
            docx_rs::DocumentChild::Paragraph(para) => {
                Self::push_paragraph(para, output);
                output.push('\n');
            }
            docx_rs::DocumentChild::Table(table) => {
                for row in &table.rows {
                    let docx_rs::TableChild::TableRow(tr) = row;
                    for cell in &tr.cells {
                        let docx_rs::TableRowChild::TableCell(tc) = cell;
                        for child in &tc.children {
                            if let docx_rs::TableCellContent::Paragraph(para) = child {
                                Self::push_paragraph(para, output);
                                output.push(' ');
                            }
                        }
                    }
                    output.push('\n');
                }
            }
            _ => {}
        }
    }

    /// Trim every line and drop the blank ones
    fn clean_text(text: &str) -> String {
        text.lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, CollaboratorError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        let raw = match ext.as_str() {
            e if Self::is_plain_text_ext(e) => Self::read_plain_text(path)?,
            "pdf" => Self::extract_pdf(path)?,
            "xlsx" => Self::extract_xlsx(path)?,
            "docx" => Self::extract_docx(path)?,
            other => return Err(CollaboratorError::UnsupportedDocument(format!(".{}", other))),
        };

        let text = Self::clean_text(&raw);
        debug!(
            "Extracted {} chars ({} raw) from {}",
            text.chars().count(),
            raw.len(),
            path.display()
        );
        Ok(text)
    }
}
