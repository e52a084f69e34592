//! Text Extraction: pulls raw text out of uploaded resumes.
//!
//! Format is picked from the file extension: `.pdf`, `.docx`, anything else is
//! read as lossy UTF-8. Every failure degrades to an empty string so one bad
//! upload never fails the whole analysis run.
//!
//! # spawn_blocking pattern
//! PDF and DOCX parsing is CPU-bound. `extract_text` runs the synchronous reader
//! inside `tokio::task::spawn_blocking` and owns its `PathBuf` for the `'static` bound.

pub mod storage;

use std::path::{Path, PathBuf};

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(#[from] docx_rs::ReaderError),
}

/// Supported document formats, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("pdf") => DocumentFormat::Pdf,
            Some("docx") => DocumentFormat::Docx,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// Extracts trimmed text from `path` on the blocking pool. Never fails.
pub async fn extract_text(path: PathBuf) -> String {
    let shown = path.display().to_string();
    match tokio::task::spawn_blocking(move || extract_text_sync(&path)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Extraction task for {shown} panicked or was cancelled: {e}");
            String::new()
        }
    }
}

/// Synchronous extraction. Unreadable or unsupported content yields "".
pub fn extract_text_sync(path: &Path) -> String {
    let format = DocumentFormat::from_path(path);
    let result = match format {
        DocumentFormat::Pdf => read_pdf(path),
        DocumentFormat::Docx => read_docx(path),
        DocumentFormat::PlainText => read_plain_text(path),
    };

    match result {
        Ok(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                warn!("No text extracted from {}", path.display());
            } else {
                debug!("Extracted {} chars from {} ({format:?})", text.len(), path.display());
            }
            text
        }
        Err(e) => {
            warn!("Failed to extract text from {}: {e}", path.display());
            String::new()
        }
    }
}

/// Concatenates per-page text with newline separators, skipping pages with no text.
fn read_pdf(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    // pdf-extract panics on some malformed documents instead of returning an error.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes))
        .map_err(|_| ExtractionError::Pdf("parser panicked".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    let mut text = String::new();
    for page in pages.into_iter().filter(|p| !p.trim().is_empty()) {
        text.push_str(&page);
        text.push('\n');
    }
    text
}

/// Walks body paragraphs and their runs; each paragraph ends with a newline.
fn read_docx(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let docx = docx_rs::read_docx(&bytes)?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        match run_child {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push('\t'),
                            RunChild::Break(_) => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

fn read_plain_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
