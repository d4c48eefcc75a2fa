use crate::error::{JobdocsError, Result};
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, ReaderError, Run, RunChild, StructuredDataTag,
    StructuredDataTagChild, Table, TableCellContent, TableChild, TableRowChild, read_docx,
};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Characters shown by [`preview`] in the import summary
pub const PREVIEW_CHARS: usize = 500;

/// Extracts the text of a Word document, one line per non-empty paragraph.
///
/// Runs inside a paragraph are concatenated, hyperlink text included.
/// Horizontal whitespace collapses to single spaces and each line is trimmed.
///
/// # Errors
///
/// - `JobdocsError::FileNotFound` if the path doesn't exist.
/// - `JobdocsError::MissingDocumentPart` if the archive has no main document.
/// - `JobdocsError::InvalidDocx` for anything else the reader rejects.
pub fn extract_docx_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(JobdocsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let buffer = fs::read(path)?;
    // a missing package part surfaces as a zip lookup failure
    let document = read_docx(&buffer).map_err(|e| match e {
        ReaderError::DocumentNotFoundError
        | ReaderError::ZipError(zip::result::ZipError::FileNotFound) => {
            JobdocsError::MissingDocumentPart {
                path: path.to_path_buf(),
            }
        }
        other => JobdocsError::InvalidDocx {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    let mut raw = String::new();
    for child in &document.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(p, &mut raw),
            DocumentChild::Table(table) => push_table(table, &mut raw),
            DocumentChild::StructuredDataTag(tag) => push_structured_tag(tag, &mut raw),
            _ => {}
        }
    }

    let text = normalize_lines(&raw)?;
    debug!(path = %path.display(), chars = text.chars().count(), "extracted docx text");
    Ok(text)
}

fn push_paragraph(paragraph: &Paragraph, out: &mut String) {
    push_paragraph_children(&paragraph.children, out);
    out.push('\n');
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::StructuredDataTag(tag) => push_structured_tag(tag, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for node in &run.children {
        match node {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push(' '),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Every cell paragraph becomes its own line, nested tables included
fn push_table(table: &Table, out: &mut String) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => push_paragraph(p, out),
                    TableCellContent::Table(nested) => push_table(nested, out),
                    TableCellContent::StructuredDataTag(tag) => push_structured_tag(tag, out),
                    _ => {}
                }
            }
        }
    }
}

fn push_structured_tag(tag: &StructuredDataTag, out: &mut String) {
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => push_run(run, out),
            StructuredDataTagChild::Paragraph(p) => push_paragraph(p, out),
            StructuredDataTagChild::Table(table) => push_table(table, out),
            StructuredDataTagChild::StructuredDataTag(nested) => push_structured_tag(nested, out),
            _ => {}
        }
    }
}

/// Collapses tabs and repeated spaces, trims every line and drops empty ones
///
/// # Errors
///
/// Returns `JobdocsError::Regex` if the whitespace pattern fails to compile.
pub fn normalize_lines(text: &str) -> Result<String> {
    let spaces = Regex::new(r"[ \t]+")?;
    Ok(text
        .lines()
        .map(|line| spaces.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Reads a plain text file, decoding lossily if it isn't valid UTF-8
///
/// # Errors
///
/// - `JobdocsError::FileNotFound` if the path doesn't exist or isn't a file.
/// - `JobdocsError::Io` if there's an error reading the file.
pub fn read_text_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(JobdocsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Extracts text from an uploaded `.docx`, `.txt` or `.md` file
///
/// # Errors
///
/// - `JobdocsError::FileNotFound` if the path doesn't exist.
/// - `JobdocsError::UnsupportedFormat` for any other extension.
/// - Errors from [`extract_docx_text`] or [`read_text_file`].
pub fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(JobdocsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    info!(path = %path.display(), "importing");
    match extension.as_str() {
        "docx" => extract_docx_text(path),
        "txt" | "md" => read_text_file(path),
        _ => Err(JobdocsError::UnsupportedFormat {
            extension: if extension.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{extension}")
            },
        }),
    }
}

/// The first `max_chars` characters of `text`, followed by `...` when cut
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
