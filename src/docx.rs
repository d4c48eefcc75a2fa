//! Serialization of laid-out documents to `.docx` through `docx-rs`.

use crate::error::{JobdocsError, Result};
use crate::layout::{Document, Margins, Paragraph, Run, colors};
use docx_rs::{
    AbstractNumbering, BorderType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    LineSpacing, LineSpacingType, NumberFormat, Numbering, NumberingId, PageMargin,
    ParagraphBorder, ParagraphBorderPosition, ParagraphBorders, SpecialIndentType, Start,
};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Numbering id shared by every bulleted paragraph
const BULLET_NUMBERING: usize = 1;
/// Default bullet indent in twips (0.25in) with a matching hanging indent
const BULLET_LEFT: i32 = 360;
const BULLET_HANGING: i32 = 360;
/// Single line spacing, in 240ths of a line
const SINGLE_LINE: i32 = 240;
/// Rule under headings: 1.5pt, expressed in eighths of a point
const RULE_SIZE: usize = 12;

#[must_use]
pub fn inches_to_twips(inches: f32) -> i32 {
    (inches * 1440.0).round() as i32
}

#[must_use]
pub fn points_to_twips(points: f32) -> u32 {
    (points.max(0.0) * 20.0).round() as u32
}

#[must_use]
pub fn points_to_half_points(points: f32) -> usize {
    (points.max(0.0) * 2.0).round() as usize
}

/// Builds the `docx-rs` document tree for a layout
#[must_use]
pub fn build(document: &Document) -> Docx {
    let bullets = AbstractNumbering::new(BULLET_NUMBERING).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("\u{2022}"),
            LevelJc::new("left"),
        )
        .indent(
            Some(BULLET_LEFT),
            Some(SpecialIndentType::Hanging(BULLET_HANGING)),
            None,
            None,
        ),
    );

    let mut docx = Docx::new()
        .page_margin(page_margin(document.margins))
        .add_abstract_numbering(bullets)
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

    for paragraph in &document.paragraphs {
        docx = docx.add_paragraph(paragraph_to_docx(paragraph));
    }

    docx
}

/// Writes a laid-out document to `path`
///
/// # Errors
///
/// - `JobdocsError::Io` if the file cannot be created.
/// - `JobdocsError::DocxWrite` if packing the archive fails.
pub fn write_docx(document: &Document, path: &Path) -> Result<()> {
    debug!(
        paragraphs = document.paragraphs.len(),
        path = %path.display(),
        "packing document"
    );
    let file = File::create(path)?;
    build(document)
        .build()
        .pack(file)
        .map_err(|e| JobdocsError::DocxWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn page_margin(margins: Margins) -> PageMargin {
    PageMargin::new()
        .top(inches_to_twips(margins.top))
        .bottom(inches_to_twips(margins.bottom))
        .left(inches_to_twips(margins.left))
        .right(inches_to_twips(margins.right))
}

fn paragraph_to_docx(paragraph: &Paragraph) -> docx_rs::Paragraph {
    let spacing = LineSpacing::new()
        .before(points_to_twips(paragraph.space_before))
        .after(points_to_twips(paragraph.space_after))
        .line(SINGLE_LINE)
        .line_rule(LineSpacingType::Auto);

    let mut p = docx_rs::Paragraph::new().line_spacing(spacing);

    if paragraph.bullet {
        p = p.numbering(NumberingId::new(BULLET_NUMBERING), IndentLevel::new(0));
    }
    if let Some(inches) = paragraph.indent {
        p = p.indent(
            Some(inches_to_twips(inches)),
            paragraph
                .bullet
                .then_some(SpecialIndentType::Hanging(BULLET_HANGING)),
            None,
            None,
        );
    }
    if paragraph.rule_below {
        // with_empty: the default border set boxes all four sides
        p = p.set_borders(
            ParagraphBorders::with_empty().set(
                ParagraphBorder::new(ParagraphBorderPosition::Bottom)
                    .val(BorderType::Single)
                    .size(RULE_SIZE)
                    .color(colors::ACCENT),
            ),
        );
    }

    for run in &paragraph.runs {
        p = p.add_run(run_to_docx(run));
    }
    p
}

fn run_to_docx(run: &Run) -> docx_rs::Run {
    let mut r = docx_rs::Run::new()
        .size(points_to_half_points(run.size))
        .color(run.color);
    if run.bold {
        r = r.bold();
    }

    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            r = r.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            r = r.add_text(line);
        }
    }
    r
}
