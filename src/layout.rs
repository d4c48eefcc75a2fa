//! Document templates.
//!
//! The layout functions turn a candidate's data into a [`Document`]: the
//! fixed sequence of headings, spacing, colors and margins for a cover
//! letter or a resume. Nothing here touches the file format; [`crate::docx`]
//! serializes the result.

use crate::highlight::{Segment, split_highlights};
use crate::model::{
    Bullet, BulletItem, Candidate, Certification, CoverLetter, Education, Job, LetterParagraph,
    Resume, Year,
};

/// Accessible palette (7:1 or better contrast on white)
pub mod colors {
    /// Navy blue for names, headings and rules
    pub const ACCENT: &str = "1a5276";
    /// Near-black body text
    pub const TEXT_PRIMARY: &str = "1a202c";
    /// Dark gray for contact lines and dates
    pub const TEXT_SECONDARY: &str = "374151";
}

/// Space above a section heading, in points
pub const SPACE_BEFORE_HEADING: f32 = 14.0;
/// Space above the first section heading, in points
pub const SPACE_BEFORE_FIRST_HEADING: f32 = 6.0;
/// Space below a section heading, in points
pub const SPACE_AFTER_HEADING: f32 = 10.0;
/// Default run size, in points
pub const BODY_SIZE: f32 = 11.0;
/// Indent for resume bullets, in inches
pub const BULLET_INDENT: f32 = 0.35;

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    #[must_use]
    pub const fn uniform(inches: f32) -> Self {
        Self {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Text; embedded newlines become line breaks
    pub text: String,
    pub bold: bool,
    /// Point size
    pub size: f32,
    /// RGB hex without `#`
    pub color: &'static str,
}

impl Run {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            size: BODY_SIZE,
            color: colors::TEXT_PRIMARY,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn size(mut self, points: f32) -> Self {
        self.size = points;
        self
    }

    #[must_use]
    pub fn color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    /// Points above the paragraph
    pub space_before: f32,
    /// Points below the paragraph
    pub space_after: f32,
    /// Rendered as a list bullet
    pub bullet: bool,
    /// Left indent in inches
    pub indent: Option<f32>,
    /// Accent-colored rule under the paragraph
    pub rule_below: bool,
}

impl Paragraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bullet() -> Self {
        Self {
            bullet: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Appends highlighted text, one run per segment
    #[must_use]
    pub fn highlighted<S: AsRef<str>>(mut self, text: &str, highlights: &[S]) -> Self {
        self.runs.extend(
            split_highlights(text, highlights)
                .into_iter()
                .map(|Segment { text, bold }| {
                    let run = Run::new(text);
                    if bold { run.bold() } else { run }
                }),
        );
        self
    }

    #[must_use]
    pub fn before(mut self, points: f32) -> Self {
        self.space_before = points;
        self
    }

    #[must_use]
    pub fn after(mut self, points: f32) -> Self {
        self.space_after = points;
        self
    }

    #[must_use]
    pub fn indent(mut self, inches: f32) -> Self {
        self.indent = Some(inches);
        self
    }

    #[must_use]
    pub fn rule_below(mut self) -> Self {
        self.rule_below = true;
        self
    }

    /// Concatenated run text
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A laid-out document ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub margins: Margins,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    #[must_use]
    pub fn new(margins: Margins) -> Self {
        Self {
            margins,
            paragraphs: Vec::new(),
        }
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Adds a section heading; the first heading of a document sits closer
    /// to the header block.
    pub fn heading(&mut self, text: &str, is_first: bool) {
        let before = if is_first {
            SPACE_BEFORE_FIRST_HEADING
        } else {
            SPACE_BEFORE_HEADING
        };
        self.push(
            Paragraph::new()
                .run(Run::new(text).bold().size(12.0).color(colors::ACCENT))
                .before(before)
                .after(SPACE_AFTER_HEADING)
                .rule_below(),
        );
    }

    fn set_last_space_after(&mut self, points: f32) {
        if let Some(last) = self.paragraphs.last_mut() {
            last.space_after = points;
        }
    }

    /// Paragraph texts in order, one per line
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lays out a cover letter. `today` is printed when the job carries no date.
#[must_use]
pub fn cover_letter(candidate: &Candidate, job: &Job, letter: &CoverLetter, today: &str) -> Document {
    let mut doc = Document::new(Margins::uniform(0.75));

    doc.push(
        Paragraph::new()
            .run(Run::new(&candidate.name).bold().size(22.0).color(colors::ACCENT))
            .after(2.0),
    );
    doc.push(
        Paragraph::new()
            .run(
                Run::new(candidate.contact_line())
                    .size(10.0)
                    .color(colors::TEXT_SECONDARY),
            )
            .rule_below()
            .after(20.0),
    );

    let date = job.date.as_deref().unwrap_or(today);
    doc.push(Paragraph::new().run(Run::new(date)).after(16.0));

    let recipient = format!("Hiring Manager\n{}\n{}", job.company, job.location);
    doc.push(Paragraph::new().run(Run::new(recipient.trim())).after(12.0));

    doc.push(
        Paragraph::new()
            .run(Run::new(format!("Re: {}", job.title)).bold())
            .after(16.0),
    );
    doc.push(Paragraph::new().run(Run::new("Dear Hiring Manager,")).after(10.0));
    doc.push(Paragraph::new().run(Run::new(&letter.opening)).after(12.0));

    for (i, section) in letter.sections.iter().enumerate() {
        doc.heading(&section.title, i == 0);

        for paragraph in &section.paragraphs {
            match paragraph {
                LetterParagraph::Labeled {
                    label,
                    text,
                    highlights,
                } => {
                    let mut p = Paragraph::new();
                    if let Some(label) = label.as_deref().filter(|l| !l.is_empty()) {
                        p = p.run(Run::new(format!("{label}: ")).bold());
                    }
                    doc.push(p.highlighted(text, highlights).after(8.0));
                }
                LetterParagraph::Bullets(items) => {
                    for item in items {
                        let p = match item {
                            BulletItem::Labeled { label, text } => Paragraph::bullet()
                                .run(Run::new(format!("{label}: ")).bold())
                                .run(Run::new(text)),
                            BulletItem::Plain(text) => Paragraph::bullet().run(Run::new(text)),
                        };
                        doc.push(p.after(4.0));
                    }
                }
                LetterParagraph::Plain(text) => {
                    doc.push(Paragraph::new().run(Run::new(text)).after(8.0));
                }
            }
        }
    }

    doc.push(Paragraph::new().run(Run::new(letter.closing())).after(20.0));
    doc.push(
        Paragraph::new()
            .run(Run::new(&candidate.name).bold())
            .after(2.0),
    );
    if let Some(title) = letter.signature_title.as_deref().filter(|t| !t.is_empty()) {
        doc.push(
            Paragraph::new().run(Run::new(title).size(10.0).color(colors::TEXT_SECONDARY)),
        );
    }

    doc
}

/// Lays out a resume. Empty sections are left out.
#[must_use]
pub fn resume(candidate: &Candidate, content: &Resume) -> Document {
    let mut doc = Document::new(Margins {
        top: 0.6,
        bottom: 0.5,
        left: 0.7,
        right: 0.7,
    });

    doc.push(
        Paragraph::new()
            .run(Run::new(&candidate.name).bold().size(24.0).color(colors::ACCENT))
            .after(2.0),
    );
    if let Some(title) = candidate.title.as_deref().filter(|t| !t.is_empty()) {
        doc.push(Paragraph::new().run(Run::new(title).bold().size(12.0)).after(4.0));
    }
    doc.push(
        Paragraph::new()
            .run(
                Run::new(candidate.contact_line())
                    .size(10.0)
                    .color(colors::TEXT_SECONDARY),
            )
            .after(8.0),
    );

    let mut first = true;
    let mut heading = |doc: &mut Document, text: &str| {
        doc.heading(text, first);
        first = false;
    };

    if !content.summary.trim().is_empty() {
        heading(&mut doc, "Summary");
        doc.push(Paragraph::new().run(Run::new(&content.summary)).after(6.0));
    }

    if !content.skills.is_empty() {
        heading(&mut doc, "Technical Skills");
        for skill in &content.skills {
            doc.push(
                Paragraph::new()
                    .run(Run::new(format!("{}:", skill.category)).bold())
                    .run(Run::new(format!(" {}", skill.items)))
                    .after(4.0),
            );
        }
        doc.set_last_space_after(6.0);
    }

    if !content.experience.is_empty() {
        heading(&mut doc, "Professional Experience");
        for (idx, position) in content.experience.iter().enumerate() {
            doc.push(
                Paragraph::new()
                    .run(Run::new(&position.title).bold().size(11.0))
                    .before(if idx == 0 { 0.0 } else { 12.0 })
                    .after(1.0),
            );
            doc.push(
                Paragraph::new()
                    .run(Run::new(&position.company).bold().size(10.0))
                    .after(1.0),
            );
            doc.push(
                Paragraph::new()
                    .run(
                        Run::new(&position.dates)
                            .size(10.0)
                            .color(colors::TEXT_SECONDARY),
                    )
                    .after(4.0),
            );

            for bullet in &position.bullets {
                let p = match bullet {
                    Bullet::Highlighted { text, highlights } => {
                        Paragraph::bullet().highlighted(text, highlights)
                    }
                    Bullet::Plain(text) => Paragraph::bullet().run(Run::new(text)),
                };
                doc.push(p.indent(BULLET_INDENT).after(2.0));
            }
        }
    }

    if !content.certifications.is_empty() {
        heading(&mut doc, "Certifications");
        for cert in &content.certifications {
            doc.push(certification(cert));
        }
        doc.set_last_space_after(6.0);
    }

    if !content.education.is_empty() {
        heading(&mut doc, "Education");
        for edu in &content.education {
            doc.push(education(edu));
        }
    }

    doc
}

fn certification(cert: &Certification) -> Paragraph {
    let p = match cert {
        Certification::Plain(name) => Paragraph::bullet().run(Run::new(name)),
        Certification::Detailed { name, .. } => {
            let p = Paragraph::bullet().run(Run::new(name).bold());
            let detail = cert.detail_line();
            if detail.is_empty() {
                p
            } else {
                p.run(Run::new(format!(" - {detail}")))
            }
        }
    };
    p.after(2.0)
}

fn education(edu: &Education) -> Paragraph {
    let p = match edu {
        Education::Plain(text) => Paragraph::new().run(Run::new(text)),
        Education::Detailed {
            degree,
            school,
            year,
        } => {
            let mut tail = String::new();
            if !school.trim().is_empty() {
                tail.push_str(" - ");
                tail.push_str(school.trim());
            }
            let year = year.as_ref().map(Year::to_string).unwrap_or_default();
            if !year.is_empty() {
                tail.push_str(", ");
                tail.push_str(&year);
            }
            let p = Paragraph::new().run(Run::new(degree).bold());
            if tail.is_empty() { p } else { p.run(Run::new(tail)) }
        }
    };
    p.after(4.0)
}
