//! Splitting paragraph text into plain and bold segments.

use std::ops::Range;

/// A run of paragraph text and whether it is bolded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
}

impl Segment {
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: true,
        }
    }
}

/// Splits `text` so that each highlight phrase is its own bold segment.
///
/// Highlights are tried longest first and each claims its first occurrence
/// that doesn't overlap a phrase already claimed. Blank highlights are
/// ignored. Joining the segment texts always yields `text` unchanged,
/// regardless of the order highlights are given in.
#[must_use]
pub fn split_highlights<S: AsRef<str>>(text: &str, highlights: &[S]) -> Vec<Segment> {
    let mut phrases: Vec<&str> = highlights
        .iter()
        .map(AsRef::as_ref)
        .filter(|h| !h.trim().is_empty())
        .collect();
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    phrases.dedup();

    let mut claimed: Vec<Range<usize>> = Vec::new();
    for phrase in phrases {
        let free = text
            .match_indices(phrase)
            .map(|(start, m)| start..start + m.len())
            .find(|candidate| !claimed.iter().any(|taken| overlaps(taken, candidate)));
        if let Some(range) = free {
            claimed.push(range);
        }
    }
    claimed.sort_by_key(|range| range.start);

    let mut segments = Vec::with_capacity(claimed.len() * 2 + 1);
    let mut cursor = 0;
    for range in claimed {
        if range.start > cursor {
            segments.push(Segment::plain(&text[cursor..range.start]));
        }
        segments.push(Segment::bold(&text[range.clone()]));
        cursor = range.end;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }

    segments
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
