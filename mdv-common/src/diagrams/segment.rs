//! Section segmenter
//!
//! Splits raw file text into ordered `(number, title, body)` triples using
//! three strategies of decreasing strictness:
//!
//! 1. **Strict**: `N. Title` at file start or after a newline, followed by a
//!    blank line. Titles may span lines but stop at the first blank line.
//! 2. **Loose**: every line that is entirely `N. Title`. Runs only when the
//!    strict pattern found no markers at all.
//! 3. **Paragraph**: split on blank lines and accumulate paragraphs under the
//!    last paragraph that opened with `N. Title`. Runs only when the marker
//!    stages produced no sections.
//!
//! Marker stages take the body from the end of one marker to the start of the
//! next (or end of text) and remove every blank line from it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

static STRICT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\n|^)([0-9]+)\.\s+(.+?)\n\n").expect("strict marker pattern"));

static LOOSE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([0-9]+)\.\s+(.+?)$").expect("loose marker pattern"));

static PARAGRAPH_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s+").expect("paragraph start pattern"));

static PARAGRAPH_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([0-9]+)\.\s+(.+)$").expect("paragraph title pattern"));

static LINE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.\s+(.+)$").expect("line title pattern"));

/// A section as cut from the source, before ids and types are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    pub number: i64,
    pub title: String,
    pub body: String,
}

/// Which stage of the cascade produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Strict,
    Loose,
    Paragraph,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Strict => "strict",
            Strategy::Loose => "loose",
            Strategy::Paragraph => "paragraph",
        };
        f.write_str(name)
    }
}

/// Output of a single stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutput {
    /// Markers the stage recognized, including ones with empty bodies
    pub markers: usize,
    pub sections: Vec<RawSection>,
}

/// Result of the whole cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Stage that produced `sections`; `None` when every stage came up empty
    pub strategy: Option<Strategy>,
    pub sections: Vec<RawSection>,
}

impl Segmentation {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Run the cascade against `text`
pub fn segment(text: &str) -> Segmentation {
    let strict_out = strict(text);
    debug!(
        markers = strict_out.markers,
        sections = strict_out.sections.len(),
        "Strict segmentation finished"
    );
    if !strict_out.sections.is_empty() {
        return Segmentation {
            strategy: Some(Strategy::Strict),
            sections: strict_out.sections,
        };
    }

    if strict_out.markers == 0 {
        let loose_out = loose(text);
        debug!(
            markers = loose_out.markers,
            sections = loose_out.sections.len(),
            "Loose segmentation finished"
        );
        if !loose_out.sections.is_empty() {
            return Segmentation {
                strategy: Some(Strategy::Loose),
                sections: loose_out.sections,
            };
        }
    }

    let paragraph_out = paragraph(text);
    debug!(
        markers = paragraph_out.markers,
        sections = paragraph_out.sections.len(),
        "Paragraph segmentation finished"
    );
    if !paragraph_out.sections.is_empty() {
        return Segmentation {
            strategy: Some(Strategy::Paragraph),
            sections: paragraph_out.sections,
        };
    }

    Segmentation {
        strategy: None,
        sections: Vec::new(),
    }
}

/// Stage 1: numbered heading followed by a blank line
pub fn strict(text: &str) -> StageOutput {
    sections_between_markers(text, &STRICT_MARKER, 2, 3)
}

/// Stage 2: any line that is a complete numbered heading
pub fn loose(text: &str) -> StageOutput {
    sections_between_markers(text, &LOOSE_MARKER, 1, 2)
}

/// Stage 3: paragraph accumulation under numbered paragraphs
pub fn paragraph(text: &str) -> StageOutput {
    let mut output = StageOutput::default();
    let mut open: Option<OpenSection> = None;

    for para in text.trim().split("\n\n") {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }

        if PARAGRAPH_START.is_match(para) {
            output.markers += 1;
            if let Some(done) = open.take() {
                done.flush_into(&mut output.sections);
            }
            open = open_paragraph_section(para);
        } else if let Some(current) = open.as_mut() {
            current.parts.push(para.to_string());
        }
    }

    if let Some(done) = open.take() {
        done.flush_into(&mut output.sections);
    }

    output
}

/// Keep every non-blank line of the trimmed body, joined with single newlines
pub fn normalize_body(raw: &str) -> String {
    raw.trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn sections_between_markers(
    text: &str,
    pattern: &Regex,
    number_group: usize,
    title_group: usize,
) -> StageOutput {
    let markers: Vec<Captures<'_>> = pattern.captures_iter(text).collect();
    let mut sections = Vec::new();

    for (i, caps) in markers.iter().enumerate() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let body_end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|next| next.start())
            .unwrap_or(text.len());

        let body = normalize_body(&text[whole.end()..body_end]);
        if body.is_empty() {
            continue;
        }

        let Some(number) = parse_number(&caps[number_group]) else {
            continue;
        };

        sections.push(RawSection {
            number,
            title: caps[title_group].trim().to_string(),
            body,
        });
    }

    StageOutput {
        markers: markers.len(),
        sections,
    }
}

fn parse_number(digits: &str) -> Option<i64> {
    match digits.parse::<i64>() {
        Ok(number) => Some(number),
        Err(e) => {
            warn!("Skipping section with unusable number {:?}: {}", digits, e);
            None
        }
    }
}

/// Section being accumulated by the paragraph stage
struct OpenSection {
    number: i64,
    title: String,
    parts: Vec<String>,
}

impl OpenSection {
    fn flush_into(self, sections: &mut Vec<RawSection>) {
        if self.parts.is_empty() {
            return;
        }
        let body = self.parts.join("\n");
        if body.trim().is_empty() {
            return;
        }
        sections.push(RawSection {
            number: self.number,
            title: self.title,
            body,
        });
    }
}

/// Start a section from a paragraph that begins with a numbered heading.
///
/// The whole paragraph after the number is normally the title. If that split
/// fails, only the first line is the heading and the rest seeds the body.
fn open_paragraph_section(para: &str) -> Option<OpenSection> {
    if let Some(caps) = PARAGRAPH_TITLE.captures(para) {
        if let Some(number) = parse_number(&caps[1]) {
            return Some(OpenSection {
                number,
                title: caps[2].trim().to_string(),
                parts: Vec::new(),
            });
        }
    }

    // Only reached when the number overflows; kept so a heading paragraph
    // whose full split fails still opens from its first line.
    let mut lines = para.split('\n');
    let first = lines.next()?;
    let caps = LINE_TITLE.captures(first)?;
    let number = parse_number(&caps[1])?;
    Some(OpenSection {
        number,
        title: caps[2].trim().to_string(),
        parts: lines.map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(number: i64, title: &str, body: &str) -> RawSection {
        RawSection {
            number,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_strict_two_sections() {
        let text = "1. Foo\n\ngraph TD\n  A-->B\n\n2. Bar\n\nflowchart LR\n  C-->D\n";
        let out = strict(text);
        assert_eq!(out.markers, 2);
        assert_eq!(
            out.sections,
            vec![
                section(1, "Foo", "graph TD\n  A-->B"),
                section(2, "Bar", "flowchart LR\n  C-->D"),
            ]
        );
    }

    #[test]
    fn test_strict_removes_inner_blank_lines() {
        let text = "3. Flow\n\ngraph LR\n\n    A --> B\n   \n    B --> C\n\n";
        let out = strict(text);
        assert_eq!(out.sections, vec![section(3, "Flow", "graph LR\n    A --> B\n    B --> C")]);
    }

    #[test]
    fn test_strict_marker_after_preamble() {
        let text = "Reference diagrams\n5. Late Start\n\nerDiagram\n  A ||--o{ B : has";
        let out = strict(text);
        assert_eq!(out.sections, vec![section(5, "Late Start", "erDiagram\n  A ||--o{ B : has")]);
    }

    #[test]
    fn test_strict_numbers_kept_verbatim() {
        let text = "7. A\n\ngraph TD\n\n7. B\n\npie\n\n2. C\n\ngantt\n";
        let numbers: Vec<i64> = strict(text).sections.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![7, 7, 2]);
    }

    #[test]
    fn test_strict_empty_body_suppressed() {
        let text = "1. Empty\n\n   \n\n\n2. Full\n\ngraph TD\n  A-->B\n";
        let out = strict(text);
        assert_eq!(out.markers, 2);
        assert_eq!(out.sections, vec![section(2, "Full", "graph TD\n  A-->B")]);
    }

    #[test]
    fn test_strict_title_stops_at_blank_line() {
        let text = "1. Multi\nline title\n\ngraph TD\n";
        let out = strict(text);
        assert_eq!(out.sections, vec![section(1, "Multi\nline title", "graph TD")]);
    }

    #[test]
    fn test_loose_without_blank_lines() {
        let text = "1. Foo\ngraph TD\n  A-->B\n2. Bar\nsequenceDiagram\n  A->>B: hi\n";
        assert_eq!(strict(text).markers, 0);
        let out = loose(text);
        assert_eq!(out.markers, 2);
        assert_eq!(
            out.sections,
            vec![
                section(1, "Foo", "graph TD\n  A-->B"),
                section(2, "Bar", "sequenceDiagram\n  A->>B: hi"),
            ]
        );
    }

    #[test]
    fn test_loose_body_normalized_like_strict() {
        // Loose bodies get the same blank-line stripping as strict ones
        let text = "1. Spaced\ngraph TD\n\n   \n  A-->B";
        let out = loose(text);
        assert_eq!(out.sections, vec![section(1, "Spaced", "graph TD\n  A-->B")]);
    }

    #[test]
    fn test_paragraph_accumulates_until_next_marker() {
        let text = "1. First\n\ngraph TD\n  A-->B\n\n  C-->D\n\n2. Second\n\npie\n";
        let out = paragraph(text);
        assert_eq!(out.markers, 2);
        assert_eq!(
            out.sections,
            vec![
                section(1, "First", "graph TD\n  A-->B\nC-->D"),
                section(2, "Second", "pie"),
            ]
        );
    }

    #[test]
    fn test_paragraph_title_takes_whole_paragraph() {
        let text = "1. Title\ngraph TD\n  A-->B";
        let out = paragraph(text);
        assert_eq!(out.markers, 1);
        assert!(out.sections.is_empty());
    }

    #[test]
    fn test_paragraph_ignores_text_before_first_marker() {
        let text = "preamble\n\n4. Only\n\nstateDiagram\n";
        let out = paragraph(text);
        assert_eq!(out.sections, vec![section(4, "Only", "stateDiagram")]);
    }

    #[test]
    fn test_open_paragraph_section_title() {
        let open = open_paragraph_section("12. Heading").unwrap();
        assert_eq!(open.number, 12);
        assert_eq!(open.title, "Heading");
        assert!(open.parts.is_empty());
    }

    #[test]
    fn test_open_paragraph_section_unusable_number() {
        assert!(open_paragraph_section("99999999999999999999. Huge\ngraph TD").is_none());
    }

    #[test]
    fn test_blank_title_kept_as_empty() {
        let text = "1. \t\n\ngraph TD\n";
        let out = strict(text);
        assert_eq!(out.sections, vec![section(1, "", "graph TD")]);
    }

    #[test]
    fn test_flush_suppresses_blank_content() {
        let mut sections = Vec::new();
        OpenSection {
            number: 1,
            title: "Blank".to_string(),
            parts: vec!["   ".to_string(), String::new()],
        }
        .flush_into(&mut sections);
        assert!(sections.is_empty());
    }

    #[test]
    fn test_segment_prefers_strict() {
        let text = "1. Foo\n\ngraph TD\n  A-->B\n";
        let result = segment(text);
        assert_eq!(result.strategy, Some(Strategy::Strict));
        assert_eq!(result.sections.len(), 1);
    }

    #[test]
    fn test_segment_falls_back_to_loose() {
        let text = "1. Foo\ngraph TD\n";
        let result = segment(text);
        assert_eq!(result.strategy, Some(Strategy::Loose));
        assert_eq!(result.sections, vec![section(1, "Foo", "graph TD")]);
    }

    #[test]
    fn test_segment_falls_back_to_paragraph() {
        // Indented heading: neither anchored marker pattern matches
        let text = " \n 5. Multi\nline\n\nflowchart LR\n";
        let result = segment(text);
        assert_eq!(result.strategy, Some(Strategy::Paragraph));
        assert_eq!(result.sections, vec![section(5, "Multi\nline", "flowchart LR")]);
    }

    #[test]
    fn test_segment_skips_loose_when_strict_saw_markers() {
        // Strict recognizes the heading but its body is empty
        let text = "1. Lonely\n\n";
        let result = segment(text);
        assert_eq!(result.strategy, None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_segment_nothing_found() {
        let result = segment("no numbered headings here\njust text");
        assert_eq!(result.strategy, None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_oversized_number_is_skipped() {
        let text = "99999999999999999999. Huge\n\ngraph TD\n\n2. Fine\n\npie\n";
        let out = strict(text);
        assert_eq!(out.markers, 2);
        assert_eq!(out.sections, vec![section(2, "Fine", "pie")]);
    }

    #[test]
    fn test_normalize_body() {
        assert_eq!(normalize_body("\n\n  graph TD\n\n  A-->B  \n\n"), "graph TD\n  A-->B");
        assert_eq!(normalize_body(" \n \n"), "");
    }
}
