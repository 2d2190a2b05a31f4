//! Diagram type classification by keyword inspection

use super::model::DiagramType;

/// Keywords checked against the start of the whole body, in priority order
const BODY_KEYWORDS: [(&str, DiagramType); 8] = [
    ("graph", DiagramType::Graph),
    ("flowchart", DiagramType::Flowchart),
    ("sequenceDiagram", DiagramType::Sequence),
    ("erDiagram", DiagramType::Er),
    ("stateDiagram", DiagramType::State),
    ("classDiagram", DiagramType::Class),
    ("gantt", DiagramType::Gantt),
    ("pie", DiagramType::Pie),
];

/// Keywords checked per line when the body start matched nothing
const LINE_KEYWORDS: [(&str, DiagramType); 5] = [
    ("graph", DiagramType::Graph),
    ("flowchart", DiagramType::Flowchart),
    ("sequenceDiagram", DiagramType::Sequence),
    ("erDiagram", DiagramType::Er),
    ("stateDiagram", DiagramType::State),
];

fn match_prefix(text: &str, keywords: &[(&str, DiagramType)]) -> Option<DiagramType> {
    keywords
        .iter()
        .find(|(keyword, _)| text.starts_with(*keyword))
        .map(|(_, kind)| *kind)
}

/// Classify a diagram body.
///
/// The trimmed body start is tested against every known keyword first. If
/// that fails, each trimmed line is tested against the first five keywords
/// only; `classDiagram`, `gantt` and `pie` are recognized at the body start
/// and nowhere else.
pub fn classify(content: &str) -> DiagramType {
    let body = content.trim();

    if let Some(kind) = match_prefix(body, &BODY_KEYWORDS) {
        return kind;
    }

    body.lines()
        .find_map(|line| match_prefix(line.trim(), &LINE_KEYWORDS))
        .unwrap_or(DiagramType::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_start_keywords() {
        assert_eq!(classify("graph TD\n  A-->B"), DiagramType::Graph);
        assert_eq!(classify("flowchart LR\n  C-->D"), DiagramType::Flowchart);
        assert_eq!(classify("sequenceDiagram\n  A->>B: hi"), DiagramType::Sequence);
        assert_eq!(classify("erDiagram\n  A ||--o{ B : has"), DiagramType::Er);
        assert_eq!(classify("stateDiagram-v2\n  [*] --> S"), DiagramType::State);
        assert_eq!(classify("classDiagram\n  A <|-- B"), DiagramType::Class);
        assert_eq!(classify("gantt\n  title Plan"), DiagramType::Gantt);
        assert_eq!(classify("pie title Pets\n  \"Dogs\" : 3"), DiagramType::Pie);
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        assert_eq!(classify("\n\n   gantt\n title x"), DiagramType::Gantt);
    }

    #[test]
    fn test_line_scan_finds_later_keyword() {
        let body = "%% architecture overview\n    sequenceDiagram\n    A->>B: call";
        assert_eq!(classify(body), DiagramType::Sequence);
    }

    #[test]
    fn test_line_scan_first_match_wins() {
        let body = "title\nerDiagram\ngraph TD";
        assert_eq!(classify(body), DiagramType::Er);
    }

    #[test]
    fn test_late_only_keywords_not_found_by_line_scan() {
        assert_eq!(classify("%% chart\nclassDiagram"), DiagramType::Unknown);
        assert_eq!(classify("%% chart\ngantt"), DiagramType::Unknown);
        assert_eq!(classify("%% chart\npie title x"), DiagramType::Unknown);
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        assert_eq!(classify("just some prose"), DiagramType::Unknown);
        assert_eq!(classify(""), DiagramType::Unknown);
    }

    #[test]
    fn test_prefix_match_is_literal() {
        // Any body starting with the keyword text counts
        assert_eq!(classify("graphics pipeline"), DiagramType::Graph);
    }
}
