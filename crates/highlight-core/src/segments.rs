//! Partition resume text into plain and highlighted runs

use crate::locator::HighlightSpan;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A contiguous run of resume text.
///
/// Concatenating the `text` of every segment of a view reproduces the resume
/// text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub text: String,
    pub is_highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_issue_index: Option<usize>,
}

impl Segment {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_highlighted: false,
            owner_issue_index: None,
        }
    }

    pub fn highlighted(text: &str, owner_issue_index: usize) -> Self {
        Self {
            text: text.to_string(),
            is_highlighted: true,
            owner_issue_index: Some(owner_issue_index),
        }
    }

    /// Whether this segment is the emphasized highlight for the selection
    pub fn is_active(&self, active_issue_index: Option<usize>) -> bool {
        self.is_highlighted
            && active_issue_index.is_some()
            && self.owner_issue_index == active_issue_index
    }

    /// Text split on line breaks, for renderers that emit explicit breaks.
    /// The stored text is not changed.
    pub fn lines(&self) -> std::str::Split<'_, char> {
        self.text.split('\n')
    }
}

/// Build the ordered segment list for `resume_text` and a resolved span set.
///
/// Expects spans sorted and non-overlapping, as produced by
/// [`crate::locator::locate`]. Spans that break that contract (out of order,
/// overlapping, out of bounds, or off a `char` boundary) are skipped.
pub fn build(resume_text: &str, spans: &[HighlightSpan]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.is_empty()
            || span.start < cursor
            || span.end > resume_text.len()
            || !resume_text.is_char_boundary(span.start)
            || !resume_text.is_char_boundary(span.end)
        {
            warn!(
                start = span.start,
                end = span.end,
                cursor,
                "skipping span outside resolved order"
            );
            continue;
        }

        if span.start > cursor {
            segments.push(Segment::plain(&resume_text[cursor..span.start]));
        }

        segments.push(Segment::highlighted(
            &resume_text[span.start..span.end],
            span.owner_issue_index,
        ));
        cursor = span.end;
    }

    if cursor < resume_text.len() {
        segments.push(Segment::plain(&resume_text[cursor..]));
    }

    segments
}

/// Reassemble the text of a segment list
pub fn concat(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::locate;
    use pretty_assertions::assert_eq;
    use shared_types::Issue;

    #[test]
    fn test_scenario_trailing_highlight() {
        let text = "Experienced engineer. Led team of 5.";
        let segments = build(text, &[HighlightSpan::new(0, 22, 36)]);

        assert_eq!(
            segments,
            vec![
                Segment::plain("Experienced engineer. "),
                Segment::highlighted("Led team of 5.", 0),
            ]
        );
    }

    #[test]
    fn test_no_spans_is_single_plain_segment() {
        let segments = build("Just text\nwith lines", &[]);
        assert_eq!(segments, vec![Segment::plain("Just text\nwith lines")]);
    }

    #[test]
    fn test_empty_text_has_no_segments() {
        assert!(build("", &[]).is_empty());
    }

    #[test]
    fn test_adjacent_spans_have_no_plain_gap() {
        let segments = build(
            "AAAA",
            &[HighlightSpan::new(0, 0, 2), HighlightSpan::new(1, 2, 4)],
        );
        assert_eq!(
            segments,
            vec![Segment::highlighted("AA", 0), Segment::highlighted("AA", 1)]
        );
    }

    #[test]
    fn test_whitespace_and_line_breaks_preserved() {
        let text = "Name\n\n  Skills:\tRust\r\nEnd  ";
        let spans = locate(text, &[Issue::new("Skills", "i", "s", "Rust")]);
        let segments = build(text, &spans);

        assert_eq!(concat(&segments), text);
        assert_eq!(segments[0].text, "Name\n\n  Skills:\t");
    }

    #[test]
    fn test_out_of_order_span_is_skipped() {
        let text = "abcdef";
        let segments = build(
            text,
            &[HighlightSpan::new(0, 3, 5), HighlightSpan::new(1, 0, 2)],
        );

        assert_eq!(concat(&segments), text);
        assert_eq!(segments.iter().filter(|s| s.is_highlighted).count(), 1);
    }

    #[test]
    fn test_out_of_bounds_span_is_skipped() {
        let segments = build("abc", &[HighlightSpan::new(0, 1, 10)]);
        assert_eq!(segments, vec![Segment::plain("abc")]);
    }

    #[test]
    fn test_non_char_boundary_span_is_skipped() {
        // 'é' occupies bytes 1..3
        let segments = build("xéy", &[HighlightSpan::new(0, 2, 3)]);
        assert_eq!(segments, vec![Segment::plain("xéy")]);
    }

    #[test]
    fn test_is_active() {
        let seg = Segment::highlighted("x", 2);
        assert!(seg.is_active(Some(2)));
        assert!(!seg.is_active(Some(1)));
        assert!(!seg.is_active(None));
        assert!(!Segment::plain("x").is_active(None));
    }

    #[test]
    fn test_lines_split_without_mutation() {
        let seg = Segment::plain("a\nb\n");
        let lines: Vec<&str> = seg.lines().collect();
        assert_eq!(lines, vec!["a", "b", ""]);
        assert_eq!(seg.text, "a\nb\n");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&Segment::highlighted("Led", 0)).unwrap();
        assert_eq!(json, r#"{"text":"Led","isHighlighted":true,"ownerIssueIndex":0}"#);

        let json = serde_json::to_string(&Segment::plain("x")).unwrap();
        assert_eq!(json, r#"{"text":"x","isHighlighted":false}"#);
    }
}
