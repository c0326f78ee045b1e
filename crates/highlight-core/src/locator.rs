//! Snippet location and overlap resolution
//!
//! Every issue carries a `context` string copied verbatim from the resume.
//! [`locate`] finds each occurrence of each context and keeps a candidate only
//! if it does not intersect anything accepted before it. Issues are processed
//! in list order and occurrences left to right, so earlier issues win ties.

use serde::{Deserialize, Serialize};
use shared_types::Issue;
use tracing::{debug, trace};

/// A resolved match of an issue's context inside the resume text.
///
/// Offsets are byte offsets into the text, half-open, on `char` boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSpan {
    pub owner_issue_index: usize,
    pub start: usize,
    pub end: usize,
}

impl HighlightSpan {
    pub fn new(owner_issue_index: usize, start: usize, end: usize) -> Self {
        Self {
            owner_issue_index,
            start,
            end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Half-open range intersection
    pub fn overlaps(&self, other: &HighlightSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Find every non-overlapping occurrence of every issue context.
///
/// Empty contexts and contexts absent from the text contribute nothing.
/// The result is sorted ascending by `start` and pairwise non-overlapping.
pub fn locate(resume_text: &str, issues: &[Issue]) -> Vec<HighlightSpan> {
    let mut accepted: Vec<HighlightSpan> = Vec::new();

    for (index, issue) in issues.iter().enumerate() {
        if !issue.has_context() {
            continue;
        }

        for start in occurrences(resume_text, &issue.context) {
            let candidate = HighlightSpan::new(index, start, start + issue.context.len());

            if let Some(existing) = accepted.iter().find(|span| span.overlaps(&candidate)) {
                trace!(
                    issue = index,
                    start = candidate.start,
                    end = candidate.end,
                    blocked_by = existing.owner_issue_index,
                    "dropping overlapping context match"
                );
                continue;
            }

            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|span| span.start);
    debug!(
        issues = issues.len(),
        spans = accepted.len(),
        "located issue contexts"
    );
    accepted
}

/// Start offsets of every occurrence of `needle`, including overlapping ones.
///
/// After a hit at `p` the scan resumes one character past `p`, not past the
/// end of the hit.
pub fn occurrences<'a>(haystack: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut from = 0;

    std::iter::from_fn(move || {
        if needle.is_empty() || from > haystack.len() {
            return None;
        }

        let start = from + haystack[from..].find(needle)?;
        let step = haystack[start..].chars().next().map_or(1, char::len_utf8);
        from = start + step;
        Some(start)
    })
}

/// Offset of the first occurrence of `context`, if any
pub fn first_occurrence(resume_text: &str, context: &str) -> Option<usize> {
    occurrences(resume_text, context).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn issue(context: &str) -> Issue {
        Issue::new("Experience", "issue", "suggestion", context)
    }

    #[test]
    fn test_single_match() {
        let text = "Experienced engineer. Led team of 5.";
        let spans = locate(text, &[issue("Led team of 5.")]);

        assert_eq!(spans, vec![HighlightSpan::new(0, 22, 36)]);
        assert_eq!(&text[spans[0].start..spans[0].end], "Led team of 5.");
    }

    #[test]
    fn test_empty_context_contributes_nothing() {
        let spans = locate("Some resume text", &[issue("")]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_missing_context_contributes_nothing() {
        let spans = locate("Some resume text", &[issue("not present")]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let spans = locate("", &[issue("anything")]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_first_issue_wins_on_duplicate_context() {
        let spans = locate("AAAA", &[issue("AA"), issue("AA")]);

        assert_eq!(
            spans,
            vec![HighlightSpan::new(0, 0, 2), HighlightSpan::new(0, 2, 4)]
        );
        assert!(spans.iter().all(|s| s.owner_issue_index == 0));
    }

    #[test]
    fn test_overlapping_candidates_within_one_issue() {
        // Candidates at 0, 1 and 2; only 0 survives, 2 overlaps [0,3) too
        let spans = locate("aaaaa", &[issue("aaa")]);
        assert_eq!(spans, vec![HighlightSpan::new(0, 0, 3)]);
    }

    #[test]
    fn test_every_occurrence_is_highlighted() {
        let text = "Python, Java, Python";
        let spans = locate(text, &[issue("Python")]);
        assert_eq!(
            spans,
            vec![HighlightSpan::new(0, 0, 6), HighlightSpan::new(0, 14, 20)]
        );
    }

    #[test]
    fn test_later_issue_partially_overlapping_is_dropped() {
        let text = "Managed budget of $2M";
        let spans = locate(text, &[issue("budget of"), issue("of $2M")]);
        assert_eq!(spans, vec![HighlightSpan::new(0, 8, 17)]);
    }

    #[test]
    fn test_containing_candidate_is_dropped() {
        // The second context strictly contains the first accepted span
        let text = "Led a team of five engineers";
        let spans = locate(text, &[issue("team"), issue("a team of")]);
        assert_eq!(spans, vec![HighlightSpan::new(0, 6, 10)]);
    }

    #[test]
    fn test_output_sorted_by_start() {
        let text = "Skills: Rust. Experience: Acme.";
        let spans = locate(text, &[issue("Acme"), issue("Rust")]);

        assert_eq!(spans[0].owner_issue_index, 1);
        assert_eq!(spans[1].owner_issue_index, 0);
        assert!(spans[0].start < spans[1].start);
    }

    #[test]
    fn test_match_is_exact() {
        let text = "Led Team of 5";
        assert!(locate(text, &[issue("led team of 5")]).is_empty());
        assert!(locate(text, &[issue("Led  Team")]).is_empty());
        assert!(locate(text, &[issue(" Led Team")]).is_empty());
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Café résumé — naïve café";
        let spans = locate(text, &[issue("café")]);

        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "café");
    }

    #[test]
    fn test_occurrences_steps_by_char() {
        let hits: Vec<usize> = occurrences("ééé", "éé").collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_first_occurrence() {
        assert_eq!(first_occurrence("a\nb\nc", "c"), Some(4));
        assert_eq!(first_occurrence("abc", ""), None);
        assert_eq!(first_occurrence("abc", "z"), None);
    }

    #[test]
    fn test_span_overlap_is_half_open() {
        let a = HighlightSpan::new(0, 0, 2);
        let b = HighlightSpan::new(1, 2, 4);
        let c = HighlightSpan::new(1, 1, 3);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }
}
