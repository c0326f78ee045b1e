//! HTML rendering of the resume preview
//!
//! Highlighted runs become `<span class="resume-highlight">` elements. When the
//! active strategy supports region lookup, each span also carries
//! `data-context` and `data-section` so [`crate::dom::DomSurface`] can find it
//! again by that exact pair.

use highlight_core::{RenderedView, Segment};
use shared_types::Issue;

pub const HIGHLIGHT_CLASS: &str = "resume-highlight";
pub const ACTIVE_CLASS: &str = "resume-highlight--active";
pub const EMPHASIS_CLASS: &str = "highlight-emphasis";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Markup for the preview container
pub fn view_html(view: &RenderedView, issues: &[Issue], tag_regions: bool) -> String {
    match view {
        RenderedView::Plain { text } => {
            format!(r#"<div class="resume-text">{}</div>"#, text_html(text))
        }
        RenderedView::Annotated {
            segments,
            active_issue_index,
        } => {
            let body: String = segments
                .iter()
                .map(|segment| segment_html(segment, issues, *active_issue_index, tag_regions))
                .collect();
            format!(
                r#"<div class="resume-text resume-text--annotated">{}</div>"#,
                body
            )
        }
        RenderedView::Degraded {
            text,
            message,
            suggestion,
        } => format!(
            concat!(
                r#"<div class="analysis-error" role="alert">"#,
                r#"<p class="analysis-error__message">{}</p>"#,
                r#"<p class="analysis-error__suggestion">{}</p>"#,
                r#"</div><div class="resume-text">{}</div>"#
            ),
            html_escape(message),
            html_escape(suggestion),
            text_html(text)
        ),
    }
}

/// Unstructured response body, shown verbatim
pub fn raw_html(text: &str) -> String {
    format!(r#"<pre class="raw-result">{}</pre>"#, html_escape(text))
}

fn segment_html(
    segment: &Segment,
    issues: &[Issue],
    active_issue_index: Option<usize>,
    tag_regions: bool,
) -> String {
    let Some(owner) = segment.owner_issue_index.filter(|_| segment.is_highlighted) else {
        return plain_segment_html(segment);
    };

    let mut class = HIGHLIGHT_CLASS.to_string();
    if segment.is_active(active_issue_index) {
        class.push(' ');
        class.push_str(ACTIVE_CLASS);
    }

    let issue = issues.get(owner);
    let mut attrs = format!(r#" class="{}" data-issue-index="{}""#, class, owner);

    if tag_regions {
        if let Some(section) = issue.and_then(Issue::location_id) {
            attrs.push_str(&format!(
                r#" data-context="{}" data-section="{}""#,
                html_escape(&segment.text),
                html_escape(section)
            ));
        }
    }

    if let Some(issue) = issue.filter(|i| !i.issue.is_empty()) {
        attrs.push_str(&format!(r#" title="{}""#, html_escape(&issue.issue)));
    }

    // Highlighted text keeps its line breaks verbatim
    format!("<span{}>{}</span>", attrs, html_escape(&segment.text))
}

fn plain_segment_html(segment: &Segment) -> String {
    segment
        .lines()
        .map(html_escape)
        .collect::<Vec<_>>()
        .join("<br />")
}

fn text_html(text: &str) -> String {
    text.split('\n')
        .map(html_escape)
        .collect::<Vec<_>>()
        .join("<br />")
}
