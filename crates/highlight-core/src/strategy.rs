//! Highlight strategies
//!
//! Two ways to turn resume text and issues into segments:
//!
//! | Strategy | Highlights | Region lookup |
//! |----------|------------|---------------|
//! | [`AllIssuesStrategy`] | every issue at once, first match wins on overlap | composite (context + section) |
//! | [`ActiveContextStrategy`] | only the selected issue, every occurrence | unavailable, scroll estimate only |
//!
//! The score-check surface uses the first; job-match and enhanced surfaces
//! use the second. Callers pick one through [`StrategyKind`].

use crate::locator::locate;
use crate::segments::{build, Segment};
use serde::{Deserialize, Serialize};
use shared_types::{AnalysisVariant, Issue};

/// Produces the annotated segment list for a view
pub trait HighlightStrategy {
    /// Strategy identifier
    fn kind(&self) -> StrategyKind;

    /// Segments for the annotated view
    fn segments(
        &self,
        resume_text: &str,
        issues: &[Issue],
        active_issue_index: Option<usize>,
    ) -> Vec<Segment>;

    /// Whether rendered highlights can be found by (context, section) key
    fn supports_region_lookup(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    AllIssues,
    ActiveContext,
}

impl StrategyKind {
    /// Strategy each analysis surface uses
    pub fn for_variant(variant: AnalysisVariant) -> Self {
        if variant.tracks_single_context() {
            StrategyKind::ActiveContext
        } else {
            StrategyKind::AllIssues
        }
    }

    pub fn into_strategy(self) -> Box<dyn HighlightStrategy> {
        match self {
            StrategyKind::AllIssues => Box::new(AllIssuesStrategy),
            StrategyKind::ActiveContext => Box::new(ActiveContextStrategy),
        }
    }
}

#[allow(clippy::derivable_impls)]
impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::AllIssues
    }
}

/// Highlight every issue's context, resolving overlaps by first match
#[derive(Debug, Clone, Copy, Default)]
pub struct AllIssuesStrategy;

impl HighlightStrategy for AllIssuesStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AllIssues
    }

    fn segments(
        &self,
        resume_text: &str,
        issues: &[Issue],
        _active_issue_index: Option<usize>,
    ) -> Vec<Segment> {
        build(resume_text, &locate(resume_text, issues))
    }

    fn supports_region_lookup(&self) -> bool {
        true
    }
}

/// Highlight every occurrence of the selected issue's context only
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveContextStrategy;

impl HighlightStrategy for ActiveContextStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ActiveContext
    }

    fn segments(
        &self,
        resume_text: &str,
        issues: &[Issue],
        active_issue_index: Option<usize>,
    ) -> Vec<Segment> {
        let active = active_issue_index.and_then(|index| Some((index, issues.get(index)?)));

        match active {
            Some((index, issue)) if issue.has_context() => {
                split_on_context(resume_text, &issue.context, index)
            }
            _ => whole_text(resume_text),
        }
    }

    fn supports_region_lookup(&self) -> bool {
        false
    }
}

/// Split on `context` and re-join with a highlighted unit between each pair
/// of adjacent parts
fn split_on_context(resume_text: &str, context: &str, owner: usize) -> Vec<Segment> {
    let mut segments = Vec::new();

    for (i, part) in resume_text.split(context).enumerate() {
        if i > 0 {
            segments.push(Segment::highlighted(context, owner));
        }
        if !part.is_empty() {
            segments.push(Segment::plain(part));
        }
    }

    segments
}

fn whole_text(resume_text: &str) -> Vec<Segment> {
    if resume_text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::plain(resume_text)]
    }
}
