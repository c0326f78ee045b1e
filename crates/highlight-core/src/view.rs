//! View state for the resume preview
//!
//! [`ViewController`] owns the resume text, the issue list and the
//! `{mode, active issue}` pair. Everything it renders is derived on demand,
//! so replacing the inputs discards all previous spans and segments.

use crate::config::HighlightConfig;
use crate::segments::Segment;
use crate::strategy::{HighlightStrategy, StrategyKind};
use serde::{Deserialize, Serialize};
use shared_types::Issue;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Unmodified resume text
    Plain,
    /// Resume text with issue highlights
    Annotated,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Plain => ViewMode::Annotated,
            ViewMode::Annotated => ViewMode::Plain,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "plain" | "original" => Some(ViewMode::Plain),
            "annotated" | "highlighted" => Some(ViewMode::Annotated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Plain => "plain",
            ViewMode::Annotated => "annotated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub mode: ViewMode,
    pub active_issue_index: Option<usize>,
}

/// What the preview should display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedView {
    Plain {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Annotated {
        segments: Vec<Segment>,
        active_issue_index: Option<usize>,
    },
    /// Upstream analysis failed; plain text plus the failure message
    Degraded {
        text: String,
        message: String,
        suggestion: String,
    },
}

/// What the issue list should display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IssueList<'a> {
    /// Only the upstream failure
    Error(&'a Issue),
    Issues(&'a [Issue]),
}

pub struct ViewController {
    resume_text: String,
    issues: Vec<Issue>,
    strategy: Box<dyn HighlightStrategy>,
    default_mode: ViewMode,
    state: ViewState,
}

impl ViewController {
    pub fn new(strategy: StrategyKind, default_mode: ViewMode) -> Self {
        Self {
            resume_text: String::new(),
            issues: Vec::new(),
            strategy: strategy.into_strategy(),
            default_mode,
            state: ViewState {
                mode: default_mode,
                active_issue_index: None,
            },
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::new(config.strategy.unwrap_or_default(), config.default_mode)
    }

    /// Replace the analyzed text and issues. Selection is cleared; mode is kept.
    pub fn set_result(&mut self, resume_text: &str, issues: Vec<Issue>) {
        self.resume_text = resume_text.to_string();
        self.issues = issues;
        self.state.active_issue_index = None;
        debug!(
            chars = self.resume_text.len(),
            issues = self.issues.len(),
            "view inputs replaced"
        );
    }

    pub fn set_strategy(&mut self, kind: StrategyKind) {
        if self.strategy.kind() != kind {
            self.strategy = kind.into_strategy();
        }
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn supports_region_lookup(&self) -> bool {
        self.strategy.supports_region_lookup()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode
    }

    pub fn active_issue_index(&self) -> Option<usize> {
        self.state.active_issue_index
    }

    pub fn active_issue(&self) -> Option<&Issue> {
        self.state
            .active_issue_index
            .and_then(|index| self.issues.get(index))
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn toggle_mode(&mut self) -> ViewMode {
        self.state.mode = self.state.mode.toggled();
        self.state.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.state.mode = mode;
    }

    /// Select an issue by index. Out-of-range indices leave the state unchanged.
    pub fn select_issue(&mut self, index: usize) -> bool {
        if index >= self.issues.len() {
            warn!(
                index,
                issues = self.issues.len(),
                "ignoring selection outside issue list"
            );
            return false;
        }

        self.state.active_issue_index = Some(index);
        true
    }

    pub fn clear_selection(&mut self) {
        self.state.active_issue_index = None;
    }

    /// Back to the default mode with nothing selected
    pub fn reset(&mut self) {
        self.state = ViewState {
            mode: self.default_mode,
            active_issue_index: None,
        };
    }

    /// Upstream failure carried in the issue list, if any
    pub fn error_issue(&self) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.is_error_sentinel())
    }

    pub fn is_degraded(&self) -> bool {
        self.error_issue().is_some()
    }

    pub fn issue_list(&self) -> IssueList<'_> {
        match self.error_issue() {
            Some(error) => IssueList::Error(error),
            None => IssueList::Issues(&self.issues),
        }
    }

    pub fn render(&self) -> RenderedView {
        if let Some(error) = self.error_issue() {
            return RenderedView::Degraded {
                text: self.resume_text.clone(),
                message: error.issue.clone(),
                suggestion: error.suggestion.clone(),
            };
        }

        match self.state.mode {
            ViewMode::Plain => RenderedView::Plain {
                text: self.resume_text.clone(),
            },
            ViewMode::Annotated => RenderedView::Annotated {
                segments: self.strategy.segments(
                    &self.resume_text,
                    &self.issues,
                    self.state.active_issue_index,
                ),
                active_issue_index: self.state.active_issue_index,
            },
        }
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::from_config(&HighlightConfig::default())
    }
}
