//! Issue-to-text correlation and highlighting for resume analysis results
//!
//! - [`locator`]: find every issue's verbatim context in the resume text
//! - [`segments`]: partition the text into plain and highlighted runs
//! - [`strategy`]: all-issues vs. active-context highlighting
//! - [`view`]: original/annotated mode, selection and degraded rendering
//! - [`navigation`]: scroll to an issue through a [`navigation::NavigationSurface`]
//! - [`categorize`]: category, severity and section tabs
//!
//! Everything here is synchronous and DOM-free; the browser layer lives in
//! `ats-wasm`.

pub mod categorize;
pub mod config;
pub mod error;
pub mod locator;
pub mod navigation;
pub mod report;
pub mod segments;
pub mod strategy;
pub mod view;

pub use categorize::IssueCategories;
pub use config::HighlightConfig;
pub use error::HighlightError;
pub use locator::{locate, HighlightSpan};
pub use navigation::{
    estimate_scroll_offset, NavigationCoordinator, NavigationOutcome, NavigationSurface,
    RegionLookup, SkipReason,
};
pub use report::{debug_json, suggestions_text, SUGGESTIONS_FILENAME};
pub use segments::{build, Segment};
pub use strategy::{HighlightStrategy, StrategyKind};
pub use view::{IssueList, RenderedView, ViewController, ViewMode, ViewState};
