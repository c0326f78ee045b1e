//! Jump-to-issue navigation
//!
//! Selecting an issue scrolls the resume preview to its context. The lookup
//! and scrolling are done by a [`NavigationSurface`] supplied by the
//! presentation layer, so this module runs without a DOM.
//!
//! ## Strategy
//!
//! 1. Composite lookup: find the rendered region tagged with the issue's exact
//!    context *and* section identity, scroll it to the center, emphasize it.
//! 2. Estimate: count line breaks before the first occurrence of the context
//!    and scroll to `lines * line_height - margin`. Wrapped lines are not
//!    accounted for, so this is approximate.

use crate::config::HighlightConfig;
use crate::locator::first_occurrence;
use serde::{Deserialize, Serialize};
use shared_types::Issue;
use tracing::debug;

/// Presentation-layer adapter for locating and scrolling rendered regions
pub trait NavigationSurface {
    /// Opaque handle to a rendered region
    type Region;

    /// Region tagged with exactly this context and section identity
    fn find_region_for(&self, context: &str, section_id: &str) -> Option<Self::Region>;

    /// Smooth-scroll so the region is centered in the viewport
    fn scroll_region_into_view(&mut self, region: &Self::Region);

    /// Apply a transient emphasis ring, removed after `duration_ms`
    fn emphasize_region(&mut self, region: &Self::Region, duration_ms: u32);

    /// Smooth-scroll the preview container to a vertical offset
    fn scroll_to_offset(&mut self, offset_px: f64);
}

/// Whether the current rendering tags regions for composite lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionLookup {
    Composite,
    Unavailable,
}

impl RegionLookup {
    pub fn from_support(supported: bool) -> Self {
        if supported {
            RegionLookup::Composite
        } else {
            RegionLookup::Unavailable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    MissingContext,
    MissingLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum NavigationOutcome {
    /// Nothing to navigate to; no side effects
    Skipped { reason: SkipReason },
    /// Composite lookup found the region
    ScrolledToRegion,
    /// Fell back to the line-count estimate
    #[serde(rename_all = "camelCase")]
    ScrolledToEstimate { offset_px: f64 },
    /// Context does not occur in the text
    NotFound,
}

/// Estimated scroll offset for the first occurrence of `context`.
///
/// `max(0, newlines_before_match * line_height_px - margin_px)`, or `None`
/// when the context is empty or absent.
pub fn estimate_scroll_offset(
    resume_text: &str,
    context: &str,
    line_height_px: f64,
    margin_px: f64,
) -> Option<f64> {
    let start = first_occurrence(resume_text, context)?;
    let lines_before = resume_text[..start].matches('\n').count();
    Some((lines_before as f64 * line_height_px - margin_px).max(0.0))
}

#[derive(Debug, Clone)]
pub struct NavigationCoordinator {
    line_height_px: f64,
    scroll_margin_px: f64,
    emphasis_duration_ms: u32,
}

impl NavigationCoordinator {
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            line_height_px: config.line_height_px,
            scroll_margin_px: config.scroll_margin_px,
            emphasis_duration_ms: config.emphasis_duration_ms,
        }
    }

    /// Scroll the preview to `issue`'s context.
    ///
    /// Issues without a context or a section identity are skipped.
    pub fn navigate_to<S: NavigationSurface>(
        &self,
        issue: &Issue,
        resume_text: &str,
        lookup: RegionLookup,
        surface: &mut S,
    ) -> NavigationOutcome {
        let outcome = self.resolve(issue, resume_text, lookup, surface);
        debug!(section = %issue.section, ?lookup, ?outcome, "issue navigation");
        outcome
    }

    fn resolve<S: NavigationSurface>(
        &self,
        issue: &Issue,
        resume_text: &str,
        lookup: RegionLookup,
        surface: &mut S,
    ) -> NavigationOutcome {
        if !issue.has_context() {
            return NavigationOutcome::Skipped {
                reason: SkipReason::MissingContext,
            };
        }

        let Some(section_id) = issue.location_id() else {
            return NavigationOutcome::Skipped {
                reason: SkipReason::MissingLocation,
            };
        };

        if lookup == RegionLookup::Composite {
            if let Some(region) = surface.find_region_for(&issue.context, section_id) {
                surface.scroll_region_into_view(&region);
                surface.emphasize_region(&region, self.emphasis_duration_ms);
                return NavigationOutcome::ScrolledToRegion;
            }
        }

        match estimate_scroll_offset(
            resume_text,
            &issue.context,
            self.line_height_px,
            self.scroll_margin_px,
        ) {
            Some(offset_px) => {
                surface.scroll_to_offset(offset_px);
                NavigationOutcome::ScrolledToEstimate { offset_px }
            }
            None => NavigationOutcome::NotFound,
        }
    }
}

impl Default for NavigationCoordinator {
    fn default() -> Self {
        Self::new(&HighlightConfig::default())
    }
}
