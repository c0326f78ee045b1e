//! Tunables for rendering and navigation

use crate::error::HighlightError;
use crate::strategy::StrategyKind;
use crate::view::ViewMode;
use serde::{Deserialize, Serialize};

/// Longest scheduling delay or emphasis duration accepted, in milliseconds
const MAX_DELAY_MS: u32 = 10_000;

/// Configuration for the highlight view and navigation behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightConfig {
    /// Assumed rendered line height used by the scroll estimate
    pub line_height_px: f64,
    /// Space left above an estimated target after scrolling
    pub scroll_margin_px: f64,
    /// How long the emphasis ring stays on a located region
    pub emphasis_duration_ms: u32,
    /// Delay between selection and DOM lookup, so the view can re-render first
    pub settle_delay_ms: u32,
    /// Mode used initially and after reset
    pub default_mode: ViewMode,
    /// Force a strategy instead of deriving it from the analysis variant
    pub strategy: Option<StrategyKind>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_height_px: 24.0,
            scroll_margin_px: 100.0,
            emphasis_duration_ms: 1500,
            settle_delay_ms: 50,
            default_mode: ViewMode::Annotated,
            strategy: None,
        }
    }
}

impl HighlightConfig {
    /// Parse a JSON config; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, HighlightError> {
        let config: HighlightConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HighlightError> {
        if !self.line_height_px.is_finite() || self.line_height_px <= 0.0 {
            return Err(HighlightError::InvalidConfig(format!(
                "lineHeightPx must be positive, got {}",
                self.line_height_px
            )));
        }

        if !self.scroll_margin_px.is_finite() || self.scroll_margin_px < 0.0 {
            return Err(HighlightError::InvalidConfig(format!(
                "scrollMarginPx must not be negative, got {}",
                self.scroll_margin_px
            )));
        }

        if self.settle_delay_ms > MAX_DELAY_MS {
            return Err(HighlightError::InvalidConfig(format!(
                "settleDelayMs {} exceeds {} ms",
                self.settle_delay_ms, MAX_DELAY_MS
            )));
        }

        if self.emphasis_duration_ms > MAX_DELAY_MS {
            return Err(HighlightError::InvalidConfig(format!(
                "emphasisDurationMs {} exceeds {} ms",
                self.emphasis_duration_ms, MAX_DELAY_MS
            )));
        }

        Ok(())
    }
}
