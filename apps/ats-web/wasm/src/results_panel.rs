//! Results panel state exposed to the page
//!
//! Owns the classified response, the view controller and the navigation
//! settings. Every loaded or reset result bumps a generation counter; a
//! navigation timer compares it on firing and does nothing when stale.

use crate::dom::{download_text, DomSurface};
use crate::render::{raw_html, view_html};
use highlight_core::{
    debug_json, suggestions_text, HighlightConfig, HighlightError, IssueCategories, IssueList,
    NavigationCoordinator, RegionLookup, RenderedView, StrategyKind, ViewController, ViewMode,
    SUGGESTIONS_FILENAME,
};
use serde::Serialize;
use shared_types::{AnalysisPayload, AnalysisVariant, Issue, ScoreBand};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum IssueListView<'a> {
    Error {
        issue: &'a Issue,
    },
    #[serde(rename_all = "camelCase")]
    Issues {
        issues: &'a [Issue],
        active_issue_index: Option<usize>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoriesView<'a> {
    #[serde(flatten)]
    categories: &'a IssueCategories<'a>,
    critical: Vec<&'a Issue>,
    default_expanded: Vec<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub score: f64,
    pub band: ScoreBand,
    pub label: &'static str,
}

#[wasm_bindgen]
pub struct ResultsPanel {
    payload: Option<AnalysisPayload>,
    variant: AnalysisVariant,
    view: ViewController,
    config: HighlightConfig,
    generation: Rc<Cell<u64>>,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

impl ResultsPanel {
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            payload: None,
            variant: AnalysisVariant::ScoreCheck,
            view: ViewController::from_config(&config),
            config,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn from_config_json(json: Option<&str>) -> Result<Self, HighlightError> {
        let config = match json {
            Some(json) if !json.trim().is_empty() => HighlightConfig::from_json(json)?,
            _ => HighlightConfig::default(),
        };
        Ok(Self::new(config))
    }

    /// Classify and load a response body. Returns true when it was structured.
    pub fn load_result(&mut self, body: &str, variant: AnalysisVariant) -> bool {
        let payload = AnalysisPayload::from_json_str(body);

        self.variant = variant;
        self.view.set_strategy(
            self.config
                .strategy
                .unwrap_or_else(|| StrategyKind::for_variant(variant)),
        );

        match payload.result() {
            Some(result) => {
                // The failure sentinel is only ever reported in the plain list
                let issues = if result.error_issue().is_some() {
                    result.issues.clone()
                } else {
                    result.display_issues().to_vec()
                };
                self.view.set_result(&result.resume_text, issues);
            }
            None => self.view.set_result("", Vec::new()),
        }

        let structured = payload.is_structured();
        self.payload = Some(payload);
        self.bump_generation();
        structured
    }

    /// Load a response for a request described by its form inputs
    pub fn load_request_result(
        &mut self,
        body: &str,
        has_job_description: bool,
        enhanced: bool,
    ) -> bool {
        self.load_result(body, AnalysisVariant::from_flags(has_job_description, enhanced))
    }

    pub fn variant(&self) -> AnalysisVariant {
        self.variant
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn select_issue(&mut self, index: usize) -> bool {
        self.view.select_issue(index)
    }

    /// Drop the loaded result and return to the default view
    pub fn reset(&mut self) {
        self.payload = None;
        self.view.set_result("", Vec::new());
        self.view.reset();
        self.bump_generation();
    }

    pub fn rendered_view(&self) -> RenderedView {
        self.view.render()
    }

    pub fn rendered_html(&self) -> String {
        match &self.payload {
            None => String::new(),
            Some(AnalysisPayload::Unstructured(text)) => raw_html(text),
            Some(AnalysisPayload::Structured(_)) => view_html(
                &self.view.render(),
                self.view.issues(),
                self.view.supports_region_lookup(),
            ),
        }
    }

    pub fn issue_list_json(&self) -> Result<String, HighlightError> {
        let list = match self.view.issue_list() {
            IssueList::Error(issue) => IssueListView::Error { issue },
            IssueList::Issues(issues) => IssueListView::Issues {
                issues,
                active_issue_index: self.view.active_issue_index(),
            },
        };
        Ok(serde_json::to_string(&list)?)
    }

    pub fn categories_json(&self) -> Result<Option<String>, HighlightError> {
        let Some(result) = self.payload.as_ref().and_then(AnalysisPayload::result) else {
            return Ok(None);
        };

        let categories = IssueCategories::project(result);
        let view = CategoriesView {
            categories: &categories,
            critical: categories.critical(),
            default_expanded: categories.default_expanded(),
        };
        Ok(Some(serde_json::to_string(&view)?))
    }

    pub fn score_summary(&self) -> Option<ScoreSummary> {
        let result = self.payload.as_ref()?.result()?;
        let band = result.score_band();
        Some(ScoreSummary {
            score: result.score,
            band,
            label: band.label(),
        })
    }

    pub fn raw_payload(&self) -> Option<&str> {
        self.payload.as_ref()?.raw_text()
    }

    pub fn suggestions_text(&self) -> String {
        match self.view.issue_list() {
            IssueList::Issues(issues) => suggestions_text(issues),
            IssueList::Error(_) => String::new(),
        }
    }

    pub fn debug_json(&self) -> Result<Option<String>, HighlightError> {
        self.payload
            .as_ref()
            .and_then(AnalysisPayload::result)
            .map(debug_json)
            .transpose()
    }

    fn bump_generation(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    /// Run navigation for the active issue once the view has re-rendered
    fn schedule_navigation(&self, container_id: String) -> Result<(), JsValue> {
        let Some(issue) = self.view.active_issue().cloned() else {
            return Ok(());
        };

        let resume_text = self.view.resume_text().to_string();
        let lookup = RegionLookup::from_support(self.view.supports_region_lookup());
        let coordinator = NavigationCoordinator::new(&self.config);
        let generation = Rc::clone(&self.generation);
        let scheduled_for = generation.get();

        let navigate = Closure::once_into_js(move || {
            if generation.get() != scheduled_for {
                return;
            }
            match DomSurface::new(&container_id) {
                Ok(mut surface) => {
                    coordinator.navigate_to(&issue, &resume_text, lookup, &mut surface);
                }
                Err(e) => web_sys::console::warn_1(&e),
            }
        });

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            navigate.unchecked_ref(),
            self.config.settle_delay_ms as i32,
        )?;
        Ok(())
    }
}

fn to_js_error(e: HighlightError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// WASM bindings
#[wasm_bindgen]
impl ResultsPanel {
    #[wasm_bindgen(constructor)]
    pub fn new_wasm(config_json: Option<String>) -> Result<ResultsPanel, JsValue> {
        Self::from_config_json(config_json.as_deref()).map_err(to_js_error)
    }

    /// Load a score-check response
    #[wasm_bindgen(js_name = loadResult)]
    pub fn load_result_wasm(&mut self, body: &str) -> bool {
        self.load_result_with_variant_wasm(body, "score-check")
            .unwrap_or(false)
    }

    /// Load a response from one of the four analysis endpoints
    #[wasm_bindgen(js_name = loadResultWithVariant)]
    pub fn load_result_with_variant_wasm(
        &mut self,
        body: &str,
        variant: &str,
    ) -> Result<bool, JsValue> {
        let variant = AnalysisVariant::parse(variant)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown analysis variant: {}", variant)))?;

        let structured = self.load_result(body, variant);
        web_sys::console::log_1(
            &format!(
                "Loaded {} result ({} issues, structured: {})",
                variant.endpoint(),
                self.view.issues().len(),
                structured
            )
            .into(),
        );
        Ok(structured)
    }

    /// Load a response given whether a job description was sent and enhanced mode was on
    #[wasm_bindgen(js_name = loadResultForRequest)]
    pub fn load_result_for_request_wasm(
        &mut self,
        body: &str,
        has_job_description: bool,
        enhanced: bool,
    ) -> bool {
        let structured = self.load_request_result(body, has_job_description, enhanced);
        web_sys::console::log_1(
            &format!(
                "Loaded {} result ({} issues, structured: {})",
                self.variant.endpoint(),
                self.view.issues().len(),
                structured
            )
            .into(),
        );
        structured
    }

    /// Flip between the original and annotated view; returns the new mode
    #[wasm_bindgen(js_name = toggleMode)]
    pub fn toggle_mode_wasm(&mut self) -> String {
        self.view.toggle_mode().as_str().to_string()
    }

    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode_wasm(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = ViewMode::parse(mode)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown view mode: {}", mode)))?;
        self.view.set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = getMode)]
    pub fn get_mode(&self) -> String {
        self.view.mode().as_str().to_string()
    }

    /// Select an issue and, when a container id is given, scroll the preview
    /// to it after the settle delay
    #[wasm_bindgen(js_name = selectIssue)]
    pub fn select_issue_wasm(&mut self, index: usize, container_id: Option<String>) -> bool {
        if !self.select_issue(index) {
            return false;
        }

        if let Some(container_id) = container_id {
            if let Err(e) = self.schedule_navigation(container_id) {
                web_sys::console::warn_1(&e);
            }
        }
        true
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection_wasm(&mut self) {
        self.view.clear_selection();
    }

    #[wasm_bindgen(js_name = reset)]
    pub fn reset_wasm(&mut self) {
        self.reset();
        web_sys::console::log_1(&"Results panel reset".into());
    }

    #[wasm_bindgen(js_name = getActiveIssueIndex)]
    pub fn get_active_issue_index(&self) -> Option<usize> {
        self.view.active_issue_index()
    }

    #[wasm_bindgen(js_name = isDegraded)]
    pub fn is_degraded(&self) -> bool {
        self.view.is_degraded()
    }

    #[wasm_bindgen(js_name = getRenderedHtml)]
    pub fn get_rendered_html(&self) -> String {
        self.rendered_html()
    }

    #[wasm_bindgen(js_name = getRenderedJson)]
    pub fn get_rendered_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.rendered_view())
            .map_err(|e| to_js_error(HighlightError::from(e)))
    }

    #[wasm_bindgen(js_name = getIssueListJson)]
    pub fn get_issue_list_json(&self) -> Result<String, JsValue> {
        self.issue_list_json().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = getCategoriesJson)]
    pub fn get_categories_json(&self) -> Result<Option<String>, JsValue> {
        self.categories_json().map_err(to_js_error)
    }

    /// `{score, band, label}`, or undefined before a structured result
    #[wasm_bindgen(js_name = getScoreBand)]
    pub fn get_score_band(&self) -> Result<JsValue, JsValue> {
        match self.score_summary() {
            Some(summary) => serde_wasm_bindgen::to_value(&summary)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = getRawPayload)]
    pub fn get_raw_payload(&self) -> Option<String> {
        self.raw_payload().map(str::to_string)
    }

    #[wasm_bindgen(js_name = getSuggestionsText)]
    pub fn get_suggestions_text(&self) -> String {
        self.suggestions_text()
    }

    #[wasm_bindgen(js_name = downloadSuggestions)]
    pub fn download_suggestions(&self) -> Result<(), JsValue> {
        download_text(SUGGESTIONS_FILENAME, &self.suggestions_text())
    }

    #[wasm_bindgen(js_name = getDebugJson)]
    pub fn get_debug_json(&self) -> Result<Option<String>, JsValue> {
        self.debug_json().map_err(to_js_error)
    }
}
