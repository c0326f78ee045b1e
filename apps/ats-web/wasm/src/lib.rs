use highlight_core::{build, locate};
use shared_types::Issue;
use wasm_bindgen::prelude::*;

// Export modules
pub mod dom;
pub mod render;
pub mod results_panel;

// Re-export commonly used items
pub use dom::{download_text, DomSurface};
pub use render::{html_escape, raw_html, view_html};
pub use results_panel::{ResultsPanel, ScoreSummary};

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"ATS results WASM initialized".into());
}

fn parse_issues(issues_json: &str) -> Result<Vec<Issue>, JsValue> {
    serde_json::from_str(issues_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse issues: {}", e)))
}

/// Resolved highlight spans for `text` and a JSON issue array
#[wasm_bindgen(js_name = locateSpans)]
pub fn locate_spans(text: &str, issues_json: &str) -> Result<JsValue, JsValue> {
    let issues = parse_issues(issues_json)?;
    serde_wasm_bindgen::to_value(&locate(text, &issues))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Annotated segments for `text` and a JSON issue array
#[wasm_bindgen(js_name = buildSegments)]
pub fn build_segments(text: &str, issues_json: &str) -> Result<JsValue, JsValue> {
    let issues = parse_issues(issues_json)?;
    let spans = locate(text, &issues);
    serde_wasm_bindgen::to_value(&build(text, &spans))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
