//! Browser side of issue navigation and file export
//!
//! [`DomSurface`] implements [`NavigationSurface`] against the live preview
//! container. It is created when a scheduled navigation fires, so every lookup
//! sees the DOM as rendered at that moment.

use crate::render::{EMPHASIS_CLASS, HIGHLIGHT_CLASS};
use highlight_core::NavigationSurface;
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Url, Window,
};

/// Per-element counter so only the latest emphasis timer clears the class
const EMPHASIS_TOKEN_ATTR: &str = "data-emphasis-token";

pub struct DomSurface {
    window: Window,
    container: Element,
}

impl DomSurface {
    /// Bind to the preview container with the given element id
    ///
    /// # Errors
    /// Returns JsValue error if the window, document or container is missing
    pub fn new(container_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = document(&window)?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", container_id)))?;

        Ok(Self { window, container })
    }
}

impl NavigationSurface for DomSurface {
    type Region = Element;

    fn find_region_for(&self, context: &str, section_id: &str) -> Option<Element> {
        let nodes = self
            .container
            .query_selector_all(&format!(".{}", HIGHLIGHT_CLASS))
            .ok()?;

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .find(|el| {
                el.get_attribute("data-context").as_deref() == Some(context)
                    && el.get_attribute("data-section").as_deref() == Some(section_id)
            })
    }

    fn scroll_region_into_view(&mut self, region: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        region.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn emphasize_region(&mut self, region: &Element, duration_ms: u32) {
        let token = next_emphasis_token(region);
        if region
            .set_attribute(EMPHASIS_TOKEN_ATTR, &token.to_string())
            .is_err()
            || region.class_list().add_1(EMPHASIS_CLASS).is_err()
        {
            return;
        }

        let target = region.clone();
        let clear = Closure::once_into_js(move || clear_emphasis(&target, token));
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                clear.unchecked_ref(),
                duration_ms as i32,
            );
    }

    fn scroll_to_offset(&mut self, offset_px: f64) {
        let options = ScrollToOptions::new();
        options.set_top(offset_px);
        options.set_behavior(ScrollBehavior::Smooth);
        self.container.scroll_to_with_scroll_to_options(&options);
    }
}

fn next_emphasis_token(region: &Element) -> u64 {
    region
        .get_attribute(EMPHASIS_TOKEN_ATTR)
        .and_then(|token| token.parse::<u64>().ok())
        .map_or(1, |token| token.wrapping_add(1))
}

/// Drop the emphasis class unless the region was emphasized again since `token`
fn clear_emphasis(region: &Element, token: u64) {
    let current = region.get_attribute(EMPHASIS_TOKEN_ATTR);
    if current.as_deref() == Some(token.to_string().as_str()) {
        let _ = region.class_list().remove_1(EMPHASIS_CLASS);
    }
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}

/// Offer `text` as a plain-text file download
pub fn download_text(filename: &str, text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
    let document = document(&window)?;

    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let bag = BlobPropertyBag::new();
    bag.set_type("text/plain");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &bag)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("No body element available"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    Url::revoke_object_url(&url)
}
