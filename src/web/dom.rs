//! DOM Bindings
//!
//! web-sys implementations of the list, button and parser seams, plus the
//! click listener guard.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{DomParser, Element, HtmlButtonElement, MouseEvent, SupportedType};

use crate::config::{BUTTON_SPINNER, BUTTON_TEXT, HIDDEN_CLASS, PRODUCT_CONTAINER};
use crate::state::ButtonState;
use crate::traits::{ButtonView, FragmentParser, ProductList};

/// Element the fetched product nodes are moved into
pub struct DomList {
    wrapper: Element,
}

impl DomList {
    pub fn new(wrapper: Element) -> Self {
        Self { wrapper }
    }
}

impl ProductList<Element> for DomList {
    fn append(&self, fragment: Element) {
        if let Err(e) = self.wrapper.append_child(&fragment) {
            log::warn!("append failed: {:?}", e);
        }
    }

    fn prepend(&self, fragment: Element) {
        if let Err(e) = self.wrapper.prepend_with_node_1(&fragment) {
            log::warn!("prepend failed: {:?}", e);
        }
    }
}

/// Load button with its label and spinner children
pub struct DomButton {
    button: Element,
    text: Option<Element>,
    spinner: Option<Element>,
}

impl DomButton {
    pub fn new(button: Element) -> Self {
        let text = button.query_selector(BUTTON_TEXT).ok().flatten();
        let spinner = button.query_selector(BUTTON_SPINNER).ok().flatten();
        Self { button, text, spinner }
    }
}

fn toggle_hidden(element: &Element, hidden: bool) {
    let _ = element.class_list().toggle_with_force(HIDDEN_CLASS, hidden);
}

impl ButtonView for DomButton {
    fn present(&self, state: ButtonState) {
        if let Some(text) = &self.text {
            toggle_hidden(text, state.showing_spinner);
        }
        if let Some(spinner) = &self.spinner {
            toggle_hidden(spinner, !state.showing_spinner);
        }
        match self.button.dyn_ref::<HtmlButtonElement>() {
            Some(button) => button.set_disabled(state.disabled),
            None => {
                let _ = self.button.toggle_attribute_with_force("disabled", state.disabled);
            }
        }
        toggle_hidden(&self.button, !state.visible);
    }
}

/// Extracts product containers from a fetched page with `DOMParser`
pub struct HtmlFragmentParser;

impl FragmentParser<Element> for HtmlFragmentParser {
    fn extract(&self, html: &str) -> Vec<Element> {
        let parsed = DomParser::new()
            .and_then(|parser| parser.parse_from_string(html, SupportedType::TextHtml));
        let document = match parsed {
            Ok(document) => document,
            Err(e) => {
                log::warn!("could not parse fetched page: {:?}", e);
                return Vec::new();
            }
        };
        let Ok(nodes) = document.query_selector_all(PRODUCT_CONTAINER) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

/// A click listener that is removed again when the guard drops
pub struct ClickBinding {
    target: Element,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl ClickBinding {
    pub fn new<H>(target: Element, handler: H) -> Self
    where
        H: FnMut(MouseEvent) + 'static,
    {
        let callback = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        let added =
            target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        if let Err(e) = added {
            log::warn!("could not bind click listener: {:?}", e);
        }
        Self { target, callback }
    }
}

impl Drop for ClickBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("click", self.callback.as_ref().unchecked_ref());
    }
}
