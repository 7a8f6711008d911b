//! Browser Mounting
//!
//! Reads the DOM contract of a `collection-grid` host, wires the controller
//! to real DOM nodes and subscribes it to filter changes.

mod dom;
mod net;

use std::rc::Rc;

use leptos::prelude::document;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlElement, MouseEvent};

use crate::config::{
    GridConfig, ATTR_MOUNTED, FILTER_CHANGE_EVENT, HOST_TAG, LOAD_MORE_BUTTON,
    LOAD_PREVIOUS_BUTTON, PRODUCT_GRID, PRODUCT_WRAPPER,
};
use crate::error::ConfigError;
use crate::grid::GridInit;
use crate::mount::{
    document_still_loading, ButtonNodes, ClickTarget, GridHost, LocalTask, MountedGrid,
};
use crate::traits::ButtonView;

pub use dom::{ClickBinding, DomButton, DomList, HtmlFragmentParser};
pub use net::{BrowserAddressBar, FetchTransport};

impl ClickTarget for Element {
    type Binding = ClickBinding;

    fn bind_click(&self, mut handler: Box<dyn FnMut()>) -> ClickBinding {
        ClickBinding::new(self.clone(), move |_: MouseEvent| handler())
    }
}

/// A `collection-grid` element in the live document
pub struct WebHost(HtmlElement);

impl WebHost {
    fn find(&self, selector: &str) -> Option<Element> {
        self.0.query_selector(selector).ok().flatten()
    }
}

impl GridHost for WebHost {
    type Fragment = Element;
    type Button = Element;

    fn is_mounted(&self) -> bool {
        self.0.has_attribute(ATTR_MOUNTED)
    }

    fn mark_mounted(&self) {
        if let Err(e) = self.0.set_attribute(ATTR_MOUNTED, "") {
            log::warn!("could not mark host as mounted: {:?}", e);
        }
    }

    fn read(&self) -> Result<(GridInit<Element>, ButtonNodes<Element>), ConfigError> {
        let config = GridConfig::from_attributes(|name| self.0.get_attribute(name))?;
        let grid = self
            .find(PRODUCT_GRID)
            .ok_or(ConfigError::MissingElement(PRODUCT_GRID))?;
        let wrapper = self
            .find(PRODUCT_WRAPPER)
            .ok_or(ConfigError::MissingElement(PRODUCT_WRAPPER))?;

        let buttons = ButtonNodes {
            forward: self.find(LOAD_MORE_BUTTON),
            backward: self.find(LOAD_PREVIOUS_BUTTON),
        };
        let as_view = |el: &Element| Rc::new(DomButton::new(el.clone())) as Rc<dyn ButtonView>;

        let init = GridInit {
            config,
            displayed_products_count: grid.children().length(),
            list: Rc::new(DomList::new(wrapper)),
            forward_button: buttons.forward.as_ref().map(as_view),
            backward_button: buttons.backward.as_ref().map(as_view),
            transport: Rc::new(FetchTransport),
            parser: Rc::new(HtmlFragmentParser),
            address: Rc::new(BrowserAddressBar),
        };
        Ok((init, buttons))
    }
}

/// Mount one host element and subscribe it to filter changes
///
/// A host that already carries a grid is refused with
/// [`ConfigError::AlreadyMounted`].
pub fn mount(host: HtmlElement) -> Result<Rc<MountedGrid<WebHost>>, ConfigError> {
    let spawner = Rc::new(|task: LocalTask| spawn_local(task));
    let mounted = MountedGrid::mount(WebHost(host), spawner)?;

    let on_filter_change = {
        let mounted = mounted.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| mounted.reinitialize())
    };
    let subscribed = document().add_event_listener_with_callback(
        FILTER_CHANGE_EVENT,
        on_filter_change.as_ref().unchecked_ref(),
    );
    if let Err(e) = subscribed {
        log::warn!("could not subscribe to {}: {:?}", FILTER_CHANGE_EVENT, e);
    }
    // Lives as long as the page
    on_filter_change.forget();

    log::info!("mounted collection grid ({:?})", mounted.grid().state());
    Ok(mounted)
}

/// Mount every `collection-grid` element currently in the document
///
/// Hosts mounted earlier are skipped.
pub fn mount_all() -> usize {
    let Ok(hosts) = document().query_selector_all(HOST_TAG) else {
        return 0;
    };

    let mut mounted = 0;
    for i in 0..hosts.length() {
        let Some(host) = hosts.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        match mount(host) {
            Ok(_) => mounted += 1,
            Err(ConfigError::AlreadyMounted) => {}
            Err(e) => log::error!("collection grid not mounted: {}", e),
        }
    }
    log::debug!("{} collection grid(s) mounted", mounted);
    mounted
}

/// Mount all hosts now, or once the document has finished parsing
pub fn mount_when_ready() {
    let document = document();
    if !document_still_loading(&document.ready_state()) {
        mount_all();
        return;
    }

    let on_ready = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        mount_all();
    });
    let subscribed = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
    if let Err(e) = subscribed {
        log::warn!("could not wait for DOMContentLoaded: {:?}", e);
        mount_all();
    }
    on_ready.forget();
}
