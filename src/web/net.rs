//! Network and Location Bindings

use async_trait::async_trait;
use leptos::prelude::window;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::FetchError;
use crate::traits::{AddressBar, PageResponse, Transport};

fn network_error(err: JsValue) -> FetchError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    FetchError::Network(message)
}

/// `window.fetch` for same-origin listing pages
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<PageResponse, FetchError> {
        let value = JsFuture::from(window().fetch_with_str(url)).await.map_err(network_error)?;
        let response: Response = value.dyn_into().map_err(network_error)?;

        let body = if response.ok() {
            let text = JsFuture::from(response.text().map_err(network_error)?)
                .await
                .map_err(network_error)?;
            text.as_string().unwrap_or_default()
        } else {
            String::new()
        };

        Ok(PageResponse {
            url: response.url(),
            status: response.status(),
            status_text: response.status_text(),
            body,
        })
    }
}

/// State object stored with pushed history entries
#[derive(Serialize)]
struct HistoryEntry<'a> {
    path: &'a str,
}

/// `window.location` / `window.history`
pub struct BrowserAddressBar;

impl AddressBar for BrowserAddressBar {
    fn pathname(&self) -> String {
        window().location().pathname().unwrap_or_default()
    }

    fn search(&self) -> String {
        window().location().search().unwrap_or_default()
    }

    fn push(&self, url: &str) {
        let state = match serde_wasm_bindgen::to_value(&HistoryEntry { path: url }) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("history state not serializable: {}", e);
                JsValue::NULL
            }
        };
        let pushed = window()
            .history()
            .and_then(|history| history.push_state_with_url(&state, "", Some(url)));
        if let Err(e) = pushed {
            log::warn!("history push failed: {:?}", e);
        }
    }
}
