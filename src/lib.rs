//! Collection Grid
//!
//! Incrementally loads paginated product listings into a storefront
//! collection page: "load more" appends the next page, "load previous"
//! prepends the page before the first one rendered.
//!
//! Layers:
//! - state / query / config: pagination bookkeeping, pure and target independent
//! - fetcher / grid: the page fetcher and the controller, over the `traits` seams
//! - mount: one controller per host, click bindings replaced on re-initialisation
//! - web: web-sys implementations of the seams and host elements

pub mod config;
pub mod error;
pub mod fetcher;
pub mod grid;
pub mod logger;
pub mod mount;
pub mod query;
pub mod state;
pub mod traits;
pub mod web;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use config::GridConfig;
pub use error::{ConfigError, FetchError};
pub use grid::{CollectionGrid, GridInit};
pub use state::{ButtonState, Direction, FetchLatch, PaginationState};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    web::mount_when_ready();
}

/// Mount a grid inserted after page load; mounting a host twice is an error
#[wasm_bindgen]
pub fn mount(host: HtmlElement) -> Result<(), JsValue> {
    web::mount(host)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Change console verbosity (`error`, `warn`, `info`, `debug`, `trace`, `off`)
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) {
    match logger::parse_level(level) {
        Some(filter) => logger::set_level(filter),
        None => log::warn!("unknown log level {:?}", level),
    }
}
