//! Grid Configuration
//!
//! Declarative settings read from the host element plus the DOM contract
//! (selectors, class names, event names) the widget relies on.

use crate::error::ConfigError;

/// Custom element tag mounted on start
pub const HOST_TAG: &str = "collection-grid";

pub const ATTR_LIMIT: &str = "data-limit";
pub const ATTR_TOTAL: &str = "data-total-products-quantity";
pub const ATTR_HANDLE: &str = "data-collection-handle";
/// Set on a host once a grid controls it
pub const ATTR_MOUNTED: &str = "data-collection-grid-mounted";

pub const PRODUCT_GRID: &str = "#product-grid";
pub const PRODUCT_WRAPPER: &str = "[data-product-wrapper-js]";
pub const PRODUCT_CONTAINER: &str = "[data-product-container-js]";
pub const LOAD_MORE_BUTTON: &str = "#load-more-btn";
pub const LOAD_PREVIOUS_BUTTON: &str = "#load-previous-btn";
pub const BUTTON_TEXT: &str = "[data-button-text]";
pub const BUTTON_SPINNER: &str = ".loading__spinner";

/// Utility class toggled to hide nodes
pub const HIDDEN_CLASS: &str = "hidden";

/// Document event fired by the filter UI after it has updated the DOM and URL
pub const FILTER_CHANGE_EVENT: &str = "filterChange";

/// Settings set by the enclosing page on the host element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub products_per_page: u32,
    pub total_products_count: u32,
    /// `None` falls back to the current pathname
    pub collection_handle: Option<String>,
}

impl GridConfig {
    /// Build from an attribute lookup (`Element::get_attribute` in the browser)
    pub fn from_attributes<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let collection_handle = get(ATTR_HANDLE)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        Ok(Self {
            products_per_page: parse_count(ATTR_LIMIT, get(ATTR_LIMIT))?,
            total_products_count: parse_count(ATTR_TOTAL, get(ATTR_TOTAL))?,
            collection_handle,
        })
    }

    /// Path the listing pages are served from
    pub fn collection_path(&self, current_pathname: &str) -> String {
        match &self.collection_handle {
            Some(handle) => format!("/collections/{}", handle),
            None => current_pathname.to_string(),
        }
    }
}

fn parse_count(name: &'static str, value: Option<String>) -> Result<u32, ConfigError> {
    let value = value.ok_or(ConfigError::MissingAttribute(name))?;
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidAttribute { name, value })
}
