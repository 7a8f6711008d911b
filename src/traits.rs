//! Browser Seams
//!
//! Abstract interfaces over the DOM, network and location/history APIs the grid
//! touches. The `web` module implements them with web-sys; tests use
//! in-memory fakes.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::state::ButtonState;

/// The list node that loaded fragments are inserted into
pub trait ProductList<F> {
    /// Insert after the current last child
    fn append(&self, fragment: F);
    /// Insert before the current first child
    fn prepend(&self, fragment: F);
}

/// A load button (label, spinner, enabled flag, visibility)
pub trait ButtonView {
    fn present(&self, state: ButtonState);
}

/// Response of a listing page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    /// Final URL after redirects; may be empty if the platform hides it
    pub url: String,
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP GET for HTML pages
///
/// Only fails with [`FetchError::Network`]; status handling is the caller's.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<PageResponse, FetchError>;
}

/// Pulls product fragments out of a full HTML document, in document order
pub trait FragmentParser<F> {
    fn extract(&self, html: &str) -> Vec<F>;
}

/// The current URL, read at call time, and history updates that do not
/// trigger navigation
pub trait AddressBar {
    fn pathname(&self) -> String;
    /// Query string including the leading `?`, or empty
    fn search(&self) -> String;
    fn push(&self, url: &str);
}
