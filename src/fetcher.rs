//! Page Fetcher
//!
//! Fetches one listing page and returns its product fragments. Pages at or
//! beyond the forward frontier are also pushed to browser history; pages
//! fetched backward never are.

use std::rc::Rc;

use crate::config::GridConfig;
use crate::error::FetchError;
use crate::query;
use crate::traits::{AddressBar, FragmentParser, Transport};

pub struct PageFetcher<F> {
    config: GridConfig,
    transport: Rc<dyn Transport>,
    parser: Rc<dyn FragmentParser<F>>,
    address: Rc<dyn AddressBar>,
}

impl<F> PageFetcher<F> {
    pub fn new(
        config: GridConfig,
        transport: Rc<dyn Transport>,
        parser: Rc<dyn FragmentParser<F>>,
        address: Rc<dyn AddressBar>,
    ) -> Self {
        Self { config, transport, parser, address }
    }

    /// URL of `page` with the current filter/sort parameters
    pub fn page_url(&self, page: u32) -> String {
        let path = self.config.collection_path(&self.address.pathname());
        query::page_url(&path, &self.address.search(), page)
    }

    /// Fetch `page`; `frontier` is the grid's next forward page
    pub async fn fetch_page(&self, page: u32, frontier: u32) -> Result<Vec<F>, FetchError> {
        let url = self.page_url(page);
        log::debug!("fetching {}", url);

        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status,
                status_text: response.status_text,
            });
        }

        let fragments = self.parser.extract(&response.body);

        if page >= frontier {
            let pushed = if response.url.is_empty() { url.as_str() } else { response.url.as_str() };
            self.address.push(pushed);
        }

        log::debug!("page {} returned {} fragments", page, fragments.len());
        Ok(fragments)
    }
}
