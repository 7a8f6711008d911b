//! Collection Grid Controller
//!
//! Coordinates the pagination state, the two load buttons and the page
//! fetcher. Everything runs on the UI thread; the only suspension point is
//! the page fetch, and no `RefCell` borrow is held across it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::GridConfig;
use crate::fetcher::PageFetcher;
use crate::query;
use crate::state::{Direction, PaginationState};
use crate::traits::{AddressBar, ButtonView, FragmentParser, ProductList, Transport};

/// Everything the initializer reads from the live DOM and URL
pub struct GridInit<F> {
    pub config: GridConfig,
    /// Product nodes already rendered inside the grid container
    pub displayed_products_count: u32,
    pub list: Rc<dyn ProductList<F>>,
    pub forward_button: Option<Rc<dyn ButtonView>>,
    pub backward_button: Option<Rc<dyn ButtonView>>,
    pub transport: Rc<dyn Transport>,
    pub parser: Rc<dyn FragmentParser<F>>,
    pub address: Rc<dyn AddressBar>,
}

struct Session<F> {
    state: PaginationState,
    list: Rc<dyn ProductList<F>>,
    forward_button: Option<Rc<dyn ButtonView>>,
    backward_button: Option<Rc<dyn ButtonView>>,
    fetcher: Rc<PageFetcher<F>>,
}

impl<F> Session<F> {
    fn new(init: GridInit<F>) -> Self {
        let page = query::page_param(&init.address.search());
        let state = PaginationState::initialize(&init.config, page, init.displayed_products_count);
        log::debug!("grid state derived: {:?}", state);

        let fetcher = PageFetcher::new(init.config, init.transport, init.parser, init.address);
        Self {
            state,
            list: init.list,
            forward_button: init.forward_button,
            backward_button: init.backward_button,
            fetcher: Rc::new(fetcher),
        }
    }

    /// Push the derived state of one button to the DOM; absent buttons are skipped
    fn present(&self, direction: Direction) {
        let button = match direction {
            Direction::Forward => &self.forward_button,
            Direction::Backward => &self.backward_button,
        };
        if let Some(button) = button {
            button.present(self.state.button_state(direction));
        }
    }
}

/// Incremental loader for one collection grid
pub struct CollectionGrid<F> {
    session: RefCell<Session<F>>,
}

impl<F> CollectionGrid<F> {
    pub fn new(init: GridInit<F>) -> Self {
        Self { session: RefCell::new(Session::new(init)) }
    }

    /// Discard the current state and derive it again from the DOM and URL
    ///
    /// A fetch still in flight is not cancelled; its completion applies to
    /// the new session.
    pub fn reinitialize(&self, init: GridInit<F>) {
        *self.session.borrow_mut() = Session::new(init);
    }

    pub fn state(&self) -> PaginationState {
        self.session.borrow().state.clone()
    }

    /// Append the next page ("load more")
    pub async fn load_next(&self) {
        let Some((page, fetcher)) = self.begin(Direction::Forward) else {
            return;
        };

        let result = fetcher.fetch_page(page, page).await;

        let mut session = self.session.borrow_mut();
        match result {
            Ok(fragments) => {
                let count = fragments.len();
                for fragment in fragments {
                    session.list.append(fragment);
                }
                session.state.complete_forward(count);
                log::debug!("appended {} products from page {}", count, page);
            }
            Err(err) => log::error!("Failed to load more products: {}", err),
        }
        session.state.release();
        session.present(Direction::Forward);
    }

    /// Prepend the page before the first rendered one ("load previous")
    pub async fn load_previous(&self) {
        let Some((page, fetcher)) = self.begin(Direction::Backward) else {
            return;
        };
        let frontier = self.session.borrow().state.current_page;

        let result = fetcher.fetch_page(page, frontier).await;

        let mut session = self.session.borrow_mut();
        match result {
            Ok(fragments) => {
                let count = fragments.len();
                // Inserting in reverse at the head keeps server order
                for fragment in fragments.into_iter().rev() {
                    session.list.prepend(fragment);
                }
                session.state.complete_backward();
                log::debug!("prepended {} products from page {}", count, page);
            }
            Err(err) => log::error!("Failed to load previous products: {}", err),
        }
        session.state.release();
        session.present(Direction::Backward);
    }

    fn begin(&self, direction: Direction) -> Option<(u32, Rc<PageFetcher<F>>)> {
        let mut session = self.session.borrow_mut();
        let Some(page) = session.state.begin(direction) else {
            log::debug!(
                "{:?} load ignored (fetching: {})",
                direction,
                session.state.is_fetching()
            );
            return None;
        };
        session.present(direction);
        Some((page, session.fetcher.clone()))
    }
}
