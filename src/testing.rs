//! In-memory fakes of the browser seams for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use crate::config::{GridConfig, PRODUCT_WRAPPER};
use crate::error::{ConfigError, FetchError};
use crate::grid::GridInit;
use crate::mount::{ButtonNodes, ClickTarget, GridHost, LocalTask, Spawner};
use crate::query;
use crate::state::ButtonState;
use crate::traits::{AddressBar, ButtonView, FragmentParser, PageResponse, ProductList, Transport};

pub const ORIGIN: &str = "https://shop.test";

/// Serves listing pages whose body is one product name per line
pub struct FakeServer {
    pages: RefCell<HashMap<u32, Vec<String>>>,
    next_failure: RefCell<Option<Result<PageResponse, FetchError>>>,
    requests: RefCell<Vec<String>>,
}

impl FakeServer {
    pub fn with_pages(pages: &[(u32, &[&str])]) -> Self {
        let pages = pages
            .iter()
            .map(|(page, names)| (*page, names.iter().map(|n| n.to_string()).collect()))
            .collect();
        Self {
            pages: RefCell::new(pages),
            next_failure: RefCell::new(None),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// `limit`-sized pages of `p{n}` names up to `total` products
    pub fn catalogue(limit: u32, total: u32) -> Self {
        let server = Self::with_pages(&[]);
        for n in 0..total {
            let page = n / limit + 1;
            server.pages.borrow_mut().entry(page).or_default().push(format!("p{}", n + 1));
        }
        server
    }

    pub fn fail_next_with_status(&self, status: u16, status_text: &str) {
        *self.next_failure.borrow_mut() = Some(Ok(PageResponse {
            url: String::new(),
            status,
            status_text: status_text.to_string(),
            body: String::new(),
        }));
    }

    pub fn fail_next_with_network_error(&self) {
        let failure = FetchError::Network("connection reset".to_string());
        *self.next_failure.borrow_mut() = Some(Err(failure));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeServer {
    async fn get(&self, url: &str) -> Result<PageResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        // suspend once so concurrent clicks can observe the in-flight latch
        tokio::task::yield_now().await;
        if let Some(failure) = self.next_failure.borrow_mut().take() {
            return failure;
        }

        let search = url.split_once('?').map_or("", |(_, q)| q);
        let page = query::page_param(search).unwrap_or(1);
        let body = self.pages.borrow().get(&page).map(|names| names.join("\n")).unwrap_or_default();

        Ok(PageResponse {
            url: format!("{}{}", ORIGIN, url),
            status: 200,
            status_text: "OK".to_string(),
            body,
        })
    }
}

pub struct LineParser;

impl FragmentParser<String> for LineParser {
    fn extract(&self, html: &str) -> Vec<String> {
        html.lines().filter(|l| !l.is_empty()).map(str::to_string).collect()
    }
}

pub struct FakeAddressBar {
    pathname: String,
    search: RefCell<String>,
    pushed: RefCell<Vec<String>>,
}

impl FakeAddressBar {
    pub fn new(pathname: &str, search: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
            search: RefCell::new(search.to_string()),
            pushed: RefCell::new(Vec::new()),
        }
    }

    pub fn set_search(&self, search: &str) {
        *self.search.borrow_mut() = search.to_string();
    }

    pub fn pushed(&self) -> Vec<String> {
        self.pushed.borrow().clone()
    }
}

impl AddressBar for FakeAddressBar {
    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn search(&self) -> String {
        self.search.borrow().clone()
    }

    fn push(&self, url: &str) {
        if let Some((_, q)) = url.split_once('?') {
            *self.search.borrow_mut() = format!("?{}", q);
        }
        self.pushed.borrow_mut().push(url.to_string());
    }
}

#[derive(Default)]
pub struct FakeList {
    items: RefCell<Vec<String>>,
}

impl FakeList {
    pub fn with_items(items: &[&str]) -> Self {
        Self { items: RefCell::new(items.iter().map(|i| i.to_string()).collect()) }
    }

    pub fn items(&self) -> Vec<String> {
        self.items.borrow().clone()
    }
}

impl ProductList<String> for FakeList {
    fn append(&self, fragment: String) {
        self.items.borrow_mut().push(fragment);
    }

    fn prepend(&self, fragment: String) {
        self.items.borrow_mut().insert(0, fragment);
    }
}

#[derive(Default)]
pub struct FakeButton {
    states: RefCell<Vec<ButtonState>>,
}

impl FakeButton {
    pub fn last(&self) -> Option<ButtonState> {
        self.states.borrow().last().copied()
    }

    pub fn history(&self) -> Vec<ButtonState> {
        self.states.borrow().clone()
    }
}

impl ButtonView for FakeButton {
    fn present(&self, state: ButtonState) {
        self.states.borrow_mut().push(state);
    }
}

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

/// Button element stand-in that records attached click handlers
#[derive(Clone, Default)]
pub struct FakeClickTarget {
    handlers: Rc<RefCell<Vec<(usize, Handler)>>>,
    next_id: Rc<Cell<usize>>,
}

impl FakeClickTarget {
    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Run every attached handler, like a dispatched click
    pub fn click(&self) {
        let handlers: Vec<Handler> =
            self.handlers.borrow().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            let mut handler = handler.borrow_mut();
            (*handler)();
        }
    }
}

pub struct FakeBinding {
    handlers: Rc<RefCell<Vec<(usize, Handler)>>>,
    id: usize,
}

impl Drop for FakeBinding {
    fn drop(&mut self) {
        self.handlers.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}

impl ClickTarget for FakeClickTarget {
    type Binding = FakeBinding;

    fn bind_click(&self, handler: Box<dyn FnMut()>) -> FakeBinding {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers.borrow_mut().push((id, Rc::new(RefCell::new(handler))));
        FakeBinding { handlers: self.handlers.clone(), id }
    }
}

/// Host element stand-in: 2 products per page, both buttons present
#[derive(Clone)]
pub struct FakeHost {
    pub server: Rc<FakeServer>,
    pub address: Rc<FakeAddressBar>,
    pub list: Rc<FakeList>,
    pub forward: FakeClickTarget,
    pub backward: FakeClickTarget,
    total: u32,
    mounted: Rc<Cell<bool>>,
    broken: Rc<Cell<bool>>,
}

impl FakeHost {
    pub fn new(total: u32, search: &str, rendered: &[&str]) -> Self {
        Self {
            server: Rc::new(FakeServer::catalogue(2, total)),
            address: Rc::new(FakeAddressBar::new("/collections/all", search)),
            list: Rc::new(FakeList::with_items(rendered)),
            forward: FakeClickTarget::default(),
            backward: FakeClickTarget::default(),
            total,
            mounted: Rc::new(Cell::new(false)),
            broken: Rc::new(Cell::new(false)),
        }
    }

    /// Make DOM reads fail as if the product wrapper were missing
    pub fn break_config(&self) {
        self.broken.set(true);
    }

    pub fn repair_config(&self) {
        self.broken.set(false);
    }
}

impl GridHost for FakeHost {
    type Fragment = String;
    type Button = FakeClickTarget;

    fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    fn mark_mounted(&self) {
        self.mounted.set(true);
    }

    fn read(&self) -> Result<(GridInit<String>, ButtonNodes<FakeClickTarget>), ConfigError> {
        if self.broken.get() {
            return Err(ConfigError::MissingElement(PRODUCT_WRAPPER));
        }
        let init = GridInit {
            config: GridConfig {
                products_per_page: 2,
                total_products_count: self.total,
                collection_handle: Some("all".to_string()),
            },
            displayed_products_count: self.list.items().len() as u32,
            list: self.list.clone(),
            forward_button: Some(Rc::new(FakeButton::default())),
            backward_button: Some(Rc::new(FakeButton::default())),
            transport: self.server.clone(),
            parser: Rc::new(LineParser),
            address: self.address.clone(),
        };
        let buttons = ButtonNodes {
            forward: Some(self.forward.clone()),
            backward: Some(self.backward.clone()),
        };
        Ok((init, buttons))
    }
}

/// Collects spawned click tasks so a test can drive them to completion
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<Vec<LocalTask>>>,
}

impl TaskQueue {
    pub fn spawner(&self) -> Spawner {
        let tasks = self.tasks.clone();
        Rc::new(move |task: LocalTask| tasks.borrow_mut().push(task))
    }

    pub async fn run_all(&self) {
        loop {
            let pending: Vec<LocalTask> = self.tasks.borrow_mut().drain(..).collect();
            if pending.is_empty() {
                break;
            }
            for task in pending {
                task.await;
            }
        }
    }
}
