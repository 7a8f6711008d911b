//! Host Mounting
//!
//! Attaches one controller to one host element and keeps the button click
//! bindings in step with re-initialisation: old bindings are dropped
//! (detached) before new ones are made, and a host is only ever mounted once.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::grid::{CollectionGrid, GridInit};

/// A click task handed to the platform's local executor
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

pub type Spawner = Rc<dyn Fn(LocalTask)>;

/// Something a click handler can be attached to
pub trait ClickTarget {
    /// Guard that detaches the handler when dropped
    type Binding;

    fn bind_click(&self, handler: Box<dyn FnMut()>) -> Self::Binding;
}

/// Load buttons found during a DOM read; either may be absent
pub struct ButtonNodes<B> {
    pub forward: Option<B>,
    pub backward: Option<B>,
}

/// The element a grid is mounted on
pub trait GridHost {
    type Fragment: 'static;
    type Button: ClickTarget;

    fn is_mounted(&self) -> bool;
    fn mark_mounted(&self);
    /// Derive controller inputs from the host's current DOM and URL
    fn read(&self) -> Result<(GridInit<Self::Fragment>, ButtonNodes<Self::Button>), ConfigError>;
}

/// `document.readyState` value while the parser is still adding elements
pub fn document_still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

type BindingOf<H> = <<H as GridHost>::Button as ClickTarget>::Binding;

/// A grid attached to a live host
pub struct MountedGrid<H: GridHost> {
    host: H,
    grid: Rc<CollectionGrid<H::Fragment>>,
    bindings: RefCell<Vec<BindingOf<H>>>,
    spawn: Spawner,
}

impl<H: GridHost> MountedGrid<H> {
    /// Mount `host`, refusing hosts that already carry a grid
    pub fn mount(host: H, spawn: Spawner) -> Result<Rc<Self>, ConfigError> {
        if host.is_mounted() {
            return Err(ConfigError::AlreadyMounted);
        }
        let (init, buttons) = host.read()?;
        host.mark_mounted();

        let mounted = Rc::new(Self {
            host,
            grid: Rc::new(CollectionGrid::new(init)),
            bindings: RefCell::new(Vec::new()),
            spawn,
        });
        mounted.bind(buttons);
        Ok(mounted)
    }

    pub fn grid(&self) -> &CollectionGrid<H::Fragment> {
        &self.grid
    }

    /// Re-derive everything after the filter UI replaced the results
    ///
    /// On a failed DOM read the previous session and bindings stay.
    pub fn reinitialize(&self) {
        match self.host.read() {
            Ok((init, buttons)) => {
                self.grid.reinitialize(init);
                self.bind(buttons);
                log::debug!("grid re-initialised after filter change");
            }
            Err(e) => log::error!("could not re-initialise collection grid: {}", e),
        }
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    fn bind(&self, buttons: ButtonNodes<H::Button>) {
        let mut bindings = self.bindings.borrow_mut();
        // Dropping the old guards detaches their listeners
        bindings.clear();

        if let Some(button) = buttons.forward {
            let grid = self.grid.clone();
            let spawn = self.spawn.clone();
            bindings.push(button.bind_click(Box::new(move || {
                let grid = grid.clone();
                spawn(Box::pin(async move { grid.load_next().await }));
            })));
        }
        if let Some(button) = buttons.backward {
            let grid = self.grid.clone();
            let spawn = self.spawn.clone();
            bindings.push(button.bind_click(Box::new(move || {
                let grid = grid.clone();
                spawn(Box::pin(async move { grid.load_previous().await }));
            })));
        }
    }
}
