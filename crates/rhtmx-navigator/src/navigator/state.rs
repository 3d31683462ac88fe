/// Navigation state: the external store and the navigator's own record

use std::cell::RefCell;
use std::rc::Rc;

use crate::view::ViewHandle;

/// Externally visible location indicator, e.g. a URI fragment
pub trait NavigationStateManager {
    fn state(&self) -> String;
    fn set_state(&mut self, state: &str);
}

/// In-memory state store
///
/// Clones share the same underlying value, so a host (or a test) can keep a
/// handle while the navigator owns another.
///
/// # Examples
///
/// ```
/// use rhtmx_navigator::{MemoryStateManager, NavigationStateManager};
///
/// let store = MemoryStateManager::new();
/// let mut handle = store.clone();
/// handle.set_state("apples");
/// assert_eq!(store.state(), "apples");
/// assert_eq!(store.writes(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStateManager {
    inner: Rc<RefCell<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    value: String,
    writes: usize,
}

impl MemoryStateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `state`, as when a page is opened on a bookmark
    pub fn with_state(state: impl Into<String>) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().value = state.into();
        store
    }

    /// Number of `set_state` calls seen so far
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }
}

impl NavigationStateManager for MemoryStateManager {
    fn state(&self) -> String {
        self.inner.borrow().value.clone()
    }

    fn set_state(&mut self, state: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.value = state.to_string();
        inner.writes += 1;
    }
}

/// What the navigator knows about the last successful navigation
#[derive(Default)]
pub struct NavigationContext {
    state: Option<String>,
    current_view: Option<ViewHandle>,
}

impl NavigationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last committed navigation state, `None` before the first commit
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn current_view(&self) -> Option<&ViewHandle> {
        self.current_view.as_ref()
    }

    pub(crate) fn commit(&mut self, state: String) {
        self.state = Some(state);
    }

    pub(crate) fn set_current_view(&mut self, view: ViewHandle) {
        self.current_view = Some(view);
    }
}
