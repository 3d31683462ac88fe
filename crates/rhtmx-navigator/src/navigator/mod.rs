/// Navigator: turns navigation states into view transitions
///
/// Owns the provider registry, the committed navigation state and the
/// contracts with the rendering host and the external state store.
///
/// # Transition order
///
/// 1. Longest-match lookup, then error-provider fallback
/// 2. Trailing `/` normalization
/// 3. Full transition (listeners → display → commit → `enter` → listeners)
///    or a state-only commit when view and state are unchanged

pub mod event;
pub mod state;

pub use event::{ViewChangeEvent, ViewChangeListener};
pub use state::{MemoryStateManager, NavigationContext, NavigationStateManager};

use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::{NavigationConfig, NavigatorConfig};
use crate::error::{NavigatorError, Result};
use crate::provider::{CatchAllViewProvider, UriTemplateViewProvider, ViewProvider};
use crate::registry::ProviderRegistry;
use crate::view::{same_view, ViewDisplay, ViewHandle};

/// What a call to [`Navigator::navigate_to`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A new view was displayed and entered
    Rendered,
    /// Same view and state; only the navigation state was committed again
    StateUpdated,
    /// A listener cancelled the transition and the store was reverted
    Vetoed,
}

/// URI-template navigator
///
/// # Examples
///
/// ```
/// use rhtmx_navigator::{MemoryStateManager, NavigationOutcome, Navigator, View, ViewHandle};
/// use std::rc::Rc;
///
/// struct Home;
/// impl View for Home {}
/// struct Apple;
/// impl View for Apple {}
///
/// let store = MemoryStateManager::new();
/// let mut navigator = Navigator::new(store.clone(), |_view: &ViewHandle| {});
/// navigator.add_view("", Rc::new(Home)).unwrap();
/// navigator.add_view_factory("apples/{appleId}", || Ok(Rc::new(Apple) as ViewHandle)).unwrap();
///
/// let outcome = navigator.navigate_to("apples/7").unwrap();
/// assert_eq!(outcome, NavigationOutcome::Rendered);
/// assert_eq!(navigator.navigation_state(), Some("apples/7"));
/// ```
pub struct Navigator {
    registry: ProviderRegistry,
    context: NavigationContext,
    state_manager: Box<dyn NavigationStateManager>,
    display: Box<dyn ViewDisplay>,
    listeners: Vec<Rc<dyn ViewChangeListener>>,
    config: NavigationConfig,
}

impl Navigator {
    /// Creates a navigator with default configuration
    pub fn new<S, D>(state_manager: S, display: D) -> Self
    where
        S: NavigationStateManager + 'static,
        D: ViewDisplay + 'static,
    {
        Self::with_config(NavigatorConfig::default(), state_manager, display)
    }

    pub fn with_config<S, D>(config: NavigatorConfig, state_manager: S, display: D) -> Self
    where
        S: NavigationStateManager + 'static,
        D: ViewDisplay + 'static,
    {
        Self {
            registry: ProviderRegistry::new(),
            context: NavigationContext::new(),
            state_manager: Box::new(state_manager),
            display: Box::new(display),
            listeners: Vec::new(),
            config: config.navigation,
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a pre-built view, replacing registrations under the same name
    pub fn add_view(&mut self, view_name: &str, view: ViewHandle) -> Result<()> {
        let provider = UriTemplateViewProvider::with_view(view_name, view)?;
        self.remove_view(view_name);
        self.registry.add_provider(Rc::new(provider))
    }

    /// Registers a view factory, replacing registrations under the same name
    pub fn add_view_factory<F>(&mut self, view_name: &str, factory: F) -> Result<()>
    where
        F: Fn() -> anyhow::Result<ViewHandle> + 'static,
    {
        let provider = UriTemplateViewProvider::with_factory(view_name, factory)?;
        self.remove_view(view_name);
        self.registry.add_provider(Rc::new(provider))
    }

    /// Removes every provider registered under `view_name`
    pub fn remove_view(&mut self, view_name: &str) {
        self.registry.remove_view(view_name);
    }

    pub fn add_provider(&mut self, provider: Rc<dyn ViewProvider>) -> Result<()> {
        self.registry.add_provider(provider)
    }

    pub fn remove_provider(&mut self, provider: &Rc<dyn ViewProvider>) {
        self.registry.remove_provider(provider);
    }

    /// Sets the provider asked when no registered provider claims a state
    pub fn set_error_provider(&mut self, provider: Option<Rc<dyn ViewProvider>>) {
        self.registry.set_error_provider(provider);
    }

    /// Shows `view` for every state no registered provider claims
    pub fn set_error_view(&mut self, view: ViewHandle) {
        self.set_error_provider(Some(Rc::new(CatchAllViewProvider::new(view))));
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn add_view_change_listener(&mut self, listener: Rc<dyn ViewChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn remove_view_change_listener(&mut self, listener: &Rc<dyn ViewChangeListener>) {
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Current value of the external state store
    pub fn state(&self) -> String {
        self.state_manager.state()
    }

    /// Last committed navigation state, `None` before the first navigation
    pub fn navigation_state(&self) -> Option<&str> {
        self.context.state()
    }

    pub fn current_view(&self) -> Option<&ViewHandle> {
        self.context.current_view()
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigates to the state held by the store, or the configured initial state
    pub fn start(&mut self) -> Result<NavigationOutcome> {
        let stored = self.state_manager.state();
        let state = if stored.is_empty() {
            self.config.initial_state.clone()
        } else {
            stored
        };
        self.navigate_to(&state)
    }

    /// Navigates to a view name optionally followed by parameters
    ///
    /// If several providers claim the state, the one with the longest path
    /// wins. Fails with `UnknownState` when neither a provider nor the error
    /// provider yields a view; the committed state is left untouched.
    pub fn navigate_to(&mut self, navigation_state: &str) -> Result<NavigationOutcome> {
        let (view_name, view) = self.resolve_view(navigation_state)?;
        let state = self.normalize(navigation_state).to_string();

        let unchanged = self
            .context
            .current_view()
            .is_some_and(|current| same_view(current, &view))
            && self.context.state() == Some(state.as_str());

        if unchanged {
            debug!(state = %state, view_name = %view_name, "state-only navigation");
            let event = ViewChangeEvent {
                old_view: self.context.current_view().cloned(),
                new_view: view,
                view_name: state,
                parameters: String::new(),
            };
            self.update_navigation_state(&event);
            return Ok(NavigationOutcome::StateUpdated);
        }

        debug!(state = %state, view_name = %view_name, "navigating");
        Ok(self.navigate_to_view(view, &state, ""))
    }

    /// Performs a full transition to `view`
    ///
    /// Listeners may veto; in that case the store is reverted and nothing is
    /// displayed.
    pub fn navigate_to_view(
        &mut self,
        view: ViewHandle,
        view_name: &str,
        parameters: &str,
    ) -> NavigationOutcome {
        let event = ViewChangeEvent {
            old_view: self.context.current_view().cloned(),
            new_view: Rc::clone(&view),
            view_name: view_name.to_string(),
            parameters: parameters.to_string(),
        };

        if !self.fire_before_view_change(&event) {
            warn!(view_name, "view change vetoed");
            self.revert_navigation();
            return NavigationOutcome::Vetoed;
        }

        self.display.show_view(&view);
        self.update_navigation_state(&event);
        self.context.set_current_view(Rc::clone(&view));
        view.enter(&event);
        self.fire_after_view_change(&event);

        NavigationOutcome::Rendered
    }

    /// Restores the store to the last committed state
    ///
    /// No-op before the first successful navigation. Never re-renders.
    pub fn revert_navigation(&mut self) {
        if let Some(state) = self.context.state() {
            debug!(state, "reverting navigation state");
            self.state_manager.set_state(state);
        }
    }

    fn resolve_view(&self, navigation_state: &str) -> Result<(String, ViewHandle)> {
        if let Some((view_name, provider)) = self.registry.find_longest_match(navigation_state) {
            if let Some(view) = provider.view(&view_name)? {
                return Ok((view_name, view));
            }
        }

        if let Some(error_provider) = self.registry.error_provider() {
            warn!(state = navigation_state, "falling back to error provider");
            if let Some(view_name) = error_provider.view_name(navigation_state) {
                if let Some(view) = error_provider.view(&view_name)? {
                    return Ok((view_name, view));
                }
            }
        }

        warn!(state = navigation_state, "unknown navigation state");
        Err(NavigatorError::UnknownState(navigation_state.to_string()))
    }

    fn normalize<'a>(&self, navigation_state: &'a str) -> &'a str {
        if self.config.strip_trailing_slash {
            navigation_state
                .strip_suffix('/')
                .unwrap_or(navigation_state)
        } else {
            navigation_state
        }
    }

    /// Commits the event's state, writing the store only when it changed
    fn update_navigation_state(&mut self, event: &ViewChangeEvent) {
        let state = event.navigation_state();
        if self.state_manager.state() != state {
            self.state_manager.set_state(&state);
        }
        self.context.commit(state);
    }

    fn fire_before_view_change(&self, event: &ViewChangeEvent) -> bool {
        self.listeners
            .iter()
            .all(|listener| listener.before_view_change(event))
    }

    fn fire_after_view_change(&self, event: &ViewChangeEvent) {
        for listener in &self.listeners {
            listener.after_view_change(event);
        }
    }
}
