//! # RHTMX Navigator
//!
//! An in-process navigator that maps navigation states (slash-delimited
//! paths, optionally followed by parameters) to registered view providers:
//! - Literal view names (`apples`)
//! - URI templates (`apples/{appleId}/cores/{coreId}`)
//! - Custom variable patterns (`items/{id:\d+}`)
//! - Prefix claims for sub-paths (`apples` claims `apples/anything`)
//! - An error provider for states nobody claims
//!
//! ## Longest Match
//!
//! When several providers claim a state, the one whose view name has the
//! most path segments wins. On equal length the provider registered first
//! wins.
//!
//! ## Example
//!
//! ```
//! use rhtmx_navigator::{MemoryStateManager, Navigator, UriTemplateResolver, View, ViewHandle};
//! use std::rc::Rc;
//!
//! struct Apples;
//! impl View for Apples {}
//!
//! struct Apple;
//! impl View for Apple {}
//!
//! let store = MemoryStateManager::new();
//! let mut navigator = Navigator::new(store.clone(), |_view: &ViewHandle| {});
//! navigator.add_view("apples", Rc::new(Apples)).unwrap();
//! navigator.add_view_factory("apples/{appleId}", || Ok(Rc::new(Apple) as ViewHandle)).unwrap();
//!
//! navigator.navigate_to("apples/42").unwrap();
//! assert_eq!(navigator.navigation_state(), Some("apples/42"));
//!
//! let resolver = UriTemplateResolver::new("apples/{appleId}").unwrap();
//! let vars = resolver.resolve_view_name("apples/42").unwrap();
//! assert_eq!(vars.get("appleId"), Some("42"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod navigator;
pub mod provider;
pub mod registry;
pub mod template;
pub mod view;

pub use config::{NavigationConfig, NavigatorConfig};
pub use error::{BoxError, NavigatorError, Result};
pub use navigator::{
    MemoryStateManager, NavigationContext, NavigationOutcome, NavigationStateManager, Navigator,
    ViewChangeEvent, ViewChangeListener,
};
pub use provider::{
    segment_count, CatchAllViewProvider, UriTemplateViewProvider, ViewFactory, ViewProvider,
    ViewSource,
};
pub use registry::ProviderRegistry;
pub use template::{TemplateVariables, UriTemplate, UriTemplateResolver};
pub use view::{same_view, View, ViewDisplay, ViewHandle};
