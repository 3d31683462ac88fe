// File: src/provider.rs
// Purpose: View providers that claim navigation states via URI templates

use std::fmt;

use tracing::trace;

use crate::error::{NavigatorError, Result};
use crate::template::UriTemplate;
use crate::view::ViewHandle;

/// Factory used by providers that build a fresh view per navigation
pub type ViewFactory = Box<dyn Fn() -> anyhow::Result<ViewHandle>>;

/// Something that can claim a navigation state and produce a view for it
///
/// Plain implementations (for example an error provider that accepts every
/// state) only need [`view_name`](ViewProvider::view_name) and
/// [`view`](ViewProvider::view). Providers that take part in longest-match
/// selection also report a path length and their registered name.
pub trait ViewProvider {
    /// Returns the view name this provider claims for `state`, if any
    fn view_name(&self, state: &str) -> Option<String>;

    /// Produces the view for a name previously returned by `view_name`
    fn view(&self, view_name: &str) -> Result<Option<ViewHandle>>;

    /// Matching priority; `None` for providers without template support
    fn path_length(&self) -> Option<usize> {
        None
    }

    /// The name this provider was registered under, used for removal by name
    fn registered_name(&self) -> Option<&str> {
        None
    }
}

/// Where a provider's views come from
pub enum ViewSource {
    /// One pre-built view shared by every navigation
    Static(ViewHandle),
    /// A factory invoked for every navigation
    Factory(ViewFactory),
}

impl fmt::Debug for ViewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewSource::Static(_) => f.write_str("Static"),
            ViewSource::Factory(_) => f.write_str("Factory"),
        }
    }
}

/// Provider whose view name is a literal path or a URI template
///
/// # Examples
///
/// ```
/// use rhtmx_navigator::{UriTemplateViewProvider, View, ViewHandle, ViewProvider};
/// use std::rc::Rc;
///
/// struct Apple;
/// impl View for Apple {}
///
/// let provider = UriTemplateViewProvider::with_factory("apples/{appleId}", || {
///     let view: ViewHandle = Rc::new(Apple);
///     Ok(view)
/// })
/// .unwrap();
///
/// assert_eq!(provider.view_name("apples/7").as_deref(), Some("apples/{appleId}"));
/// assert_eq!(provider.path_length(), Some(2));
/// ```
#[derive(Debug)]
pub struct UriTemplateViewProvider {
    name: String,
    /// Absent for the root (empty) name
    template: Option<UriTemplate>,
    path_length: usize,
    source: ViewSource,
}

impl UriTemplateViewProvider {
    /// Creates a provider from an explicit view source
    ///
    /// Compiles the template once; fails with `InvalidTemplate` on bad syntax.
    pub fn new(name: impl Into<String>, source: ViewSource) -> Result<Self> {
        let name = name.into();
        let template = if name.is_empty() {
            None
        } else {
            Some(UriTemplate::compile(&name)?)
        };
        let path_length = segment_count(&name);

        Ok(Self {
            name,
            template,
            path_length,
            source,
        })
    }

    /// Provider that always hands out the same view instance
    pub fn with_view(name: impl Into<String>, view: ViewHandle) -> Result<Self> {
        Self::new(name, ViewSource::Static(view))
    }

    /// Provider that builds a new view on every request
    pub fn with_factory<F>(name: impl Into<String>, factory: F) -> Result<Self>
    where
        F: Fn() -> anyhow::Result<ViewHandle> + 'static,
    {
        Self::new(name, ViewSource::Factory(Box::new(factory)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> Option<&UriTemplate> {
        self.template.as_ref()
    }

    pub fn source(&self) -> &ViewSource {
        &self.source
    }

    /// Exact, then template, then prefix match
    fn claims(&self, state: &str) -> bool {
        if self.name == state {
            return true;
        }
        if self.template.as_ref().is_some_and(|t| t.matches(state)) {
            return true;
        }
        state
            .strip_prefix(self.name.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl ViewProvider for UriTemplateViewProvider {
    fn view_name(&self, state: &str) -> Option<String> {
        let claimed = self.claims(state);
        trace!(provider = %self.name, state, claimed, "resolve");
        claimed.then(|| self.name.clone())
    }

    fn view(&self, view_name: &str) -> Result<Option<ViewHandle>> {
        if view_name != self.name {
            return Ok(None);
        }
        match &self.source {
            ViewSource::Static(view) => Ok(Some(view.clone())),
            ViewSource::Factory(factory) => factory()
                .map(Some)
                .map_err(|err| NavigatorError::Instantiation {
                    view_name: self.name.clone(),
                    source: err.into(),
                }),
        }
    }

    fn path_length(&self) -> Option<usize> {
        Some(self.path_length)
    }

    fn registered_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Error provider that claims every state and always shows one view
///
/// The claimed view name is the state itself.
pub struct CatchAllViewProvider {
    view: ViewHandle,
}

impl CatchAllViewProvider {
    pub fn new(view: ViewHandle) -> Self {
        Self { view }
    }
}

impl ViewProvider for CatchAllViewProvider {
    fn view_name(&self, state: &str) -> Option<String> {
        Some(state.to_string())
    }

    fn view(&self, _view_name: &str) -> Result<Option<ViewHandle>> {
        Ok(Some(self.view.clone()))
    }
}

/// Number of `/`-separated segments, ignoring trailing empty ones
///
/// An empty name counts as one segment; a name made only of slashes counts
/// as zero.
pub fn segment_count(name: &str) -> usize {
    if name.is_empty() {
        return 1;
    }
    name.split('/')
        .collect::<Vec<_>>()
        .iter()
        .rposition(|segment| !segment.is_empty())
        .map_or(0, |last| last + 1)
}
