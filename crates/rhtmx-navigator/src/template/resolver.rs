/// Template-bound variable resolver for views
///
/// A view declares its own template and uses a resolver on `enter` to pull
/// path variables out of the navigation state it was activated with.

use tracing::trace;

use super::{TemplateVariables, UriTemplate};
use crate::error::{NavigatorError, Result};

/// Extracts variables from navigation states using one fixed template
///
/// # Examples
///
/// ```
/// use rhtmx_navigator::UriTemplateResolver;
///
/// let resolver = UriTemplateResolver::new("apples/{appleId}/cores/{coreId}").unwrap();
/// let vars = resolver.resolve_view_name("apples/12/cores/382").unwrap();
/// assert_eq!(vars.get("appleId"), Some("12"));
/// assert_eq!(vars.get("coreId"), Some("382"));
/// ```
#[derive(Debug, Clone)]
pub struct UriTemplateResolver {
    template: UriTemplate,
}

impl UriTemplateResolver {
    /// Compiles `template`; an empty template is rejected with `InvalidArgument`
    pub fn new(template: &str) -> Result<Self> {
        if template.is_empty() {
            return Err(NavigatorError::InvalidArgument(
                "template may not be empty".to_string(),
            ));
        }
        Ok(Self {
            template: UriTemplate::compile(template)?,
        })
    }

    pub fn template(&self) -> &UriTemplate {
        &self.template
    }

    /// Extracts variables, failing with `NoMatch` when the state does not conform
    pub fn resolve_view_name(&self, view_name: &str) -> Result<TemplateVariables> {
        self.template.extract(view_name)
    }

    /// Extracts variables, yielding an empty set when the state does not conform
    ///
    /// Callers look variables up by name and treat a missing entry as
    /// "parameter not present".
    pub fn variables(&self, view_name: &str) -> TemplateVariables {
        self.template.extract(view_name).unwrap_or_else(|err| {
            trace!(%err, "no template variables");
            TemplateVariables::new()
        })
    }
}
