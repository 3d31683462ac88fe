// File: src/error.rs
// Purpose: Error taxonomy shared by templates, providers and the navigator

use thiserror::Error;

/// Boxed error produced by a failing view factory
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while compiling templates, registering providers or navigating
#[derive(Debug, Error)]
pub enum NavigatorError {
    /// A construction-time contract was violated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The template string could not be compiled
    #[error("Invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// Variable extraction was attempted on a string the template does not match
    #[error("'{candidate}' does not match template '{template}'")]
    NoMatch { template: String, candidate: String },

    /// A view factory failed to build its view
    #[error("Failed to instantiate view '{view_name}': {source}")]
    Instantiation {
        view_name: String,
        #[source]
        source: BoxError,
    },

    /// No provider, including the error provider, claims the navigation state
    #[error("Trying to navigate to an unknown state '{0}' and an error view provider not present")]
    UnknownState(String),
}

impl NavigatorError {
    pub(crate) fn invalid_template(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NavigatorError>;
