// File: src/registry.rs
// Purpose: Ordered provider collection with longest-match lookup

use std::rc::Rc;

use tracing::debug;

use crate::error::{NavigatorError, Result};
use crate::provider::ViewProvider;

/// Providers in registration order plus an optional fallback
///
/// Registration order matters: on equal path length the provider that was
/// registered first wins.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Rc<dyn ViewProvider>>,
    error_provider: Option<Rc<dyn ViewProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider
    ///
    /// Fails with `InvalidArgument` if the provider does not report a path
    /// length, i.e. cannot take part in longest-match selection.
    pub fn add_provider(&mut self, provider: Rc<dyn ViewProvider>) -> Result<()> {
        if provider.path_length().is_none() {
            return Err(NavigatorError::InvalidArgument(
                "Cannot add a view provider without URI template support".to_string(),
            ));
        }
        debug!(
            name = provider.registered_name().unwrap_or_default(),
            "provider added"
        );
        self.providers.push(provider);
        Ok(())
    }

    /// Removes this exact provider instance; no-op if it is not registered
    pub fn remove_provider(&mut self, provider: &Rc<dyn ViewProvider>) {
        self.providers.retain(|p| !Rc::ptr_eq(p, provider));
    }

    /// Removes every provider registered under `view_name`
    pub fn remove_view(&mut self, view_name: &str) {
        let before = self.providers.len();
        self.providers
            .retain(|p| p.registered_name() != Some(view_name));
        let removed = before - self.providers.len();
        if removed > 0 {
            debug!(view_name, removed, "providers removed");
        }
    }

    /// Replaces the fallback provider; the previous one is only released
    pub fn set_error_provider(&mut self, provider: Option<Rc<dyn ViewProvider>>) {
        self.error_provider = provider;
    }

    pub fn error_provider(&self) -> Option<&Rc<dyn ViewProvider>> {
        self.error_provider.as_ref()
    }

    pub fn providers(&self) -> &[Rc<dyn ViewProvider>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Finds the provider with the longest path among those claiming `state`
    ///
    /// The first claiming provider becomes the best candidate whatever its
    /// length; later ones replace it only with a strictly greater length.
    pub fn find_longest_match(&self, state: &str) -> Option<(String, Rc<dyn ViewProvider>)> {
        let mut best: Option<(String, usize, &Rc<dyn ViewProvider>)> = None;

        for provider in &self.providers {
            let Some(view_name) = provider.view_name(state) else {
                continue;
            };
            let length = provider.path_length().unwrap_or_default();
            let replace = match &best {
                None => true,
                Some((_, best_length, _)) => length > *best_length,
            };
            if replace {
                best = Some((view_name, length, provider));
            }
        }

        best.map(|(view_name, length, provider)| {
            debug!(state, view_name = %view_name, length, "longest match");
            (view_name, Rc::clone(provider))
        })
    }
}
