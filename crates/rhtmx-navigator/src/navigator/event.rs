/// View change events and listeners
///
/// Listeners are consulted before every full transition and may veto it;
/// they are notified again once the new view has been entered.

use std::fmt;

use crate::view::ViewHandle;

/// Describes a transition from one view to another
#[derive(Clone)]
pub struct ViewChangeEvent {
    /// The view being left, `None` on the first navigation
    pub old_view: Option<ViewHandle>,
    /// The view being entered
    pub new_view: ViewHandle,
    /// Normalized navigation state the view is entered with
    pub view_name: String,
    /// Extra parameters appended after the view name, usually empty
    pub parameters: String,
}

impl ViewChangeEvent {
    /// The state committed for this event: `view_name[/parameters]`
    pub fn navigation_state(&self) -> String {
        if self.parameters.is_empty() {
            self.view_name.clone()
        } else {
            format!("{}/{}", self.view_name, self.parameters)
        }
    }
}

impl fmt::Debug for ViewChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewChangeEvent")
            .field("has_old_view", &self.old_view.is_some())
            .field("view_name", &self.view_name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Observer of view transitions
pub trait ViewChangeListener {
    /// Returning `false` cancels the transition and reverts the state store
    fn before_view_change(&self, _event: &ViewChangeEvent) -> bool {
        true
    }

    fn after_view_change(&self, _event: &ViewChangeEvent) {}
}
