// File: src/view.rs
// Purpose: Contracts the navigator shares with the rendering host

use std::rc::Rc;

use crate::navigator::ViewChangeEvent;

/// A view the navigator can activate
///
/// The navigator never inspects a view. It only hands it to the
/// [`ViewDisplay`] and notifies it through [`View::enter`].
pub trait View {
    /// Called after the view has been displayed and the state committed
    fn enter(&self, _event: &ViewChangeEvent) {}
}

/// Shared handle to a view; identity is pointer identity
pub type ViewHandle = Rc<dyn View>;

/// Compares two view handles by identity
pub fn same_view(a: &ViewHandle, b: &ViewHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Rendering host: decides how and where a view is shown
pub trait ViewDisplay {
    fn show_view(&mut self, view: &ViewHandle);
}

impl<F> ViewDisplay for F
where
    F: FnMut(&ViewHandle),
{
    fn show_view(&mut self, view: &ViewHandle) {
        self(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;
    impl View for Blank {}

    #[test]
    fn test_same_view_identity() {
        let a: ViewHandle = Rc::new(Blank);
        let b: ViewHandle = Rc::new(Blank);
        assert!(same_view(&a, &a.clone()));
        assert!(!same_view(&a, &b));
    }
}
