//! Integration tests for rhtmx-navigator
//!
//! Tests are organized by feature area and cover:
//! - Longest-match selection and registration-order tie-breaks
//! - Full transitions vs state-only commits
//! - Error provider fallback and unknown states
//! - View change listeners, vetoes and revert
//! - Template variables seen by entered views

use pretty_assertions::assert_eq;
use rhtmx_navigator::*;
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Fixtures
// ============================================================================

type Journal = Rc<RefCell<Vec<String>>>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// View that records its `enter` calls and resolved variables
struct RecordingView {
    label: &'static str,
    resolver: Option<UriTemplateResolver>,
    journal: Journal,
}

impl RecordingView {
    fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            resolver: None,
            journal: Rc::clone(journal),
        }
    }

    fn with_template(label: &'static str, template: &str, journal: &Journal) -> Self {
        Self {
            label,
            resolver: Some(UriTemplateResolver::new(template).unwrap()),
            journal: Rc::clone(journal),
        }
    }
}

impl View for RecordingView {
    fn enter(&self, event: &ViewChangeEvent) {
        let mut line = format!("enter {} '{}'", self.label, event.view_name);
        if let Some(resolver) = &self.resolver {
            let vars = resolver.variables(&event.view_name);
            for (name, value) in vars.iter() {
                line.push_str(&format!(" {}={}", name, value));
            }
        }
        self.journal.borrow_mut().push(line);
    }
}

struct Harness {
    navigator: Navigator,
    store: MemoryStateManager,
    journal: Journal,
    shown: Rc<RefCell<usize>>,
}

fn harness() -> Harness {
    init_tracing();
    let store = MemoryStateManager::new();
    let journal: Journal = Rc::default();
    let shown = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&shown);
    let navigator = Navigator::new(store.clone(), move |_: &ViewHandle| {
        *counter.borrow_mut() += 1;
    });
    Harness {
        navigator,
        store,
        journal,
        shown,
    }
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

// ============================================================================
// Longest Match
// ============================================================================

#[test]
fn test_literal_and_template_longest_match() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator
        .add_view(
            "apples/{id}",
            Rc::new(RecordingView::with_template("apple", "apples/{id}", &h.journal)),
        )
        .unwrap();

    h.navigator.navigate_to("apples/42").unwrap();
    h.navigator.navigate_to("apples").unwrap();

    assert_eq!(
        entries(&h.journal),
        vec!["enter apple 'apples/42' id=42", "enter apples 'apples'"]
    );
}

#[test]
fn test_equal_path_length_first_registered_wins() {
    let mut h = harness();
    h.navigator
        .add_view("apples/{id}", Rc::new(RecordingView::new("first", &h.journal)))
        .unwrap();
    h.navigator
        .add_view("apples/golden", Rc::new(RecordingView::new("second", &h.journal)))
        .unwrap();

    h.navigator.navigate_to("apples/golden").unwrap();
    assert_eq!(entries(&h.journal), vec!["enter first 'apples/golden'"]);
}

#[test]
fn test_prefix_claim_keeps_parameters_in_state() {
    let mut h = harness();
    h.navigator
        .add_view("reports", Rc::new(RecordingView::new("reports", &h.journal)))
        .unwrap();

    h.navigator.navigate_to("reports/2024/q1").unwrap();
    assert_eq!(h.navigator.navigation_state(), Some("reports/2024/q1"));
    assert_eq!(h.store.state(), "reports/2024/q1");
}

#[test]
fn test_removed_view_no_longer_matches() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator.remove_view("apples");

    assert!(matches!(
        h.navigator.navigate_to("apples"),
        Err(NavigatorError::UnknownState(_))
    ));
}

// ============================================================================
// Apples Scenario
// ============================================================================

#[test]
fn test_root_static_and_templated_factory() {
    let mut h = harness();
    h.navigator
        .add_view("", Rc::new(RecordingView::new("default", &h.journal)))
        .unwrap();

    let journal = Rc::clone(&h.journal);
    h.navigator
        .add_view_factory("apples/{appleId}", move || {
            Ok(Rc::new(RecordingView::with_template(
                "apple",
                "apples/{appleId}",
                &journal,
            )) as ViewHandle)
        })
        .unwrap();

    assert_eq!(
        h.navigator.navigate_to("apples/7").unwrap(),
        NavigationOutcome::Rendered
    );
    assert_eq!(
        h.navigator.navigate_to("").unwrap(),
        NavigationOutcome::Rendered
    );

    assert_eq!(
        entries(&h.journal),
        vec!["enter apple 'apples/7' appleId=7", "enter default ''"]
    );
    assert_eq!(h.navigator.navigation_state(), Some(""));
}

#[test]
fn test_core_view_resolves_both_ids() {
    let mut h = harness();
    for (name, label) in [
        ("apples", "apples"),
        ("apples/{appleId}", "apple"),
        ("apples/{appleId}/cores", "cores"),
    ] {
        h.navigator
            .add_view(name, Rc::new(RecordingView::new(label, &h.journal)))
            .unwrap();
    }
    h.navigator
        .add_view(
            "apples/{appleId}/cores/{coreId}",
            Rc::new(RecordingView::with_template(
                "core",
                "apples/{appleId}/cores/{coreId}",
                &h.journal,
            )),
        )
        .unwrap();

    h.navigator.navigate_to("apples/1124621Xd5/cores/382").unwrap();
    h.navigator.navigate_to("apples/123sf45Xd5/cores").unwrap();

    assert_eq!(
        entries(&h.journal),
        vec![
            "enter core 'apples/1124621Xd5/cores/382' appleId=1124621Xd5 coreId=382",
            "enter cores 'apples/123sf45Xd5/cores'",
        ]
    );
}

// ============================================================================
// Re-navigation
// ============================================================================

#[test]
fn test_same_state_twice_renders_once() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();

    assert_eq!(
        h.navigator.navigate_to("apples/").unwrap(),
        NavigationOutcome::Rendered
    );
    assert_eq!(
        h.navigator.navigate_to("apples/").unwrap(),
        NavigationOutcome::StateUpdated
    );

    assert_eq!(*h.shown.borrow(), 1);
    assert_eq!(entries(&h.journal).len(), 1);
    assert_eq!(h.navigator.navigation_state(), Some("apples"));
    assert_eq!(h.store.writes(), 1);
}

#[test]
fn test_same_static_view_new_parameters_renders_again() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();

    h.navigator.navigate_to("apples/1").unwrap();
    let outcome = h.navigator.navigate_to("apples/2").unwrap();

    assert_eq!(outcome, NavigationOutcome::Rendered);
    assert_eq!(*h.shown.borrow(), 2);
    assert_eq!(h.navigator.navigation_state(), Some("apples/2"));
}

#[test]
fn test_state_only_commit_restores_store() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator.navigate_to("apples").unwrap();

    // the host changed the indicator behind the navigator's back
    let mut store = h.store.clone();
    store.set_state("garbage");

    assert_eq!(
        h.navigator.navigate_to("apples").unwrap(),
        NavigationOutcome::StateUpdated
    );
    assert_eq!(h.store.state(), "apples");
}

// ============================================================================
// Error Provider
// ============================================================================

#[test]
fn test_unknown_state_without_error_provider() {
    let mut h = harness();
    let err = h.navigator.navigate_to("nowhere").unwrap_err();
    assert!(matches!(err, NavigatorError::UnknownState(ref s) if s == "nowhere"));
    assert_eq!(h.navigator.navigation_state(), None);
    assert_eq!(h.store.writes(), 0);
}

#[test]
fn test_error_view_fallback() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator
        .set_error_view(Rc::new(RecordingView::new("error", &h.journal)));

    h.navigator.navigate_to("pears/3").unwrap();
    assert_eq!(entries(&h.journal), vec!["enter error 'pears/3'"]);
    assert_eq!(h.navigator.navigation_state(), Some("pears/3"));
}

#[test]
fn test_error_provider_used_when_provider_returns_no_view() {
    struct Declining;
    impl ViewProvider for Declining {
        fn view_name(&self, state: &str) -> Option<String> {
            Some(state.to_string())
        }
        fn view(&self, _view_name: &str) -> Result<Option<ViewHandle>> {
            Ok(None)
        }
        fn path_length(&self) -> Option<usize> {
            Some(1)
        }
    }

    let mut h = harness();
    h.navigator.add_provider(Rc::new(Declining)).unwrap();
    h.navigator
        .set_error_view(Rc::new(RecordingView::new("error", &h.journal)));

    h.navigator.navigate_to("anything").unwrap();
    assert_eq!(entries(&h.journal), vec!["enter error 'anything'"]);
}

#[test]
fn test_instantiation_failure_propagates() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator.navigate_to("apples").unwrap();

    h.navigator
        .add_view_factory("broken", || anyhow::bail!("constructor panicked politely"))
        .unwrap();

    let err = h.navigator.navigate_to("broken").unwrap_err();
    assert!(matches!(err, NavigatorError::Instantiation { ref view_name, .. } if view_name == "broken"));
    assert_eq!(h.navigator.navigation_state(), Some("apples"));
}

// ============================================================================
// Listeners and Revert
// ============================================================================

struct Gate {
    allow: RefCell<bool>,
    journal: Journal,
}

impl ViewChangeListener for Gate {
    fn before_view_change(&self, event: &ViewChangeEvent) -> bool {
        self.journal
            .borrow_mut()
            .push(format!("before '{}'", event.view_name));
        *self.allow.borrow()
    }

    fn after_view_change(&self, event: &ViewChangeEvent) {
        self.journal
            .borrow_mut()
            .push(format!("after '{}'", event.view_name));
    }
}

#[test]
fn test_listener_order() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator.add_view_change_listener(Rc::new(Gate {
        allow: RefCell::new(true),
        journal: Rc::clone(&h.journal),
    }));

    h.navigator.navigate_to("apples").unwrap();
    assert_eq!(
        entries(&h.journal),
        vec!["before 'apples'", "enter apples 'apples'", "after 'apples'"]
    );
}

#[test]
fn test_veto_reverts_store() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator
        .add_view("pears", Rc::new(RecordingView::new("pears", &h.journal)))
        .unwrap();
    h.navigator.navigate_to("apples").unwrap();

    let gate = Rc::new(Gate {
        allow: RefCell::new(false),
        journal: Rc::clone(&h.journal),
    });
    h.navigator.add_view_change_listener(gate.clone());

    // the host already moved the indicator when the user clicked
    let mut store = h.store.clone();
    store.set_state("pears");

    let outcome = h.navigator.navigate_to("pears").unwrap();
    assert_eq!(outcome, NavigationOutcome::Vetoed);
    assert_eq!(h.store.state(), "apples");
    assert_eq!(h.navigator.navigation_state(), Some("apples"));
    assert_eq!(*h.shown.borrow(), 1);

    *gate.allow.borrow_mut() = true;
    assert_eq!(
        h.navigator.navigate_to("pears").unwrap(),
        NavigationOutcome::Rendered
    );
}

#[test]
fn test_removed_listener_is_not_consulted() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    let gate: Rc<dyn ViewChangeListener> = Rc::new(Gate {
        allow: RefCell::new(false),
        journal: Rc::clone(&h.journal),
    });
    h.navigator.add_view_change_listener(Rc::clone(&gate));
    h.navigator.remove_view_change_listener(&gate);

    assert_eq!(
        h.navigator.navigate_to("apples").unwrap(),
        NavigationOutcome::Rendered
    );
}

#[test]
fn test_revert_without_history_is_noop() {
    let mut h = harness();
    let mut store = h.store.clone();
    store.set_state("somewhere");

    h.navigator.revert_navigation();
    assert_eq!(h.store.state(), "somewhere");
    assert_eq!(h.store.writes(), 1);
}

#[test]
fn test_revert_restores_last_commit() {
    let mut h = harness();
    h.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &h.journal)))
        .unwrap();
    h.navigator.navigate_to("apples/9").unwrap();

    let mut store = h.store.clone();
    store.set_state("elsewhere");
    h.navigator.revert_navigation();

    assert_eq!(h.store.state(), "apples/9");
    assert_eq!(*h.shown.borrow(), 1);
}

// ============================================================================
// Independent Navigators
// ============================================================================

#[test]
fn test_navigators_do_not_share_state() {
    let mut a = harness();
    let mut b = harness();
    a.navigator
        .add_view("apples", Rc::new(RecordingView::new("apples", &a.journal)))
        .unwrap();
    b.navigator
        .add_view("pears", Rc::new(RecordingView::new("pears", &b.journal)))
        .unwrap();

    a.navigator.navigate_to("apples").unwrap();
    assert_eq!(b.navigator.navigation_state(), None);
    assert!(b.navigator.navigate_to("apples").is_err());
}
