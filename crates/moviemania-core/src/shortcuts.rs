use crate::keys::{Binding, KeyBinder};
use crate::session::Session;
use moviemania_sources::MovieProvider;
use tracing::debug;

pub const ENTER: &str = "Enter";
pub const ESCAPE: &str = "Escape";

/// Application keyboard shortcuts.
///
/// Enter is bound for the whole session: it focuses the search box and
/// clears the query unless the box already has focus. Escape is bound only
/// while a detail view is open and closes it.
pub struct Shortcuts<P: ?Sized + 'static> {
    binder: KeyBinder<Session<P>>,
    _enter: Binding,
    escape: Option<Binding>,
}

impl<P: MovieProvider + ?Sized + 'static> Shortcuts<P> {
    pub fn new() -> Self {
        let binder = KeyBinder::new();
        let enter = binder.bind(ENTER, |session: &mut Session<P>| {
            if session.is_search_focused() {
                return;
            }
            session.focus_search();
            // Empty query is below any minimum length, so no lookup is issued
            let _ = session.set_query("");
        });

        Self {
            binder,
            _enter: enter,
            escape: None,
        }
    }

    /// Bring the Escape binding in line with whether a detail view is open
    pub fn sync(&mut self, session: &Session<P>) {
        let open = session.detail_state().is_open();
        match (open, self.escape.is_some()) {
            (true, false) => {
                debug!("Detail view open, binding {}", ESCAPE);
                self.escape = Some(self.binder.bind(ESCAPE, |session: &mut Session<P>| session.close_detail()));
            }
            (false, true) => {
                debug!("Detail view closed, releasing {}", ESCAPE);
                self.escape = None;
            }
            _ => {}
        }
    }

    /// Deliver a key press. Returns the number of handlers that ran.
    pub fn press(&mut self, key: &str, session: &mut Session<P>) -> usize {
        self.sync(session);
        let invoked = self.binder.dispatch(key, session);
        self.sync(session);
        invoked
    }

    pub fn is_escape_bound(&self) -> bool {
        self.escape.is_some()
    }

    pub fn bound_count(&self) -> usize {
        self.binder.len()
    }
}

impl<P: MovieProvider + ?Sized + 'static> Default for Shortcuts<P> {
    fn default() -> Self {
        Self::new()
    }
}
