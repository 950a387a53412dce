use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::trace;

type Handler<C> = Rc<RefCell<Box<dyn FnMut(&mut C)>>>;

struct Registration<C> {
    id: u64,
    key: String,
    handler: Handler<C>,
}

struct Registry<C> {
    next_id: u64,
    entries: Vec<Registration<C>>,
}

impl<C> Registry<C> {
    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Key-press listener registry.
///
/// `bind` returns a [`Binding`]; the handler stays registered exactly as long
/// as the binding is alive. `C` is the context handed to handlers on dispatch.
pub struct KeyBinder<C> {
    registry: Rc<RefCell<Registry<C>>>,
}

impl<C: 'static> KeyBinder<C> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn bind(&self, key: &str, handler: impl FnMut(&mut C) + 'static) -> Binding {
        let key = normalize_key(key);
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push(Registration {
                id,
                key: key.clone(),
                handler: Rc::new(RefCell::new(Box::new(handler))),
            });
            id
        };
        trace!("Bound key {:?} (binding {})", key, id);

        let registry: Weak<RefCell<Registry<C>>> = Rc::downgrade(&self.registry);
        Binding {
            id,
            key,
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Deliver one key press. Returns the number of handlers invoked.
    ///
    /// Key names compare case-insensitively. Handlers may drop other bindings;
    /// a binding released during dispatch is not invoked afterwards.
    pub fn dispatch(&self, key: &str, ctx: &mut C) -> usize {
        let key = normalize_key(key);
        let matching: Vec<(u64, Handler<C>)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.key == key)
            .map(|entry| (entry.id, Rc::clone(&entry.handler)))
            .collect();

        let mut invoked = 0;
        for (id, handler) in matching {
            if !self.is_registered(id) {
                continue;
            }
            (handler.borrow_mut())(ctx);
            invoked += 1;
        }
        invoked
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_registered(&self, id: u64) -> bool {
        self.registry.borrow().entries.iter().any(|entry| entry.id == id)
    }
}

impl<C: 'static> Default for KeyBinder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for one registered key handler. Dropping it unregisters the handler.
pub struct Binding {
    id: u64,
    key: String,
    release: Option<Box<dyn FnOnce()>>,
}

impl Binding {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unbind(self) {
        drop(self);
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            trace!("Unbound key {:?} (binding {})", self.key, self.id);
            release();
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").field("id", &self.id).field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_invokes_once_per_press() {
        let binder = KeyBinder::<u32>::new();
        let _binding = binder.bind("Escape", |count| *count += 1);

        let mut count = 0;
        assert_eq!(binder.dispatch("Escape", &mut count), 1);
        assert_eq!(binder.dispatch("escape", &mut count), 1);
        assert_eq!(binder.dispatch("Enter", &mut count), 0);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_key_names_are_case_insensitive() {
        let binder = KeyBinder::<Vec<&'static str>>::new();
        let _binding = binder.bind("enter", |log| log.push("enter"));

        let mut log = Vec::new();
        binder.dispatch("ENTER", &mut log);
        binder.dispatch("Enter", &mut log);
        assert_eq!(log, vec!["enter", "enter"]);
    }

    #[test]
    fn test_drop_unregisters() {
        let binder = KeyBinder::<u32>::new();
        let binding = binder.bind("Escape", |count| *count += 1);
        assert_eq!(binder.len(), 1);

        binding.unbind();
        assert!(binder.is_empty());

        let mut count = 0;
        assert_eq!(binder.dispatch("Escape", &mut count), 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_rebind_does_not_duplicate() {
        let binder = KeyBinder::<Vec<u8>>::new();
        let first = binder.bind("Escape", |log| log.push(1));
        drop(first);
        let binding = binder.bind("Escape", |log| log.push(2));
        assert_eq!(binder.len(), 1);

        let mut log = Vec::new();
        binder.dispatch("Escape", &mut log);
        assert_eq!(log, vec![2]);
        assert_eq!(binding.key(), "escape");
    }

    #[test]
    fn test_binding_outlives_binder() {
        let binder = KeyBinder::<u32>::new();
        let binding = binder.bind("Escape", |_| {});
        drop(binder);
        // Releasing against a dropped registry is a no-op
        drop(binding);
    }
}
