//! Per-instance named handles to rendered elements.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type Handle = Rc<dyn Any>;

/// Named element handles owned by one component instance.
///
/// `render` attaches handles as the host mounts real elements; side effects
/// and subscriptions read them back. Handles are opaque to this crate and are
/// recovered with [`Refs::get`] by their concrete type.
///
/// Cloning yields another view of the same table. Entries are never cleared
/// implicitly, only overwritten or unset.
///
/// # Example
///
/// ```rust
/// use stateful_component::core::Refs;
///
/// #[derive(Debug, PartialEq)]
/// struct ElementId(u32);
///
/// let refs = Refs::new();
/// refs.set("container", ElementId(7));
///
/// assert_eq!(refs.get::<ElementId>("container").as_deref(), Some(&ElementId(7)));
/// assert!(refs.get::<String>("container").is_none());
/// ```
#[derive(Clone, Default)]
pub struct Refs {
    slots: Rc<RefCell<HashMap<String, Option<Handle>>>>,
}

impl Refs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handle` under `key`, replacing any previous handle.
    pub fn set<T: Any>(&self, key: impl Into<String>, handle: T) {
        self.slots
            .borrow_mut()
            .insert(key.into(), Some(Rc::new(handle)));
    }

    /// Mark `key` as known but currently detached.
    pub fn unset(&self, key: impl Into<String>) {
        self.slots.borrow_mut().insert(key.into(), None);
    }

    /// Handle under `key`, if set and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<Rc<T>> {
        let slots = self.slots.borrow();
        let handle = slots.get(key)?.as_ref()?;
        Rc::clone(handle).downcast::<T>().ok()
    }

    pub fn is_set(&self, key: &str) -> bool {
        matches!(self.slots.borrow().get(key), Some(Some(_)))
    }

    /// All known keys, attached or not, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.slots.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// True if both values view the same table.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slots, &other.slots)
    }
}

impl fmt::Debug for Refs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        let mut map = f.debug_map();
        for key in self.keys() {
            let attached = matches!(slots.get(&key), Some(Some(_)));
            map.entry(&key, &attached);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_handle() {
        let refs = Refs::new();
        refs.set("input", 42u32);

        assert_eq!(refs.get::<u32>("input").as_deref(), Some(&42));
        assert!(refs.is_set("input"));
    }

    #[test]
    fn get_with_wrong_type_is_none() {
        let refs = Refs::new();
        refs.set("input", 42u32);

        assert!(refs.get::<String>("input").is_none());
    }

    #[test]
    fn unset_keeps_key_but_detaches_handle() {
        let refs = Refs::new();
        refs.set("input", 1u8);
        refs.unset("input");

        assert!(!refs.is_set("input"));
        assert!(refs.get::<u8>("input").is_none());
        assert_eq!(refs.keys(), vec!["input".to_string()]);
    }

    #[test]
    fn set_overwrites_previous_handle() {
        let refs = Refs::new();
        refs.set("container", "first");
        refs.set("container", "second");

        assert_eq!(refs.get::<&str>("container").as_deref(), Some(&"second"));
    }

    #[test]
    fn clones_share_the_same_table() {
        let refs = Refs::new();
        let view = refs.clone();
        view.set("button", 3i64);

        assert!(refs.ptr_eq(&view));
        assert!(refs.is_set("button"));
        assert!(!refs.ptr_eq(&Refs::new()));
    }
}
