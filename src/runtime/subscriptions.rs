//! Mount-time subscriptions and their release at unmount.
//!
//! Registration and release are expressed as side effects so they travel
//! through the same channel as author side effects, tagged
//! `SideEffectKind::Subscription`. A runner that swallows them also prevents
//! the subscriptions from ever being registered.

use crate::effects::{SideEffect, Subscription, Teardown};
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Holds an instance's subscriptions and the teardowns of the active ones.
pub(crate) struct SubscriptionManager<A> {
    subscriptions: Rc<[Subscription<A>]>,
    active: Rc<RefCell<Vec<Teardown>>>,
}

impl<A: 'static> SubscriptionManager<A> {
    pub fn new(subscriptions: Vec<Subscription<A>>) -> Self {
        Self {
            subscriptions: subscriptions.into(),
            active: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Side effect that subscribes every entry and retains its teardown.
    pub fn subscribe_effect<S: 'static>(&self) -> SideEffect<A, S> {
        let subscriptions = Rc::clone(&self.subscriptions);
        let active = Rc::clone(&self.active);

        SideEffect::new(move |dispatch, _state, refs| {
            for subscription in subscriptions.iter() {
                let teardown = subscription.subscribe(dispatch, refs);
                active.borrow_mut().push(teardown);
            }
        })
    }

    /// Side effect that releases every retained teardown.
    ///
    /// Teardowns are taken out before any runs, so a second release finds
    /// nothing left to do. A panicking teardown does not stop the others;
    /// the first panic is resumed once all of them have run.
    pub fn release_effect<S: 'static>(&self) -> SideEffect<A, S> {
        let active = Rc::clone(&self.active);

        SideEffect::new(move |_, _, _| {
            let teardowns = std::mem::take(&mut *active.borrow_mut());
            let mut first_panic = None;
            for teardown in teardowns {
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| teardown.release())) {
                    first_panic.get_or_insert(payload);
                }
            }
            if let Some(payload) = first_panic {
                panic::resume_unwind(payload);
            }
        })
    }

    /// Number of subscriptions currently holding a teardown.
    pub fn active(&self) -> usize {
        self.active.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Refs;
    use crate::runtime::Dispatch;
    use std::cell::Cell;

    fn counting(releases: &Rc<Cell<usize>>) -> Subscription<()> {
        let releases = Rc::clone(releases);
        Subscription::new(move |_, _| {
            let releases = Rc::clone(&releases);
            Teardown::new(move || releases.set(releases.get() + 1))
        })
    }

    #[test]
    fn subscribe_then_release_runs_each_teardown_once() {
        let releases = Rc::new(Cell::new(0));
        let manager = SubscriptionManager::new(vec![counting(&releases), counting(&releases)]);
        let dispatch = Dispatch::detached();
        let refs = Refs::new();

        manager.subscribe_effect::<()>().call(&dispatch, &(), &refs);
        assert_eq!(manager.active(), 2);

        let release = manager.release_effect::<()>();
        release.call(&dispatch, &(), &refs);
        release.call(&dispatch, &(), &refs);

        assert_eq!(releases.get(), 2);
        assert_eq!(manager.active(), 0);
    }

    #[test]
    fn panicking_teardown_does_not_skip_the_rest() {
        let releases = Rc::new(Cell::new(0));
        let failing = Subscription::new(|_, _| Teardown::new(|| panic!("teardown failed")));
        let manager = SubscriptionManager::new(vec![
            failing,
            counting(&releases),
            counting(&releases),
        ]);
        let dispatch = Dispatch::detached();
        let refs = Refs::new();
        manager.subscribe_effect::<()>().call(&dispatch, &(), &refs);

        let release = manager.release_effect::<()>();
        let result = panic::catch_unwind(AssertUnwindSafe(|| release.call(&dispatch, &(), &refs)));

        assert!(result.is_err());
        assert_eq!(releases.get(), 2);
        assert_eq!(manager.active(), 0);
    }

    #[test]
    fn subscriptions_receive_dispatch_and_refs() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let manager = SubscriptionManager::new(vec![Subscription::new(
            move |dispatch: &Dispatch<&'static str>, refs: &Refs| {
                assert!(refs.is_set("root"));
                dispatch.dispatch("subscribed");
                Teardown::noop()
            },
        )]);
        let dispatch = Dispatch::from_fn(move |action| sink.borrow_mut().push(action));
        let refs = Refs::new();
        refs.set("root", 1u8);

        manager.subscribe_effect::<()>().call(&dispatch, &(), &refs);

        assert_eq!(*seen.borrow(), vec!["subscribed"]);
    }
}
