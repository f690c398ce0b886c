//! Side-effect, subscription and teardown values.

use crate::core::Refs;
use crate::runtime::Dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Deferred work produced by a reducer.
///
/// A side effect runs after the state commit of the dispatch that produced
/// it, with the instance's dispatch handle, the committed state and the
/// instance refs. It may dispatch again, which restarts the update cycle.
///
/// Cloning shares the same closure, so [`SideEffect::ptr_eq`] can be used
/// to recognise a particular side effect in a mock runner.
pub struct SideEffect<A, S> {
    run: Rc<dyn Fn(&Dispatch<A>, &S, &Refs)>,
}

impl<A, S> SideEffect<A, S> {
    /// Wrap a closure as a side effect.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Dispatch<A>, &S, &Refs) + 'static,
    {
        Self { run: Rc::new(f) }
    }

    /// Execute the side effect. Any panic propagates to the caller.
    pub fn call(&self, dispatch: &Dispatch<A>, state: &S, refs: &Refs) {
        (self.run)(dispatch, state, refs)
    }

    /// True if both values wrap the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.run, &other.run)
    }
}

impl<A, S> Clone for SideEffect<A, S> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<A, S> fmt::Debug for SideEffect<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffect")
            .field("ptr", &Rc::as_ptr(&self.run).cast::<()>())
            .finish()
    }
}

/// Origin of a side effect handed to the channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffectKind {
    /// Produced by a reducer.
    Default,

    /// Internal subscription registration or release.
    Subscription,
}

impl SideEffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for SideEffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release function returned by a subscription.
///
/// Consumed on release, so it can only ever run once.
pub struct Teardown {
    release: Box<dyn FnOnce()>,
}

impl Teardown {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            release: Box::new(f),
        }
    }

    /// A teardown that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn release(self) {
        (self.release)()
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown").finish_non_exhaustive()
    }
}

/// External event source registered for the lifetime of a mounted instance.
///
/// Invoked once at mount with the instance's dispatch handle and refs; the
/// returned [`Teardown`] is held until unmount.
pub struct Subscription<A> {
    subscribe: Rc<dyn Fn(&Dispatch<A>, &Refs) -> Teardown>,
}

impl<A> Subscription<A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Dispatch<A>, &Refs) -> Teardown + 'static,
    {
        Self {
            subscribe: Rc::new(f),
        }
    }

    pub fn subscribe(&self, dispatch: &Dispatch<A>, refs: &Refs) -> Teardown {
        (self.subscribe)(dispatch, refs)
    }
}

impl<A> Clone for Subscription<A> {
    fn clone(&self) -> Self {
        Self {
            subscribe: Rc::clone(&self.subscribe),
        }
    }
}

impl<A> fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
