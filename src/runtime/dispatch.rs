//! The instance-bound dispatch handle.

use crate::runtime::error::RuntimeError;
use std::fmt;
use std::rc::{Rc, Weak};

/// Receiver of dispatched actions.
pub(crate) trait Dispatcher<A> {
    fn enqueue(&self, action: A) -> Result<(), RuntimeError>;
}

enum Target<A> {
    Instance(Weak<dyn Dispatcher<A>>),
    Callback(Rc<dyn Fn(A)>),
    Detached,
}

/// Sends actions into an instance's update cycle.
///
/// One handle is bound per instance at construction; every clone refers to
/// the same instance, and [`Dispatch::ptr_eq`] stays true across the whole
/// lifetime of that instance. The handle does not keep the instance alive.
pub struct Dispatch<A> {
    target: Target<A>,
}

impl<A> Dispatch<A> {
    pub(crate) fn bound(target: Weak<dyn Dispatcher<A>>) -> Self {
        Self {
            target: Target::Instance(target),
        }
    }

    /// Handle that forwards every action to `f`.
    ///
    /// Useful to exercise a side effect or subscription on its own and
    /// observe what it dispatches.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            target: Target::Callback(Rc::new(f)),
        }
    }

    /// Handle bound to nothing; every dispatch fails with `InstanceDropped`.
    pub fn detached() -> Self {
        Self {
            target: Target::Detached,
        }
    }

    /// Send `action` to the bound instance.
    ///
    /// # Panics
    ///
    /// Panics if the instance was constructed without a provider, the same
    /// way a missing runtime is reported. Actions sent to an unmounted or
    /// dropped instance are discarded with a warning.
    pub fn dispatch(&self, action: A) {
        match self.try_dispatch(action) {
            Ok(()) => {}
            Err(err) if err.is_configuration() => panic!("{err}"),
            Err(err) => tracing::warn!(error = %err, "action discarded"),
        }
    }

    /// Send `action`, reporting why it could not be delivered.
    pub fn try_dispatch(&self, action: A) -> Result<(), RuntimeError> {
        match &self.target {
            Target::Instance(weak) => {
                let target = weak.upgrade().ok_or(RuntimeError::InstanceDropped)?;
                target.enqueue(action)
            }
            Target::Callback(f) => {
                f(action);
                Ok(())
            }
            Target::Detached => Err(RuntimeError::InstanceDropped),
        }
    }

    /// True if both handles deliver to the same place.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.target, &other.target) {
            (Target::Instance(a), Target::Instance(b)) => Weak::ptr_eq(a, b),
            (Target::Callback(a), Target::Callback(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<A> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        let target = match &self.target {
            Target::Instance(weak) => Target::Instance(Weak::clone(weak)),
            Target::Callback(f) => Target::Callback(Rc::clone(f)),
            Target::Detached => Target::Detached,
        };
        Self { target }
    }
}

impl<A> fmt::Debug for Dispatch<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            Target::Instance(weak) if weak.strong_count() > 0 => "instance",
            Target::Instance(_) => "dropped",
            Target::Callback(_) => "callback",
            Target::Detached => "detached",
        };
        f.debug_struct("Dispatch").field("target", &target).finish()
    }
}
