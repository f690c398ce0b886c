//! The view of an instance handed to `render` and lifecycle hooks.

use crate::core::{InstanceId, Refs, Snapshot};
use crate::effects::Context;
use crate::runtime::dispatch::Dispatch;
use std::cell::{Ref, RefCell, RefMut};

/// Everything author code may see of its own instance.
///
/// `state` and `props` are the values committed when the view was taken.
/// `refs` and the instance variables are live and may be written.
pub struct Me<'a, P, S, A, V = ()> {
    pub state: &'a S,
    pub props: &'a P,
    pub dispatch: &'a Dispatch<A>,
    pub refs: &'a Refs,
    vars: &'a RefCell<V>,
    context: &'a Context,
    instance: InstanceId,
}

impl<'a, P, S, A, V> Me<'a, P, S, A, V> {
    pub(crate) fn new(
        snapshot: Snapshot<'a, P, S>,
        dispatch: &'a Dispatch<A>,
        refs: &'a Refs,
        vars: &'a RefCell<V>,
        context: &'a Context,
        instance: InstanceId,
    ) -> Self {
        Self {
            state: snapshot.state,
            props: snapshot.props,
            dispatch,
            refs,
            vars,
            context,
            instance,
        }
    }

    /// Instance variables. Reading them never triggers a render.
    ///
    /// # Panics
    ///
    /// Panics if a `vars_mut` borrow is still alive.
    pub fn vars(&self) -> Ref<'a, V> {
        self.vars.borrow()
    }

    /// Mutable instance variables.
    ///
    /// # Panics
    ///
    /// Panics if any other borrow of the variables is still alive.
    pub fn vars_mut(&self) -> RefMut<'a, V> {
        self.vars.borrow_mut()
    }

    /// Context to hand to child instances mounted by this one.
    pub fn context(&self) -> &'a Context {
        self.context
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance
    }

    pub fn snapshot(&self) -> Snapshot<'a, P, S> {
        Snapshot::new(self.state, self.props)
    }
}
