//! The record describing a stateful component.

use crate::core::{Snapshot, Update};
use crate::effects::Subscription;
use crate::runtime::me::Me;
use std::rc::Rc;

/// Display name used when a definition does not set one.
pub const DEFAULT_DISPLAY_NAME: &str = "StatefulComponent";

pub type InitialStateFn<P, S> = Rc<dyn Fn(&P) -> S>;
pub type ReducerFn<S, A> = Rc<dyn Fn(&S, A) -> Update<S, A>>;
pub type RenderFn<P, S, A, R, V> = Rc<dyn Fn(&Me<'_, P, S, A, V>) -> R>;
pub type VarsFn<P, V> = Rc<dyn Fn(&P) -> V>;
pub type LifecycleHook<P, S, A, V> = Rc<dyn Fn(&Me<'_, P, S, A, V>)>;
pub type UpdateHook<P, S, A, V> = Rc<dyn Fn(Snapshot<'_, P, S>, &Me<'_, P, S, A, V>)>;
pub type ShouldUpdateFn<P, S, A, V> = Rc<dyn Fn(Snapshot<'_, P, S>, &Me<'_, P, S, A, V>) -> bool>;
pub type WillReceivePropsFn<P, S, A, V> = Rc<dyn Fn(&P, &Me<'_, P, S, A, V>) -> Option<S>>;

/// Author-supplied description of a component.
///
/// `P` props, `S` state, `A` actions, `R` render output, `V` instance
/// variables. Usually assembled with `ComponentBuilder`.
pub struct ComponentDef<P, S, A, R, V = ()> {
    pub display_name: String,

    /// Seeds the state of each new instance.
    pub initial_state: InitialStateFn<P, S>,

    /// Pure transition. Must not touch anything but its arguments.
    pub reducer: ReducerFn<S, A>,

    pub render: RenderFn<P, S, A, R, V>,

    /// Creates the instance variables once per instance.
    pub vars: VarsFn<P, V>,

    /// Registered at mount, released at unmount.
    pub subscriptions: Vec<Subscription<A>>,

    pub did_mount: Option<LifecycleHook<P, S, A, V>>,
    pub will_unmount: Option<LifecycleHook<P, S, A, V>>,

    /// Called before new props take effect. A returned state replaces the
    /// current one without going through the reducer.
    pub will_receive_props: Option<WillReceivePropsFn<P, S, A, V>>,

    /// Receives the candidate snapshot before a commit.
    pub will_update: Option<UpdateHook<P, S, A, V>>,

    /// Receives the previous snapshot after a commit.
    pub did_update: Option<UpdateHook<P, S, A, V>>,

    /// Returning false discards the candidate state. Absent means always true.
    pub should_update: Option<ShouldUpdateFn<P, S, A, V>>,
}

impl<P, S, A, R, V> Clone for ComponentDef<P, S, A, R, V> {
    fn clone(&self) -> Self {
        Self {
            display_name: self.display_name.clone(),
            initial_state: Rc::clone(&self.initial_state),
            reducer: Rc::clone(&self.reducer),
            render: Rc::clone(&self.render),
            vars: Rc::clone(&self.vars),
            subscriptions: self.subscriptions.clone(),
            did_mount: self.did_mount.clone(),
            will_unmount: self.will_unmount.clone(),
            will_receive_props: self.will_receive_props.clone(),
            will_update: self.will_update.clone(),
            did_update: self.did_update.clone(),
            should_update: self.should_update.clone(),
        }
    }
}

impl<P, S, A, R, V> std::fmt::Debug for ComponentDef<P, S, A, R, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDef")
            .field("display_name", &self.display_name)
            .field("subscriptions", &self.subscriptions.len())
            .field("did_mount", &self.did_mount.is_some())
            .field("will_unmount", &self.will_unmount.is_some())
            .field("will_receive_props", &self.will_receive_props.is_some())
            .field("will_update", &self.will_update.is_some())
            .field("did_update", &self.did_update.is_some())
            .field("should_update", &self.should_update.is_some())
            .finish()
    }
}
