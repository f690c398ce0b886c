//! Component factory and the per-instance update cycle.

use crate::core::{InstanceId, Refs, Snapshot};
use crate::effects::{
    CallSite, Context, SideEffect, SideEffectCall, SideEffectKind, SideEffectRunner,
};
use crate::runtime::definition::ComponentDef;
use crate::runtime::dispatch::{Dispatch, Dispatcher};
use crate::runtime::error::RuntimeError;
use crate::runtime::me::Me;
use crate::runtime::subscriptions::SubscriptionManager;
use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Lifecycle position of an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// State and variables seeded, not yet mounted.
    Constructed,
    Mounted,
    Unmounted,
}

/// Renderable component type produced from a definition.
///
/// The definition function is evaluated once per constructed instance, so
/// anything it closes over freshly is private to that instance.
pub struct Component<P, S, A, R, V = ()> {
    definition: Rc<dyn Fn() -> ComponentDef<P, S, A, R, V>>,
}

impl<P, S, A, R, V> Clone for Component<P, S, A, R, V> {
    fn clone(&self) -> Self {
        Self {
            definition: Rc::clone(&self.definition),
        }
    }
}

impl<P, S, A, R, V> fmt::Debug for Component<P, S, A, R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").finish_non_exhaustive()
    }
}

impl<P, S, A, R, V> Component<P, S, A, R, V>
where
    P: Clone + 'static,
    S: Clone + 'static,
    A: 'static,
    R: 'static,
    V: 'static,
{
    /// Component whose definition is produced by `definition` for each instance.
    pub fn new<F>(definition: F) -> Self
    where
        F: Fn() -> ComponentDef<P, S, A, R, V> + 'static,
    {
        Self {
            definition: Rc::new(definition),
        }
    }

    /// Component sharing one definition between all its instances.
    ///
    /// Only sound for definitions whose closures hold no mutable state: such
    /// state would be shared by every instance.
    pub fn from_definition(definition: ComponentDef<P, S, A, R, V>) -> Self {
        Self::new(move || definition.clone())
    }

    /// Build an instance without mounting it.
    ///
    /// Seeds state and variables from `props` and binds the dispatch handle.
    /// The side-effect runner is taken from `context`; if it has none, the
    /// first operation that needs one fails with `MissingProvider`.
    pub fn construct(&self, props: P, context: &Context) -> Instance<P, S, A, R, V> {
        let def = (self.definition)();
        let state = (def.initial_state)(&props);
        let vars = (def.vars)(&props);
        let subscriptions = SubscriptionManager::new(def.subscriptions.clone());
        let id = InstanceId::new();

        debug!(component = %def.display_name, instance = %id, "constructed");

        let core = Rc::new_cyclic(|weak: &Weak<Core<P, S, A, R, V>>| {
            let target: Weak<dyn Dispatcher<A>> = weak.clone();
            Core {
                id,
                runner: context.runner(),
                context: context.clone(),
                state: RefCell::new(state),
                props: RefCell::new(props),
                vars: RefCell::new(vars),
                refs: Refs::new(),
                dispatch: Dispatch::bound(target),
                subscriptions,
                phase: Cell::new(Phase::Constructed),
                queue: RefCell::new(VecDeque::new()),
                flushing: Cell::new(false),
                def,
            }
        });

        Instance { core }
    }

    /// Construct and mount an instance.
    pub fn mount(
        &self,
        props: P,
        context: &Context,
    ) -> Result<Instance<P, S, A, R, V>, RuntimeError> {
        let instance = self.construct(props, context);
        instance.mount()?;
        Ok(instance)
    }
}

/// A live component instance.
///
/// Owns the state, props, variables, refs and subscriptions of one
/// instance. Dropping a mounted instance unmounts it.
pub struct Instance<P, S, A, R, V = ()>
where
    P: Clone + 'static,
    S: Clone + 'static,
    A: 'static,
    R: 'static,
    V: 'static,
{
    core: Rc<Core<P, S, A, R, V>>,
}

impl<P, S, A, R, V> Instance<P, S, A, R, V>
where
    P: Clone + 'static,
    S: Clone + 'static,
    A: 'static,
    R: 'static,
    V: 'static,
{
    pub fn id(&self) -> InstanceId {
        self.core.id
    }

    pub fn display_name(&self) -> &str {
        &self.core.def.display_name
    }

    pub fn phase(&self) -> Phase {
        self.core.phase.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.phase() == Phase::Mounted
    }

    /// Register subscriptions, then run `did_mount`.
    pub fn mount(&self) -> Result<(), RuntimeError> {
        self.core.mount()
    }

    /// Release subscriptions, then run `will_unmount`. Idempotent.
    pub fn unmount(&self) {
        self.core.unmount()
    }

    /// The instance's dispatch handle. Every call returns the same handle.
    pub fn dispatcher(&self) -> Dispatch<A> {
        self.core.dispatch.clone()
    }

    /// See [`Dispatch::dispatch`].
    pub fn dispatch(&self, action: A) {
        self.core.dispatch.dispatch(action)
    }

    pub fn try_dispatch(&self, action: A) -> Result<(), RuntimeError> {
        self.core.dispatch.try_dispatch(action)
    }

    /// Deliver new props from the parent.
    pub fn receive_props(&self, props: P) -> Result<(), RuntimeError> {
        self.core.receive_props(props)
    }

    /// Render with the committed state and props.
    pub fn render(&self) -> R {
        self.core.render()
    }

    /// Copy of the committed state.
    pub fn state(&self) -> S {
        self.core.state.borrow().clone()
    }

    pub fn props(&self) -> P {
        self.core.props.borrow().clone()
    }

    pub fn refs(&self) -> &Refs {
        &self.core.refs
    }

    /// Instance variables.
    ///
    /// # Panics
    ///
    /// Panics if author code holds a mutable borrow of the variables.
    pub fn vars(&self) -> Ref<'_, V> {
        self.core.vars.borrow()
    }

    pub fn context(&self) -> &Context {
        &self.core.context
    }

    /// Subscriptions registered and not yet released.
    pub fn active_subscriptions(&self) -> usize {
        self.core.subscriptions.active()
    }
}

impl<P, S, A, R, V> Drop for Instance<P, S, A, R, V>
where
    P: Clone + 'static,
    S: Clone + 'static,
    A: 'static,
    R: 'static,
    V: 'static,
{
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        self.core.unmount();
    }
}

impl<P, S, A, R, V> fmt::Debug for Instance<P, S, A, R, V>
where
    P: Clone + 'static,
    S: Clone + 'static,
    A: 'static,
    R: 'static,
    V: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.core.id)
            .field("display_name", &self.core.def.display_name)
            .field("phase", &self.core.phase.get())
            .finish()
    }
}

struct Core<P, S, A, R, V> {
    id: InstanceId,
    def: ComponentDef<P, S, A, R, V>,
    context: Context,
    runner: Option<Rc<dyn SideEffectRunner>>,
    state: RefCell<S>,
    props: RefCell<P>,
    vars: RefCell<V>,
    refs: Refs,
    dispatch: Dispatch<A>,
    subscriptions: SubscriptionManager<A>,
    phase: Cell<Phase>,
    queue: RefCell<VecDeque<A>>,
    flushing: Cell<bool>,
}

/// Clears the flushing flag when the outermost flush ends, even by panic.
struct FlushGuard<'a>(&'a Cell<bool>);

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<P, S, A, R, V> Core<P, S, A, R, V>
where
    P: Clone + 'static,
    S: Clone + 'static,
    A: 'static,
    R: 'static,
    V: 'static,
{
    fn name(&self) -> &str {
        &self.def.display_name
    }

    fn runner(&self) -> Result<Rc<dyn SideEffectRunner>, RuntimeError> {
        self.runner.clone().ok_or_else(|| RuntimeError::MissingProvider {
            component: self.name().to_string(),
        })
    }

    fn unmounted(&self) -> RuntimeError {
        RuntimeError::Unmounted {
            component: self.name().to_string(),
        }
    }

    /// Run `f` with a view of the committed state and props.
    ///
    /// The view holds copies, so author code may dispatch or touch refs
    /// freely while it runs.
    fn with_me<T>(&self, f: impl FnOnce(&Me<'_, P, S, A, V>) -> T) -> T {
        let state = self.state.borrow().clone();
        let props = self.props.borrow().clone();
        let me = Me::new(
            Snapshot::new(&state, &props),
            &self.dispatch,
            &self.refs,
            &self.vars,
            &self.context,
            self.id,
        );
        f(&me)
    }

    /// Run `first`, then process queued actions until none are left.
    ///
    /// Nested calls only run `first`: actions they queue are picked up by
    /// the outermost flush, so each action sees the state left by the
    /// previous one.
    fn flush<T>(&self, first: impl FnOnce() -> T) -> T {
        if self.flushing.replace(true) {
            return first();
        }
        let _guard = FlushGuard(&self.flushing);

        let out = first();
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            self.process(action);
        }
        out
    }

    fn process(&self, action: A) {
        if self.phase.get() == Phase::Unmounted {
            trace!(component = %self.name(), instance = %self.id, "skipping action after unmount");
            return;
        }

        let update = {
            let current = self.state.borrow();
            (self.def.reducer)(&current, action)
        };
        debug!(
            component = %self.name(),
            instance = %self.id,
            outcome = update.name(),
            "reduced action"
        );

        let (next, effect) = update.into_parts();
        if let Some(next) = next {
            self.commit(next, None);
        }
        if let Some(effect) = effect {
            self.hand_off(SideEffectKind::Default, &effect);
        }
    }

    /// Offer `next` (and optionally new props) to `should_update`, then
    /// commit with the surrounding update hooks. Returns whether the
    /// candidate was accepted.
    fn commit(&self, next: S, next_props: Option<P>) -> bool {
        let next_props = next_props.unwrap_or_else(|| self.props.borrow().clone());

        let accepted = self.with_me(|me| {
            let candidate = Snapshot::new(&next, &next_props);
            let accepted = self
                .def
                .should_update
                .as_ref()
                .is_none_or(|should_update| should_update(candidate, me));
            if accepted {
                if let Some(will_update) = &self.def.will_update {
                    will_update(candidate, me);
                }
            }
            accepted
        });

        if !accepted {
            debug!(component = %self.name(), instance = %self.id, "should_update rejected state");
            return false;
        }

        let prev_state = self.state.replace(next);
        let prev_props = self.props.replace(next_props);
        trace!(component = %self.name(), instance = %self.id, "state committed");

        if let Some(did_update) = &self.def.did_update {
            self.with_me(|me| did_update(Snapshot::new(&prev_state, &prev_props), me));
        }
        true
    }

    fn hand_off(&self, kind: SideEffectKind, effect: &SideEffect<A, S>) {
        let Some(runner) = self.runner.as_deref() else {
            return;
        };
        let state = self.state.borrow().clone();

        debug!(component = %self.name(), instance = %self.id, kind = %kind, "side effect");
        SideEffectCall::hand_off(
            runner,
            CallSite {
                kind,
                component: self.name(),
                instance: self.id,
            },
            Some(effect),
            &self.dispatch,
            &state,
            &self.refs,
        );
    }

    fn mount(&self) -> Result<(), RuntimeError> {
        match self.phase.get() {
            Phase::Constructed => {}
            Phase::Mounted => {
                return Err(RuntimeError::AlreadyMounted {
                    component: self.name().to_string(),
                })
            }
            Phase::Unmounted => return Err(self.unmounted()),
        }
        self.runner()?;

        self.phase.set(Phase::Mounted);
        debug!(component = %self.name(), instance = %self.id, "mounting");

        self.flush(|| {
            let subscribe = self.subscriptions.subscribe_effect::<S>();
            self.hand_off(SideEffectKind::Subscription, &subscribe);

            if let Some(did_mount) = &self.def.did_mount {
                self.with_me(|me| did_mount(me));
            }
        });
        Ok(())
    }

    fn unmount(&self) {
        match self.phase.replace(Phase::Unmounted) {
            Phase::Mounted => {}
            Phase::Constructed | Phase::Unmounted => return,
        }
        debug!(component = %self.name(), instance = %self.id, "unmounting");

        self.flush(|| {
            let release = self.subscriptions.release_effect::<S>();
            self.hand_off(SideEffectKind::Subscription, &release);

            if let Some(will_unmount) = &self.def.will_unmount {
                self.with_me(|me| will_unmount(me));
            }
        });
        self.queue.borrow_mut().clear();
    }

    fn receive_props(&self, props: P) -> Result<(), RuntimeError> {
        if self.phase.get() == Phase::Unmounted {
            return Err(self.unmounted());
        }
        self.runner()?;

        self.flush(|| {
            let candidate = self
                .def
                .will_receive_props
                .as_ref()
                .and_then(|will_receive_props| self.with_me(|me| will_receive_props(&props, me)));
            let next = candidate.unwrap_or_else(|| self.state.borrow().clone());

            if !self.commit(next, Some(props.clone())) {
                self.props.replace(props);
            }
        });
        Ok(())
    }

    fn render(&self) -> R {
        self.flush(|| self.with_me(|me| (self.def.render)(me)))
    }
}

impl<P, S, A, R, V> Dispatcher<A> for Core<P, S, A, R, V>
where
    P: Clone + 'static,
    S: Clone + 'static,
    A: 'static,
    R: 'static,
    V: 'static,
{
    fn enqueue(&self, action: A) -> Result<(), RuntimeError> {
        if self.phase.get() == Phase::Unmounted {
            return Err(self.unmounted());
        }
        self.runner()?;

        self.queue.borrow_mut().push_back(action);
        trace!(component = %self.name(), instance = %self.id, "action queued");
        self.flush(|| ());
        Ok(())
    }
}
