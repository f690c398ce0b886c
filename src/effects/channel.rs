//! The side-effect channel: how produced side effects get executed.
//!
//! Producing a side effect (a reducer returning one) is decoupled from
//! executing it. Every instance hands its side effects to the
//! [`SideEffectRunner`] installed by the nearest [`Provider`], carried down
//! the tree in a [`Context`]. The default runner simply executes them; a mock
//! runner can observe, filter or swallow them instead.

use crate::core::{InstanceId, Refs};
use crate::effects::side_effect::{SideEffect, SideEffectKind};
use crate::runtime::Dispatch;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// One side effect handed to the channel, with everything needed to run it.
///
/// Typed parts are erased so a single runner can serve components of any
/// state and action type. Recover them with [`SideEffectCall::state`],
/// [`SideEffectCall::dispatch`] and [`SideEffectCall::side_effect`].
pub struct SideEffectCall<'a> {
    kind: SideEffectKind,
    component: &'a str,
    instance: InstanceId,
    effect: Option<&'a dyn Any>,
    dispatch: &'a dyn Any,
    state: &'a dyn Any,
    refs: &'a Refs,
    invoke: &'a dyn Fn(),
}

/// Where a channel call comes from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CallSite<'a> {
    pub kind: SideEffectKind,
    pub component: &'a str,
    pub instance: InstanceId,
}

impl<'a> SideEffectCall<'a> {
    /// Build the call for `effect` and hand it to `runner`.
    pub(crate) fn hand_off<A: 'static, S: 'static>(
        runner: &dyn SideEffectRunner,
        site: CallSite<'_>,
        effect: Option<&SideEffect<A, S>>,
        dispatch: &Dispatch<A>,
        state: &S,
        refs: &Refs,
    ) {
        let invoke = || {
            if let Some(fx) = effect {
                fx.call(dispatch, state, refs);
            }
        };

        let call = SideEffectCall {
            kind: site.kind,
            component: site.component,
            instance: site.instance,
            effect: effect.map(|fx| fx as &dyn Any),
            dispatch,
            state,
            refs,
            invoke: &invoke,
        };

        runner.run(&call);
    }

    pub fn kind(&self) -> SideEffectKind {
        self.kind
    }

    pub fn is_subscription(&self) -> bool {
        self.kind == SideEffectKind::Subscription
    }

    /// Display name of the component that produced the call.
    pub fn component(&self) -> &str {
        self.component
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// True if there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.effect.is_none()
    }

    /// The side effect itself, if present and of the given types.
    pub fn side_effect<A: 'static, S: 'static>(&self) -> Option<&SideEffect<A, S>> {
        self.effect?.downcast_ref()
    }

    /// The producing instance's dispatch handle, if its action type is `A`.
    pub fn dispatch<A: 'static>(&self) -> Option<&Dispatch<A>> {
        self.dispatch.downcast_ref()
    }

    /// The committed state the side effect will see, if its type is `S`.
    pub fn state<S: 'static>(&self) -> Option<&S> {
        self.state.downcast_ref()
    }

    pub fn refs(&self) -> &Refs {
        self.refs
    }

    /// Execute the side effect. No-op when the call is empty.
    pub fn run(&self) {
        (self.invoke)()
    }
}

impl fmt::Debug for SideEffectCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffectCall")
            .field("kind", &self.kind)
            .field("component", &self.component)
            .field("instance", &self.instance)
            .field("empty", &self.is_empty())
            .finish()
    }
}

/// Executes (or intercepts) side effects handed to the channel.
pub trait SideEffectRunner {
    fn run(&self, call: &SideEffectCall<'_>);
}

impl<F> SideEffectRunner for F
where
    F: Fn(&SideEffectCall<'_>),
{
    fn run(&self, call: &SideEffectCall<'_>) {
        self(call)
    }
}

/// The production runner: executes every non-empty call immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunSideEffect;

impl SideEffectRunner for RunSideEffect {
    fn run(&self, call: &SideEffectCall<'_>) {
        call.run();
    }
}

/// Installs a side-effect runner for a subtree of instances.
///
/// Instances built from [`Provider::context`] (or any context derived from
/// it) hand their side effects to this provider's runner.
#[derive(Clone)]
pub struct Provider {
    runner: Rc<dyn SideEffectRunner>,
}

impl Provider {
    /// Provider that runs side effects with [`RunSideEffect`].
    pub fn new() -> Self {
        Self::with_runner(RunSideEffect)
    }

    pub fn with_runner<R>(runner: R) -> Self
    where
        R: SideEffectRunner + 'static,
    {
        Self {
            runner: Rc::new(runner),
        }
    }

    /// Root context for the subtree this provider covers.
    pub fn context(&self) -> Context {
        Context::new().provide(self)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").finish_non_exhaustive()
    }
}

/// Ambient values visible to an instance and everything it renders.
///
/// Passed explicitly to each instance at construction; a parent hands its
/// own context (see `Me::context`) to the children it mounts.
#[derive(Clone, Default)]
pub struct Context {
    runner: Option<Rc<dyn SideEffectRunner>>,
}

impl Context {
    /// A context with no provider installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context whose subtree uses `provider`.
    pub fn provide(&self, provider: &Provider) -> Self {
        Self {
            runner: Some(Rc::clone(&provider.runner)),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.runner.is_some()
    }

    pub(crate) fn runner(&self) -> Option<Rc<dyn SideEffectRunner>> {
        self.runner.clone()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("has_provider", &self.has_provider())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn empty_context_has_no_provider() {
        assert!(!Context::new().has_provider());
        assert!(Provider::new().context().has_provider());
    }

    #[test]
    fn provide_overrides_runner_for_subtree() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let outer = Provider::new().context();
        let mock = Provider::with_runner(move |_call: &SideEffectCall<'_>| {
            counter.set(counter.get() + 1)
        });

        let inner = outer.provide(&mock);
        let runner = inner.runner().unwrap();
        let dispatch: Dispatch<()> = Dispatch::detached();
        let refs = Refs::new();

        SideEffectCall::hand_off::<(), ()>(
            runner.as_ref(),
            CallSite {
                kind: SideEffectKind::Default,
                component: "Probe",
                instance: InstanceId::new(),
            },
            None,
            &dispatch,
            &(),
            &refs,
        );

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn default_runner_executes_the_effect_with_typed_parts() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let fx: SideEffect<(), u32> = SideEffect::new(move |_, state, _| sink.set(*state));
        let dispatch: Dispatch<()> = Dispatch::detached();
        let refs = Refs::new();

        SideEffectCall::hand_off(
            &RunSideEffect,
            CallSite {
                kind: SideEffectKind::Default,
                component: "Probe",
                instance: InstanceId::new(),
            },
            Some(&fx),
            &dispatch,
            &7u32,
            &refs,
        );

        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn call_exposes_typed_parts_to_runner() {
        let fx: SideEffect<(), u32> = SideEffect::new(|_, _, _| {});
        let dispatch: Dispatch<()> = Dispatch::detached();
        let refs = Refs::new();
        let checked = Rc::new(Cell::new(false));
        let flag = Rc::clone(&checked);
        let expected = fx.clone();

        let runner = move |call: &SideEffectCall<'_>| {
            assert_eq!(call.kind(), SideEffectKind::Default);
            assert_eq!(call.component(), "Probe");
            assert_eq!(call.state::<u32>(), Some(&3));
            assert!(call.state::<String>().is_none());
            assert!(call.dispatch::<()>().is_some());
            assert!(call.side_effect::<(), u32>().unwrap().ptr_eq(&expected));
            assert!(!call.is_empty());
            flag.set(true);
        };

        SideEffectCall::hand_off(
            &runner,
            CallSite {
                kind: SideEffectKind::Default,
                component: "Probe",
                instance: InstanceId::new(),
            },
            Some(&fx),
            &dispatch,
            &3u32,
            &refs,
        );

        assert!(checked.get());
    }
}
