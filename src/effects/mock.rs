//! Runners for tests: intercept side effects instead of executing them.
//!
//! # Example
//!
//! ```rust
//! use stateful_component::builder::ComponentBuilder;
//! use stateful_component::core::update;
//! use stateful_component::effects::{Recorder, SideEffectKind};
//! use stateful_component::runtime::Component;
//!
//! let counter = Component::new(|| {
//!     ComponentBuilder::<(), u32, (), u32>::new()
//!         .initial_state(|_| 0)
//!         .reducer(|count, _| {
//!             update::state_and_side_effect(count + 1, |_, _, _| panic!("never executed"))
//!         })
//!         .render(|me| *me.state)
//!         .build()
//!         .expect("complete definition")
//! });
//!
//! let recorder = Recorder::new();
//! let instance = counter.mount((), &recorder.context()).unwrap();
//! instance.dispatch(());
//!
//! assert_eq!(instance.render(), 1);
//! let calls = recorder.side_effects();
//! assert_eq!(calls.len(), 1);
//! assert_eq!(calls[0].kind, SideEffectKind::Default);
//! ```

use crate::core::InstanceId;
use crate::effects::channel::{Context, Provider, SideEffectCall, SideEffectRunner};
use crate::effects::side_effect::SideEffectKind;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type MockRunner = Rc<dyn Fn(&SideEffectCall<'_>)>;

/// Provider for tests that never executes anything by itself.
///
/// Every call, subscription plumbing included, goes to the mock runner if
/// one is set and is otherwise dropped.
#[derive(Clone, Default)]
pub struct MockProvider {
    mock_runner: Option<MockRunner>,
}

impl MockProvider {
    /// Mock that swallows every call.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runner<F>(mock_runner: F) -> Self
    where
        F: Fn(&SideEffectCall<'_>) + 'static,
    {
        Self {
            mock_runner: Some(Rc::new(mock_runner)),
        }
    }

    pub fn provider(&self) -> Provider {
        Provider::with_runner(self.clone())
    }

    pub fn context(&self) -> Context {
        self.provider().context()
    }
}

impl SideEffectRunner for MockProvider {
    fn run(&self, call: &SideEffectCall<'_>) {
        if let Some(mock_runner) = &self.mock_runner {
            mock_runner(call);
        }
    }
}

impl From<MockProvider> for Provider {
    fn from(mock: MockProvider) -> Self {
        Provider::with_runner(mock)
    }
}

impl fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockProvider")
            .field("has_runner", &self.mock_runner.is_some())
            .finish()
    }
}

/// One call observed by a [`Recorder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedCall {
    pub kind: SideEffectKind,
    pub component: String,
    pub instance: InstanceId,
    pub empty: bool,
}

/// Runner that records every call and optionally executes it.
///
/// By default nothing is executed. Clones share the same log.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<RecordedCall>>>,
    run_side_effects: bool,
    run_subscriptions: bool,
}

impl Recorder {
    /// Record only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and execute everything.
    pub fn passthrough() -> Self {
        Self::new().run_side_effects(true).run_subscriptions(true)
    }

    /// Execute reducer side effects after recording them.
    pub fn run_side_effects(mut self, run: bool) -> Self {
        self.run_side_effects = run;
        self
    }

    /// Execute subscription registration and release after recording them.
    pub fn run_subscriptions(mut self, run: bool) -> Self {
        self.run_subscriptions = run;
        self
    }

    pub fn provider(&self) -> Provider {
        Provider::with_runner(self.clone())
    }

    pub fn context(&self) -> Context {
        self.provider().context()
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Recorded non-empty calls produced by reducers.
    pub fn side_effects(&self) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.kind == SideEffectKind::Default && !call.empty)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl SideEffectRunner for Recorder {
    fn run(&self, call: &SideEffectCall<'_>) {
        self.calls.borrow_mut().push(RecordedCall {
            kind: call.kind(),
            component: call.component().to_string(),
            instance: call.instance(),
            empty: call.is_empty(),
        });

        let execute = match call.kind() {
            SideEffectKind::Default => self.run_side_effects,
            SideEffectKind::Subscription => self.run_subscriptions,
        };
        if execute {
            call.run();
        }
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("calls", &self.len())
            .field("run_side_effects", &self.run_side_effects)
            .field("run_subscriptions", &self.run_subscriptions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ComponentBuilder;
    use crate::core::update;
    use crate::effects::{SideEffect, Subscription, Teardown};
    use crate::runtime::{Component, Dispatch};
    use std::cell::Cell;

    #[derive(Clone, Debug, PartialEq)]
    struct Doc {
        content: String,
    }

    enum Action {
        Save,
    }

    fn saving_component(fx: SideEffect<Action, Doc>) -> Component<(), Doc, Action, String> {
        Component::new(move || {
            let fx = fx.clone();
            ComponentBuilder::new()
                .display_name("Editor")
                .initial_state(|_| Doc {
                    content: "initial".to_string(),
                })
                .reducer(move |_, Action::Save| {
                    update::Update::StateAndSideEffect(
                        Doc {
                            content: "saved".to_string(),
                        },
                        fx.clone(),
                    )
                })
                .render(|me| me.state.content.clone())
                .build()
                .unwrap()
        })
    }

    #[test]
    fn mock_provider_swallows_by_default() {
        let executed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&executed);
        let component = saving_component(SideEffect::new(move |_, _, _| flag.set(true)));

        let instance = component.mount((), &MockProvider::new().context()).unwrap();
        instance.dispatch(Action::Save);

        assert_eq!(instance.render(), "saved");
        assert!(!executed.get());
    }

    #[test]
    fn mock_runner_intercepts_a_specific_side_effect() {
        let executed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&executed);
        let fx: SideEffect<Action, Doc> = SideEffect::new(move |_, _, _| flag.set(true));
        let component = saving_component(fx.clone());

        let intercepted = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&intercepted);
        let mock = MockProvider::with_runner(move |call: &SideEffectCall<'_>| {
            if let Some(produced) = call.side_effect::<Action, Doc>() {
                if produced.ptr_eq(&fx) {
                    let state = call.state::<Doc>().unwrap().clone();
                    assert!(call.dispatch::<Action>().is_some());
                    log.borrow_mut().push(state);
                }
            }
        });

        let instance = component.mount((), &mock.context()).unwrap();
        instance.dispatch(Action::Save);

        assert!(!executed.get());
        assert_eq!(
            *intercepted.borrow(),
            vec![Doc {
                content: "saved".to_string()
            }]
        );
    }

    #[test]
    fn mock_runner_sees_the_instance_dispatch_handle() {
        let handles: Rc<RefCell<Vec<Dispatch<Action>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&handles);
        let mock = MockProvider::with_runner(move |call: &SideEffectCall<'_>| {
            if !call.is_subscription() {
                sink.borrow_mut().push(call.dispatch::<Action>().unwrap().clone());
            }
        });
        let component = saving_component(SideEffect::new(|_, _, _| {}));

        let instance = component.mount((), &mock.context()).unwrap();
        instance.dispatch(Action::Save);

        assert_eq!(handles.borrow().len(), 1);
        assert!(handles.borrow()[0].ptr_eq(&instance.dispatcher()));
    }

    #[test]
    fn recorder_tags_subscription_plumbing() {
        let recorder = Recorder::new();
        let component: Component<(), u8, (), ()> = Component::new(|| {
            ComponentBuilder::new()
                .initial_state(|_| 0)
                .reducer(|_, _| update::nothing())
                .render(|_| ())
                .subscription(Subscription::new(|_, _| Teardown::noop()))
                .build()
                .unwrap()
        });

        let instance = component.mount((), &recorder.context()).unwrap();
        instance.unmount();

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.kind == SideEffectKind::Subscription));
        assert_eq!(calls[0].component, "StatefulComponent");
        assert!(recorder.side_effects().is_empty());
    }

    #[test]
    fn recorded_calls_serialize_to_json() {
        let call = RecordedCall {
            kind: SideEffectKind::Default,
            component: "Editor".to_string(),
            instance: InstanceId::new(),
            empty: false,
        };

        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["kind"], "default");
        assert_eq!(json["component"], "Editor");

        let back: RecordedCall = serde_json::from_value(json).unwrap();
        assert_eq!(back, call);
    }

    #[test]
    fn passthrough_recorder_executes() {
        let executed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&executed);
        let component = saving_component(SideEffect::new(move |_, _, _| flag.set(true)));
        let recorder = Recorder::passthrough();

        let instance = component.mount((), &recorder.context()).unwrap();
        instance.dispatch(Action::Save);

        assert!(executed.get());
        assert_eq!(recorder.side_effects().len(), 1);
        recorder.clear();
        assert!(recorder.is_empty());
    }
}
