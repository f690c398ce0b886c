//! Property-based tests for reducers and the instance lifecycle.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use stateful_component::core::update::{self, Update};
use stateful_component::effects::Recorder;
use stateful_component::{Component, ComponentBuilder, Provider, Subscription, Teardown};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct Tally {
    total: i64,
    history: Vec<i64>,
}

#[derive(Clone, Debug)]
enum Action {
    Add(i64),
    Sub(i64),
    Reset,
    Noop,
}

fn reducer(state: &Tally, action: Action) -> Update<Tally, Action> {
    let apply = |delta: i64| {
        let mut history = state.history.clone();
        history.push(delta);
        Tally {
            total: state.total + delta,
            history,
        }
    };

    match action {
        Action::Add(n) => update::state(apply(n)),
        Action::Sub(n) => update::state(apply(-n)),
        Action::Reset => update::state_and_side_effect(
            Tally {
                total: 0,
                history: Vec::new(),
            },
            |_, _, _| {},
        ),
        Action::Noop => update::nothing(),
    }
}

prop_compose! {
    fn arbitrary_tally()(
        history in prop::collection::vec(-1_000i64..1_000, 0..20)
    ) -> Tally {
        Tally {
            total: history.iter().sum(),
            history,
        }
    }
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0i64..100).prop_map(Action::Add),
        (0i64..100).prop_map(Action::Sub),
        Just(Action::Reset),
        Just(Action::Noop),
    ]
}

fn tally() -> Component<(), Tally, Action, i64> {
    Component::new(|| {
        ComponentBuilder::new()
            .initial_state(|_| Tally {
                total: 0,
                history: Vec::new(),
            })
            .reducer(reducer)
            .render(|me| me.state.total)
            .build()
            .unwrap()
    })
}

proptest! {
    #[test]
    fn reducer_never_mutates_its_input(state in arbitrary_tally(), action in arbitrary_action()) {
        let before = state.clone();
        let _ = reducer(&state, action);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn reducer_is_deterministic(state in arbitrary_tally(), action in arbitrary_action()) {
        let first = reducer(&state, action.clone());
        let second = reducer(&state, action);

        prop_assert_eq!(update::get_state(&first), update::get_state(&second));
        prop_assert_eq!(first.name(), second.name());
    }

    #[test]
    fn total_matches_the_arithmetic(actions in prop::collection::vec(arbitrary_action(), 0..40)) {
        let instance = tally().mount((), &Provider::new().context()).unwrap();

        let mut expected = 0i64;
        for action in actions {
            expected = match action {
                Action::Add(n) => expected + n,
                Action::Sub(n) => expected - n,
                Action::Reset => 0,
                Action::Noop => expected,
            };
            instance.dispatch(action);
        }

        prop_assert_eq!(instance.render(), expected);
        prop_assert_eq!(instance.state().history.iter().sum::<i64>(), expected);
    }

    #[test]
    fn only_resets_reach_the_runner(actions in prop::collection::vec(arbitrary_action(), 0..40)) {
        let recorder = Recorder::new();
        let instance = tally().mount((), &recorder.context()).unwrap();

        let resets = actions.iter().filter(|a| matches!(a, Action::Reset)).count();
        for action in actions {
            instance.dispatch(action);
        }

        prop_assert_eq!(recorder.side_effects().len(), resets);
    }

    #[test]
    fn teardowns_run_exactly_once(
        count in 0usize..8,
        unmounts in 1usize..4,
        dispatches in 0usize..4,
    ) {
        let releases = Rc::new(RefCell::new(vec![0usize; count]));
        let component = {
            let releases = Rc::clone(&releases);
            Component::new(move || {
                let subscriptions: Vec<Subscription<Action>> = (0..count)
                    .map(|index| {
                        let releases = Rc::clone(&releases);
                        Subscription::new(move |_, _| {
                            let releases = Rc::clone(&releases);
                            Teardown::new(move || releases.borrow_mut()[index] += 1)
                        })
                    })
                    .collect();

                ComponentBuilder::<(), Tally, Action, i64>::new()
                    .initial_state(|_| Tally { total: 0, history: Vec::new() })
                    .reducer(reducer)
                    .render(|me| me.state.total)
                    .subscriptions(subscriptions)
                    .build()
                    .unwrap()
            })
        };

        let instance = component.mount((), &Provider::new().context()).unwrap();
        prop_assert_eq!(instance.active_subscriptions(), count);
        for _ in 0..dispatches {
            instance.dispatch(Action::Add(1));
        }
        for _ in 0..unmounts {
            instance.unmount();
        }
        drop(instance);

        prop_assert!(releases.borrow().iter().all(|&n| n == 1));
    }
}
