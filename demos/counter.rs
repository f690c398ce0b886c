//! Counter
//!
//! This example demonstrates the basic update cycle.
//!
//! Key concepts:
//! - A pure reducer returning `Update` outcomes
//! - A side effect that dispatches a follow-up action
//! - `should_update` vetoing a state change
//!
//! Run with: cargo run --example counter

use stateful_component::core::update::{self, Update};
use stateful_component::{Component, ComponentBuilder, Provider};

#[derive(Clone, Debug, PartialEq)]
struct Counter {
    count: i32,
}

enum Action {
    Add,
    Sub,
    // Add twice: once now, once from the side effect
    AddTwice,
}

// Pure transition
fn reducer(state: &Counter, action: Action) -> Update<Counter, Action> {
    match action {
        Action::Add => update::state(Counter {
            count: state.count + 1,
        }),
        Action::Sub => update::state(Counter {
            count: state.count - 1,
        }),
        Action::AddTwice => update::state_and_side_effect(
            Counter {
                count: state.count + 1,
            },
            |dispatch, committed, _| {
                println!("  side effect sees count = {}", committed.count);
                dispatch.dispatch(Action::Add);
            },
        ),
    }
}

fn main() {
    println!("=== Counter ===\n");

    let counter = Component::new(|| {
        ComponentBuilder::<(), Counter, Action, String>::new()
            .display_name("Counter")
            .initial_state(|_| Counter { count: 0 })
            .reducer(reducer)
            .render(|me| format!("<button>{}</button>", me.state.count))
            // Never go below zero
            .should_update(|next, _| next.state.count >= 0)
            .build()
            .expect("counter definition is complete")
    });

    let instance = counter
        .mount((), &Provider::new().context())
        .expect("mounted under a provider");
    println!("initial: {}", instance.render());

    instance.dispatch(Action::Add);
    println!("after Add: {}", instance.render());

    instance.dispatch(Action::AddTwice);
    println!("after AddTwice: {}", instance.render());

    for _ in 0..5 {
        instance.dispatch(Action::Sub);
    }
    println!("after five Subs (clamped): {}", instance.render());

    instance.unmount();
    println!("\nphase: {:?}", instance.phase());
}
