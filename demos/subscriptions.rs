//! Subscriptions
//!
//! This example demonstrates mount-time subscriptions with a simulated
//! interval timer.
//!
//! Key concepts:
//! - Subscriptions registered on mount, released on unmount
//! - Teardowns running exactly once
//! - Recording the side-effect channel with a `Recorder`
//!
//! Run with: cargo run --example subscriptions

use stateful_component::core::update;
use stateful_component::effects::Recorder;
use stateful_component::{Component, ComponentBuilder, Dispatch, Teardown};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// A clock that only ticks when told to
#[derive(Clone, Default)]
struct Clock {
    timers: Rc<RefCell<Vec<(u32, Dispatch<Action>)>>>,
    next_id: Rc<Cell<u32>>,
}

impl Clock {
    fn set_interval(&self, dispatch: &Dispatch<Action>) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.timers.borrow_mut().push((id, dispatch.clone()));
        println!("  set_interval -> #{id}");
        id
    }

    fn clear_interval(&self, id: u32) {
        self.timers.borrow_mut().retain(|(timer, _)| *timer != id);
        println!("  clear_interval #{id}");
    }

    fn tick(&self) {
        let timers: Vec<Dispatch<Action>> = self
            .timers
            .borrow()
            .iter()
            .map(|(_, dispatch)| dispatch.clone())
            .collect();
        for dispatch in timers {
            dispatch.dispatch(Action::Tick);
        }
    }
}

enum Action {
    Tick,
}

fn main() {
    println!("=== Subscriptions ===\n");

    let clock = Clock::default();
    let ticker = {
        let clock = clock.clone();
        Component::new(move || {
            let clock = clock.clone();
            ComponentBuilder::<(), u32, Action, String>::new()
                .display_name("Ticker")
                .initial_state(|_| 0)
                .reducer(|seconds, Action::Tick| update::state(seconds + 1))
                .render(|me| format!("{}s elapsed", me.state))
                .subscribe(move |dispatch, _refs| {
                    let id = clock.set_interval(dispatch);
                    let clock = clock.clone();
                    Teardown::new(move || clock.clear_interval(id))
                })
                .did_mount(|_| println!("  did_mount"))
                .will_unmount(|_| println!("  will_unmount"))
                .build()
                .expect("ticker definition is complete")
        })
    };

    let recorder = Recorder::passthrough();
    println!("mount:");
    let instance = ticker
        .mount((), &recorder.context())
        .expect("mounted under a provider");

    for _ in 0..3 {
        clock.tick();
    }
    println!("after three ticks: {}", instance.render());

    println!("unmount:");
    instance.unmount();
    instance.unmount();

    clock.tick();
    println!("after unmount and another tick: {}", instance.render());

    println!("\nchannel log:");
    for call in recorder.calls() {
        println!("  {} from {}", call.kind, call.component);
    }
}
