//! Todo List
//!
//! This example demonstrates props, instance variables and refs, and
//! testing side effects with a mock provider.
//!
//! Key concepts:
//! - `will_receive_props` resetting state when the parent changes props
//! - Instance variables that survive renders without causing them
//! - A side effect reading a ref attached during render
//! - Intercepting one specific side effect with `MockProvider`
//!
//! Run with: cargo run --example todo

use stateful_component::core::update::{self, Update};
use stateful_component::{
    Component, ComponentBuilder, MockProvider, Provider, SideEffect, SideEffectCall,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
struct ListProps {
    title: String,
}

#[derive(Clone, Debug, PartialEq)]
struct Todos {
    items: Vec<String>,
    draft: String,
}

enum Action {
    Type(String),
    Submit,
    Clear,
}

#[derive(Default)]
struct Vars {
    renders: usize,
}

// Element handle attached by render
#[derive(Debug)]
struct InputElement {
    id: u32,
}

fn focus_input() -> SideEffect<Action, Todos> {
    SideEffect::new(|_, _, refs| {
        if let Some(input) = refs.get::<InputElement>("input") {
            println!("  focus input #{}", input.id);
        }
    })
}

fn reducer(
    focus: &SideEffect<Action, Todos>,
    state: &Todos,
    action: Action,
) -> Update<Todos, Action> {
    match action {
        Action::Type(text) => update::state(Todos {
            items: state.items.clone(),
            draft: text,
        }),
        Action::Submit if state.draft.trim().is_empty() => update::nothing(),
        Action::Submit => {
            let mut items = state.items.clone();
            items.push(state.draft.clone());
            Update::StateAndSideEffect(
                Todos {
                    items,
                    draft: String::new(),
                },
                focus.clone(),
            )
        }
        Action::Clear => update::state(Todos {
            items: Vec::new(),
            draft: String::new(),
        }),
    }
}

fn todo_list(
    focus: SideEffect<Action, Todos>,
) -> Component<ListProps, Todos, Action, String, Vars> {
    Component::new(move || {
        let focus = focus.clone();
        ComponentBuilder::new()
            .display_name("TodoList")
            .initial_state(|_| Todos {
                items: Vec::new(),
                draft: String::new(),
            })
            .reducer(move |state, action| reducer(&focus, state, action))
            .render(|me: &stateful_component::Me<'_, ListProps, Todos, Action, Vars>| {
                me.vars_mut().renders += 1;
                me.refs.set("input", InputElement { id: 1 });
                format!(
                    "{} [{}] draft={:?} (render #{})",
                    me.props.title,
                    me.state.items.join(", "),
                    me.state.draft,
                    me.vars().renders
                )
            })
            // A new list starts empty
            .will_receive_props(|next, me| {
                (next.title != me.props.title).then(|| Todos {
                    items: Vec::new(),
                    draft: String::new(),
                })
            })
            .build()
            .expect("todo definition is complete")
    })
}

fn main() {
    println!("=== Todo List ===\n");

    let focus = focus_input();
    let component = todo_list(focus.clone());
    let props = ListProps {
        title: "Groceries".to_string(),
    };

    let instance = component
        .mount(props, &Provider::new().context())
        .expect("mounted under a provider");
    println!("{}", instance.render());

    instance.dispatch(Action::Type("milk".to_string()));
    instance.dispatch(Action::Submit);
    instance.dispatch(Action::Type("eggs".to_string()));
    instance.dispatch(Action::Submit);
    instance.dispatch(Action::Submit);
    println!("{}", instance.render());

    instance
        .receive_props(ListProps {
            title: "Chores".to_string(),
        })
        .expect("instance is mounted");
    println!("{}", instance.render());
    instance.dispatch(Action::Clear);

    println!("\n=== With a mock provider ===\n");

    let intercepted = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&intercepted);
    let expected = focus.clone();
    let mock = MockProvider::with_runner(move |call: &SideEffectCall<'_>| {
        let is_focus = call
            .side_effect::<Action, Todos>()
            .is_some_and(|fx| fx.ptr_eq(&expected));
        if is_focus {
            if let Some(todos) = call.state::<Todos>() {
                log.borrow_mut().push(todos.items.clone());
            }
        }
    });

    let instance = component
        .mount(
            ListProps {
                title: "Tested".to_string(),
            },
            &mock.context(),
        )
        .expect("mounted under a mock provider");
    instance.dispatch(Action::Type("write tests".to_string()));
    instance.dispatch(Action::Submit);

    println!("intercepted focus calls: {:?}", intercepted.borrow());
    println!("{}", instance.render());
}
