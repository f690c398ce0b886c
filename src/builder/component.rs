//! Builder for component definitions.

use crate::builder::error::{BuildError, DefinitionError};
use crate::core::{Refs, Snapshot, Update};
use crate::effects::{Subscription, Teardown};
use crate::runtime::{
    ComponentDef, Dispatch, InitialStateFn, LifecycleHook, Me, ReducerFn, RenderFn,
    ShouldUpdateFn, UpdateHook, VarsFn, WillReceivePropsFn, DEFAULT_DISPLAY_NAME,
};
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for component definitions with a fluent API.
///
/// `initial_state`, `reducer` and `render` are required. Instance variables
/// default to `V::default()`; use `Option<T>` for handles that only exist
/// after mount.
///
/// # Example
///
/// ```rust
/// use stateful_component::builder::ComponentBuilder;
/// use stateful_component::core::update;
///
/// enum Action {
///     Add,
/// }
///
/// let definition = ComponentBuilder::<(), i32, Action, String>::new()
///     .display_name("Counter")
///     .initial_state(|_| 0)
///     .reducer(|count, action| match action {
///         Action::Add => update::state(count + 1),
///     })
///     .render(|me| format!("count: {}", me.state))
///     .build()
///     .unwrap();
///
/// assert_eq!(definition.display_name, "Counter");
/// ```
pub struct ComponentBuilder<P, S, A, R, V = ()> {
    display_name: Option<String>,
    initial_state: Option<InitialStateFn<P, S>>,
    reducer: Option<ReducerFn<S, A>>,
    render: Option<RenderFn<P, S, A, R, V>>,
    vars: VarsFn<P, V>,
    subscriptions: Vec<Subscription<A>>,
    did_mount: Option<LifecycleHook<P, S, A, V>>,
    will_unmount: Option<LifecycleHook<P, S, A, V>>,
    will_receive_props: Option<WillReceivePropsFn<P, S, A, V>>,
    will_update: Option<UpdateHook<P, S, A, V>>,
    did_update: Option<UpdateHook<P, S, A, V>>,
    should_update: Option<ShouldUpdateFn<P, S, A, V>>,
}

impl<P, S, A, R, V> ComponentBuilder<P, S, A, R, V>
where
    P: 'static,
    S: 'static,
    A: 'static,
    R: 'static,
    V: Default + 'static,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            display_name: None,
            initial_state: None,
            reducer: None,
            render: None,
            vars: Rc::new(|_: &P| V::default()),
            subscriptions: Vec::new(),
            did_mount: None,
            will_unmount: None,
            will_receive_props: None,
            will_update: None,
            did_update: None,
            should_update: None,
        }
    }
}

impl<P, S, A, R, V> Default for ComponentBuilder<P, S, A, R, V>
where
    P: 'static,
    S: 'static,
    A: 'static,
    R: 'static,
    V: Default + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S, A, R, V> ComponentBuilder<P, S, A, R, V> {
    /// Name used in logs and error messages.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Seed the state from props (required).
    pub fn initial_state<F>(mut self, f: F) -> Self
    where
        F: Fn(&P) -> S + 'static,
    {
        self.initial_state = Some(Rc::new(f));
        self
    }

    /// Set the pure transition function (required).
    pub fn reducer<F>(mut self, f: F) -> Self
    where
        F: Fn(&S, A) -> Update<S, A> + 'static,
    {
        self.reducer = Some(Rc::new(f));
        self
    }

    /// Set the render function (required).
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Me<'_, P, S, A, V>) -> R + 'static,
    {
        self.render = Some(Rc::new(f));
        self
    }

    /// Create instance variables from props.
    pub fn vars<F>(mut self, f: F) -> Self
    where
        F: Fn(&P) -> V + 'static,
    {
        self.vars = Rc::new(f);
        self
    }

    /// Add a subscription.
    pub fn subscription(mut self, subscription: Subscription<A>) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    /// Add a subscription from a closure.
    pub fn subscribe<F>(self, f: F) -> Self
    where
        F: Fn(&Dispatch<A>, &Refs) -> Teardown + 'static,
    {
        self.subscription(Subscription::new(f))
    }

    /// Add several subscriptions at once.
    pub fn subscriptions(mut self, subscriptions: Vec<Subscription<A>>) -> Self {
        self.subscriptions.extend(subscriptions);
        self
    }

    pub fn did_mount<F>(mut self, f: F) -> Self
    where
        F: Fn(&Me<'_, P, S, A, V>) + 'static,
    {
        self.did_mount = Some(Rc::new(f));
        self
    }

    pub fn will_unmount<F>(mut self, f: F) -> Self
    where
        F: Fn(&Me<'_, P, S, A, V>) + 'static,
    {
        self.will_unmount = Some(Rc::new(f));
        self
    }

    /// React to new props. Returning `Some(state)` replaces the state.
    pub fn will_receive_props<F>(mut self, f: F) -> Self
    where
        F: Fn(&P, &Me<'_, P, S, A, V>) -> Option<S> + 'static,
    {
        self.will_receive_props = Some(Rc::new(f));
        self
    }

    pub fn will_update<F>(mut self, f: F) -> Self
    where
        F: Fn(Snapshot<'_, P, S>, &Me<'_, P, S, A, V>) + 'static,
    {
        self.will_update = Some(Rc::new(f));
        self
    }

    pub fn did_update<F>(mut self, f: F) -> Self
    where
        F: Fn(Snapshot<'_, P, S>, &Me<'_, P, S, A, V>) + 'static,
    {
        self.did_update = Some(Rc::new(f));
        self
    }

    pub fn should_update<F>(mut self, f: F) -> Self
    where
        F: Fn(Snapshot<'_, P, S>, &Me<'_, P, S, A, V>) -> bool + 'static,
    {
        self.should_update = Some(Rc::new(f));
        self
    }

    /// Check the definition, accumulating every problem.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<DefinitionError>> {
        let checks = vec![
            require(
                self.initial_state.is_some(),
                DefinitionError::MissingInitialState,
            ),
            require(self.reducer.is_some(), DefinitionError::MissingReducer),
            require(self.render.is_some(), DefinitionError::MissingRender),
            require(
                self.display_name
                    .as_deref()
                    .is_none_or(|name| !name.trim().is_empty()),
                DefinitionError::EmptyDisplayName,
            ),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the definition.
    /// Returns an error listing every missing or invalid field.
    pub fn build(self) -> Result<ComponentDef<P, S, A, R, V>, BuildError> {
        let problems: Vec<DefinitionError> = match self.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(problems) => problems.iter().cloned().collect(),
        };

        match (self.initial_state, self.reducer, self.render) {
            (Some(initial_state), Some(reducer), Some(render)) if problems.is_empty() => {
                Ok(ComponentDef {
                    display_name: self
                        .display_name
                        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
                    initial_state,
                    reducer,
                    render,
                    vars: self.vars,
                    subscriptions: self.subscriptions,
                    did_mount: self.did_mount,
                    will_unmount: self.will_unmount,
                    will_receive_props: self.will_receive_props,
                    will_update: self.will_update,
                    did_update: self.did_update,
                    should_update: self.should_update,
                })
            }
            _ => Err(BuildError::new(problems)),
        }
    }
}

fn require(
    present: bool,
    missing: DefinitionError,
) -> Validation<(), NonEmptyVec<DefinitionError>> {
    if present {
        Validation::success(())
    } else {
        Validation::fail(missing)
    }
}
