//! Stateful components: a reducer and side-effect runtime for UI components.
//!
//! Components are built on a "pure core, imperative shell" split. A reducer
//! is a pure function from `(state, action)` to an [`Update`]; deferred work
//! is returned as a [`SideEffect`] value and executed by the runner of the
//! nearest [`Provider`], never by the reducer itself.
//!
//! # Core Concepts
//!
//! - **Update**: the four outcomes a reducer may return
//! - **Side effects**: closures run after the state is committed
//! - **Subscriptions**: mount-time event sources released on unmount
//! - **Provider**: installs the runner that executes (or mocks) side effects
//!
//! # Example
//!
//! ```rust
//! use stateful_component::core::update;
//! use stateful_component::{Component, ComponentBuilder, Provider};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Status {
//!     Idle,
//!     Pending,
//!     Done,
//! }
//!
//! enum Action {
//!     Start,
//!     Finish,
//! }
//!
//! let job = Component::new(|| {
//!     ComponentBuilder::<(), Status, Action, String>::new()
//!         .display_name("Job")
//!         .initial_state(|_| Status::Idle)
//!         .reducer(|_, action| match action {
//!             Action::Start => update::state_and_side_effect(Status::Pending, |dispatch, _, _| {
//!                 dispatch.dispatch(Action::Finish)
//!             }),
//!             Action::Finish => update::state(Status::Done),
//!         })
//!         .render(|me| format!("{:?}", me.state))
//!         .build()
//!         .expect("complete definition")
//! });
//!
//! let instance = job.mount((), &Provider::new().context()).unwrap();
//! instance.dispatch(Action::Start);
//! assert_eq!(instance.render(), "Done");
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, ComponentBuilder};
pub use core::{InstanceId, Refs, Snapshot, Update};
pub use effects::{
    Context, MockProvider, Provider, SideEffect, SideEffectCall, Subscription, Teardown,
};
pub use runtime::{Component, Dispatch, Instance, Me, RuntimeError};
