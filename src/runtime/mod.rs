//! The stateful-component runtime.
//!
//! Turns a [`ComponentDef`] into live instances and drives the update
//! cycle:
//!
//! 1. `dispatch(action)` queues the action on its instance
//! 2. the reducer computes an `Update` from the latest committed state
//! 3. `should_update` may veto the candidate state; otherwise it is
//!    committed between `will_update` and `did_update`
//! 4. the side effect, if any, is handed to the provider's runner with the
//!    committed state
//!
//! Everything runs on the caller's thread. Actions dispatched while an
//! instance is busy are processed in order once the current step finishes.

mod definition;
mod dispatch;
mod error;
mod instance;
mod me;
mod subscriptions;

pub use definition::{
    ComponentDef, InitialStateFn, LifecycleHook, ReducerFn, RenderFn, ShouldUpdateFn, UpdateHook,
    VarsFn, WillReceivePropsFn, DEFAULT_DISPLAY_NAME,
};
pub use dispatch::Dispatch;
pub use error::RuntimeError;
pub use instance::{Component, Instance, Phase};
pub use me::Me;
