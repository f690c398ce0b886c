//! Side effects and the channel that executes them.
//!
//! This module is the imperative shell around the pure update protocol:
//!
//! - **Side effects**: deferred work produced by reducers
//! - **Subscriptions**: mount-time event sources with a teardown
//! - **Channel**: the runner installed by a `Provider` and reached through
//!   a `Context`
//! - **Mocks**: runners that record or intercept instead of executing

mod channel;
pub mod mock;
mod side_effect;

pub(crate) use channel::CallSite;
pub use channel::{Context, Provider, RunSideEffect, SideEffectCall, SideEffectRunner};
pub use mock::{MockProvider, RecordedCall, Recorder};
pub use side_effect::{SideEffect, SideEffectKind, Subscription, Teardown};
