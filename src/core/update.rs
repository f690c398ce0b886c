//! The reducer's return value.
//!
//! A reducer maps `(state, action)` to exactly one [`Update`] outcome. The
//! state carried by an outcome is a full replacement value, never a patch:
//! the reducer copies any fields it leaves unchanged.
//!
//! # Example
//!
//! ```rust
//! use stateful_component::core::update::{self, Update};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! enum Action {
//!     Add,
//!     Ignore,
//! }
//!
//! fn reducer(state: &Counter, action: Action) -> Update<Counter, Action> {
//!     match action {
//!         Action::Add => update::state(Counter { value: state.value + 1 }),
//!         Action::Ignore => update::nothing(),
//!     }
//! }
//!
//! let next = reducer(&Counter { value: 1 }, Action::Add);
//! assert_eq!(update::get_state(&next), Some(&Counter { value: 2 }));
//! assert!(update::get_side_effect(&next).is_none());
//! ```

use crate::core::Refs;
use crate::effects::SideEffect;
use crate::runtime::Dispatch;
use std::fmt;

/// Outcome of a reducer call.
pub enum Update<S, A> {
    /// Replace the state, no side effect.
    State(S),

    /// Keep the state, run a side effect.
    SideEffect(SideEffect<A, S>),

    /// Replace the state, then run a side effect against the new state.
    StateAndSideEffect(S, SideEffect<A, S>),

    /// No change.
    Nothing,
}

impl<S, A> Update<S, A> {
    /// Replacement state, if this outcome carries one.
    pub fn state(&self) -> Option<&S> {
        match self {
            Self::State(state) | Self::StateAndSideEffect(state, _) => Some(state),
            Self::SideEffect(_) | Self::Nothing => None,
        }
    }

    /// Side effect, if this outcome carries one.
    pub fn side_effect(&self) -> Option<&SideEffect<A, S>> {
        match self {
            Self::SideEffect(fx) | Self::StateAndSideEffect(_, fx) => Some(fx),
            Self::State(_) | Self::Nothing => None,
        }
    }

    /// Split into the state portion and the side-effect portion.
    pub fn into_parts(self) -> (Option<S>, Option<SideEffect<A, S>>) {
        match self {
            Self::State(state) => (Some(state), None),
            Self::SideEffect(fx) => (None, Some(fx)),
            Self::StateAndSideEffect(state, fx) => (Some(state), Some(fx)),
            Self::Nothing => (None, None),
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Name of the active variant, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::State(_) => "State",
            Self::SideEffect(_) => "SideEffect",
            Self::StateAndSideEffect(_, _) => "StateAndSideEffect",
            Self::Nothing => "Nothing",
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Update<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(state) => f.debug_tuple("State").field(state).finish(),
            Self::SideEffect(fx) => f.debug_tuple("SideEffect").field(fx).finish(),
            Self::StateAndSideEffect(state, fx) => f
                .debug_tuple("StateAndSideEffect")
                .field(state)
                .field(fx)
                .finish(),
            Self::Nothing => f.write_str("Nothing"),
        }
    }
}

/// Replace the state.
pub fn state<S, A>(state: S) -> Update<S, A> {
    Update::State(state)
}

/// Run a side effect without changing the state.
pub fn side_effect<S, A, F>(f: F) -> Update<S, A>
where
    F: Fn(&Dispatch<A>, &S, &Refs) + 'static,
{
    Update::SideEffect(SideEffect::new(f))
}

/// Replace the state and run a side effect once it is committed.
pub fn state_and_side_effect<S, A, F>(state: S, f: F) -> Update<S, A>
where
    F: Fn(&Dispatch<A>, &S, &Refs) + 'static,
{
    Update::StateAndSideEffect(state, SideEffect::new(f))
}

/// Leave everything as it is.
pub fn nothing<S, A>() -> Update<S, A> {
    Update::Nothing
}

/// Replacement state carried by `update`, if any.
pub fn get_state<S, A>(update: &Update<S, A>) -> Option<&S> {
    update.state()
}

/// Side effect carried by `update`, if any.
pub fn get_side_effect<S, A>(update: &Update<S, A>) -> Option<&SideEffect<A, S>> {
    update.side_effect()
}
