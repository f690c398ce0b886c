//! Builder API for ergonomic component definitions.
//!
//! [`ComponentBuilder`] assembles a `ComponentDef` with a fluent API and
//! reports every missing piece at once when built.

pub mod component;
pub mod error;

pub use component::ComponentBuilder;
pub use error::{BuildError, DefinitionError};
