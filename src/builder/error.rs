//! Build errors for component definitions.

use thiserror::Error;

/// A single problem found while validating a component definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Initial state not specified. Call .initial_state(f) before .build()")]
    MissingInitialState,

    #[error("Reducer not specified. Call .reducer(f) before .build()")]
    MissingReducer,

    #[error("Render function not specified. Call .render(f) before .build()")]
    MissingRender,

    #[error("Display name must not be empty")]
    EmptyDisplayName,
}

/// Every problem that kept a definition from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid component definition: {}", join(.problems))]
pub struct BuildError {
    problems: Vec<DefinitionError>,
}

impl BuildError {
    pub(crate) fn new(problems: Vec<DefinitionError>) -> Self {
        Self { problems }
    }

    pub fn problems(&self) -> &[DefinitionError] {
        &self.problems
    }
}

fn join(problems: &[DefinitionError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
