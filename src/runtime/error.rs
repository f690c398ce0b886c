//! Runtime error types.

use thiserror::Error;

/// Errors raised by the component runtime itself.
///
/// Failures inside author-supplied code (reducers, hooks, subscriptions,
/// side effects) are panics and propagate untouched; they never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error(
        "No side-effect runner found for component '{component}'. \
         Construct the instance from a Provider's context."
    )]
    MissingProvider { component: String },

    #[error("Component '{component}' is unmounted")]
    Unmounted { component: String },

    #[error("Component '{component}' is already mounted")]
    AlreadyMounted { component: String },

    #[error("Dispatch target no longer exists")]
    InstanceDropped,
}

impl RuntimeError {
    /// True for errors caused by how the tree was wired rather than by timing.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingProvider { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_provider_message_names_the_fix() {
        let err = RuntimeError::MissingProvider {
            component: "Counter".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("Counter"));
        assert!(message.contains("Provider"));
        assert!(err.is_configuration());
    }

    #[test]
    fn lifecycle_errors_are_not_configuration_errors() {
        let err = RuntimeError::Unmounted {
            component: "Counter".to_string(),
        };

        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "Component 'Counter' is unmounted");
    }
}
