//! Error types for graph construction and task resolution

use thiserror::Error;

/// Errors raised while declaring a task graph or resolving its tasks
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configurator failed while populating a builder
    #[error(transparent)]
    Configuration(#[from] anyhow::Error),

    #[error("No task registered for '{0}'")]
    UnknownTask(String),

    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),
}

impl GraphError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GraphError::InvalidArgument(message.into())
    }
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
