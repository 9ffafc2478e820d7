//! Task execution status

use serde::{Deserialize, Serialize};

/// Status a task reports back to the execution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Task has not started
    NotStarted,
    /// Task is still running and should be polled again
    Running,
    /// Task completed successfully
    Succeeded,
    /// Task asks the enclosing loop to start over
    Redirect,
    /// Task was skipped
    Skipped,
    /// Task failed but the stage may carry on
    FailedContinue,
    /// Task failed and the stage must stop
    Terminal,
    /// Task was cancelled
    Canceled,
}

impl ExecutionStatus {
    /// Check if the task is finished and the sequence may move on
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Succeeded | ExecutionStatus::Skipped | ExecutionStatus::FailedContinue
        )
    }

    /// Check if the status stops the stage outright
    pub fn is_halt(&self) -> bool {
        matches!(self, ExecutionStatus::Terminal | ExecutionStatus::Canceled)
    }
}
