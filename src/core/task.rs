//! Task domain model

use crate::core::{
    context::StageContext,
    error::{GraphError, Result},
    state::ExecutionStatus,
};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// A runnable unit of stage logic, resolved from a [`TaskRef`] by a registry
#[async_trait]
pub trait Task: Send + Sync {
    /// Run the task against the current stage context
    async fn execute(&self, context: &StageContext) -> TaskResult;
}

/// What a task hands back to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub status: ExecutionStatus,

    /// Values to merge into the stage context
    #[serde(default)]
    pub outputs: Map<String, Value>,
}

impl TaskResult {
    pub fn new(status: ExecutionStatus) -> Self {
        Self {
            status,
            outputs: Map::new(),
        }
    }

    pub fn succeeded() -> Self {
        Self::new(ExecutionStatus::Succeeded)
    }

    pub fn redirect() -> Self {
        Self::new(ExecutionStatus::Redirect)
    }

    /// Attach an output value
    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }
}

/// Stable key identifying a task implementation
///
/// Built either from the implementing type itself ([`TaskRef::of`]) or from an
/// explicit registry key ([`TaskRef::named`]). The key is what a
/// [`crate::core::TaskRegistry`] resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRef {
    key: Cow<'static, str>,
}

impl TaskRef {
    /// Reference the implementing type; the key is its fully-qualified path
    ///
    /// The key comes from [`std::any::type_name`], which is only stable within
    /// one build and is not guaranteed unique. Use [`TaskRef::named`] for keys
    /// that are persisted, written in configuration, or shared across builds.
    pub fn of<T: Task + 'static>() -> Self {
        Self {
            key: Cow::Borrowed(std::any::type_name::<T>()),
        }
    }

    /// Reference an implementation by an explicit key
    pub fn named(key: impl Into<String>) -> Self {
        Self {
            key: Cow::Owned(key.into()),
        }
    }

    /// The canonical identifier used for registry lookups
    pub fn canonical_name(&self) -> &str {
        &self.key
    }

    /// Check the key is a dotted or `::`-separated identifier path
    pub fn is_well_formed(&self) -> bool {
        static KEY_PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = KEY_PATTERN.get_or_init(|| {
            Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*((::|\.)[A-Za-z_][A-Za-z0-9_]*)*$")
                .expect("task key pattern is valid")
        });
        pattern.is_match(&self.key)
    }
}

impl From<&str> for TaskRef {
    fn from(key: &str) -> Self {
        TaskRef::named(key)
    }
}

impl From<String> for TaskRef {
    fn from(key: String) -> Self {
        TaskRef::named(key)
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Anything that names a task and the implementation a registry should run
///
/// [`TaskDefinition`] is the usual implementor; engines can resolve their own
/// task records through [`crate::core::TaskRegistry::resolve`] as well.
pub trait DefinedTask {
    /// Human-readable task name
    fn name(&self) -> &str;

    /// Canonical identifier of the implementation
    fn implementing_class_name(&self) -> &str;
}

/// An individual task in a graph: a display name plus the implementation to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    name: String,
    task_ref: TaskRef,
}

impl TaskDefinition {
    /// Create a task definition; both the name and the key must be present
    pub fn new(name: impl Into<String>, task_ref: impl Into<TaskRef>) -> Result<Self> {
        let name = name.into();
        let task_ref = task_ref.into();

        if name.trim().is_empty() {
            return Err(GraphError::invalid("task name must not be empty"));
        }
        if task_ref.canonical_name().is_empty() {
            return Err(GraphError::invalid(format!(
                "task '{}' has no implementation",
                name
            )));
        }

        Ok(Self { name, task_ref })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn task_ref(&self) -> &TaskRef {
        &self.task_ref
    }

    /// Canonical identifier of the implementation, as the registry knows it
    pub fn implementing_class_name(&self) -> &str {
        self.task_ref.canonical_name()
    }
}

impl DefinedTask for TaskDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn implementing_class_name(&self) -> &str {
        self.task_ref.canonical_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WaitForUpInstances;

    #[async_trait]
    impl Task for WaitForUpInstances {
        async fn execute(&self, _context: &StageContext) -> TaskResult {
            TaskResult::succeeded()
        }
    }

    struct DisableInstances;

    #[async_trait]
    impl Task for DisableInstances {
        async fn execute(&self, _context: &StageContext) -> TaskResult {
            TaskResult::succeeded()
        }
    }

    #[test]
    fn test_type_ref_is_deterministic() {
        let a = TaskDefinition::new("wait", TaskRef::of::<WaitForUpInstances>()).unwrap();
        let b = TaskDefinition::new("wait again", TaskRef::of::<WaitForUpInstances>()).unwrap();
        let c = TaskDefinition::new("disable", TaskRef::of::<DisableInstances>()).unwrap();

        assert_eq!(a.implementing_class_name(), b.implementing_class_name());
        assert_ne!(a.implementing_class_name(), c.implementing_class_name());
        assert!(a.implementing_class_name().ends_with("WaitForUpInstances"));
    }

    #[test]
    fn test_definition_as_defined_task() {
        let def = TaskDefinition::new("wait", "deploy.Wait").unwrap();
        let defined: &dyn DefinedTask = &def;
        assert_eq!(defined.name(), "wait");
        assert_eq!(defined.implementing_class_name(), "deploy.Wait");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = TaskDefinition::new("  ", "deploy.Wait").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_implementation_rejected() {
        let err = TaskDefinition::new("wait", "").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn test_key_well_formed() {
        assert!(TaskRef::named("deploy.WaitForUpInstances").is_well_formed());
        assert!(TaskRef::named("orca::tasks::Disable").is_well_formed());
        assert!(!TaskRef::named("deploy..Wait").is_well_formed());
        assert!(!TaskRef::named("9lives").is_well_formed());
        assert!(!TaskRef::named("").is_well_formed());
    }

    #[test]
    fn test_task_ref_serializes_as_string() {
        let json = serde_json::to_string(&TaskRef::named("deploy.Wait")).unwrap();
        assert_eq!(json, "\"deploy.Wait\"");
        let parsed: TaskRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TaskRef::named("deploy.Wait"));
    }

    #[test]
    fn test_task_result_outputs() {
        let result = TaskResult::redirect().with_output("remaining", 2);
        assert_eq!(result.status, ExecutionStatus::Redirect);
        assert_eq!(result.outputs.get("remaining"), Some(&Value::from(2)));
    }
}
