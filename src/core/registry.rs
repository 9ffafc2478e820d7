//! Task registry - resolves task keys to runnable tasks

use crate::core::{
    error::{GraphError, Result},
    graph::TaskGraph,
    task::{DefinedTask, Task, TaskRef},
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Creates a fresh task instance for each resolution
pub type TaskFactory = Arc<dyn Fn() -> Box<dyn Task> + Send + Sync>;

/// Maps canonical task identifiers to factories
#[derive(Clone, Default)]
pub struct TaskRegistry {
    factories: HashMap<String, TaskFactory>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task type under its own canonical identifier
    pub fn register<T>(&mut self) -> Result<&mut Self>
    where
        T: Task + Default + 'static,
    {
        self.register_named(TaskRef::of::<T>(), || -> Box<dyn Task> { Box::new(T::default()) })
    }

    /// Register a factory under an explicit key
    pub fn register_named<F>(&mut self, task_ref: impl Into<TaskRef>, factory: F) -> Result<&mut Self>
    where
        F: Fn() -> Box<dyn Task> + Send + Sync + 'static,
    {
        let task_ref = task_ref.into();
        let key = task_ref.canonical_name();
        if key.is_empty() {
            return Err(GraphError::invalid("task key must not be empty"));
        }
        if self.factories.contains_key(key) {
            return Err(GraphError::DuplicateTask(key.to_string()));
        }

        debug!("Registering task {}", key);
        self.factories.insert(key.to_string(), Arc::new(factory));
        Ok(self)
    }

    pub fn contains(&self, task_ref: &TaskRef) -> bool {
        self.factories.contains_key(task_ref.canonical_name())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate the task a definition points at
    pub fn resolve(&self, task: &dyn DefinedTask) -> Result<Box<dyn Task>> {
        let key = task.implementing_class_name();
        self.factories
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| GraphError::UnknownTask(key.to_string()))
    }

    /// Check every task in the graph, nested loops included, can be resolved
    pub fn check(&self, graph: &TaskGraph) -> Result<()> {
        for task in graph.tasks() {
            if !self.contains(task.task_ref()) {
                return Err(GraphError::UnknownTask(task.implementing_class_name().to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("TaskRegistry").field("tasks", &keys).finish()
    }
}
