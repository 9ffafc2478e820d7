//! stagegraph - declarative task graphs for pipeline stages

pub mod cli;
pub mod core;

// Re-export commonly used types
pub use crate::core::{Builder, GraphType, TaskDefinition, TaskGraph, TaskNode, TaskRef};
pub use crate::core::{DefinedTask, ExecutionStatus, GraphError, LoopState, LoopWalker, StageContext, Task, TaskRegistry, TaskResult};
