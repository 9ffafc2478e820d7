//! Builder for task graphs

use crate::core::{
    error::Result,
    graph::{self, TaskGraph, TaskNode},
    graph_type::GraphType,
    task::{TaskDefinition, TaskRef},
};
use tracing::{debug, trace};

/// Accumulates nodes for one graph scope, in the order they are added
///
/// Usually reached through [`graph::build`]; every [`Builder::build`] call
/// takes a snapshot, so graphs already handed out never change.
#[derive(Debug)]
pub struct Builder {
    graph_type: GraphType,
    nodes: Vec<TaskNode>,
}

impl Builder {
    pub fn new(graph_type: GraphType) -> Self {
        Self {
            graph_type,
            nodes: Vec::new(),
        }
    }

    pub fn graph_type(&self) -> GraphType {
        self.graph_type
    }

    /// Number of nodes added so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a task
    ///
    /// Fails without touching the builder if the name or the implementation
    /// key is empty.
    pub fn with_task(
        &mut self,
        name: impl Into<String>,
        task_ref: impl Into<TaskRef>,
    ) -> Result<&mut Self> {
        let task = TaskDefinition::new(name, task_ref)?;
        trace!("Adding task '{}' ({})", task.name(), task.implementing_class_name());
        self.nodes.push(TaskNode::Task(task));
        Ok(self)
    }

    /// Append an already built node, task or sub-graph
    pub fn with_node(&mut self, node: impl Into<TaskNode>) -> &mut Self {
        self.nodes.push(node.into());
        self
    }

    /// Append a sub-graph of tasks that loops
    ///
    /// The sub-graph runs after any previously added tasks and before any
    /// subsequently added ones. If its final task returns
    /// [`crate::core::ExecutionStatus::Redirect`] the engine runs the
    /// sub-graph again from the top; if it succeeds the loop exits.
    ///
    /// `configure` gets its own builder, so a failure inside it leaves this
    /// builder as it was.
    pub fn with_loop<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Builder) -> Result<()>,
    {
        let sub_graph = graph::build(GraphType::Loop, configure)?;
        debug!(
            "Adding loop of {} nodes at position {} of {} graph",
            sub_graph.len(),
            self.nodes.len(),
            self.graph_type
        );
        self.nodes.push(TaskNode::Graph(sub_graph));
        Ok(self)
    }

    /// Freeze the nodes added so far into a graph
    pub fn build(&self) -> TaskGraph {
        TaskGraph::new(self.graph_type, &self.nodes)
    }
}
