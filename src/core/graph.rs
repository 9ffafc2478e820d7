//! Task graph domain model

use crate::core::{
    builder::Builder,
    error::Result,
    graph_type::GraphType,
    task::{TaskDefinition, TaskRef},
};
use std::sync::Arc;
use tracing::debug;

/// A node in a [`TaskGraph`]: either an individual task or a sub-graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskNode {
    Task(TaskDefinition),
    Graph(TaskGraph),
}

impl TaskNode {
    /// Name of the task, or `None` for a sub-graph
    pub fn name(&self) -> Option<&str> {
        self.as_task().map(|task| task.name())
    }

    pub fn as_task(&self) -> Option<&TaskDefinition> {
        match self {
            TaskNode::Task(task) => Some(task),
            TaskNode::Graph(_) => None,
        }
    }

    pub fn as_graph(&self) -> Option<&TaskGraph> {
        match self {
            TaskNode::Task(_) => None,
            TaskNode::Graph(graph) => Some(graph),
        }
    }
}

impl From<TaskDefinition> for TaskNode {
    fn from(task: TaskDefinition) -> Self {
        TaskNode::Task(task)
    }
}

impl From<TaskGraph> for TaskNode {
    fn from(graph: TaskGraph) -> Self {
        TaskNode::Graph(graph)
    }
}

/// A graph or sub-graph of tasks
///
/// The node sequence is fixed when the graph is built and is shared, never
/// mutated, so clones are cheap and any number of threads may walk the same
/// graph at once. Only [`Builder`] creates graphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGraph {
    graph_type: GraphType,
    nodes: Arc<[TaskNode]>,
}

impl TaskGraph {
    pub(crate) fn new(graph_type: GraphType, nodes: &[TaskNode]) -> Self {
        Self {
            graph_type,
            nodes: Arc::from(nodes),
        }
    }

    pub fn graph_type(&self) -> GraphType {
        self.graph_type
    }

    /// Iterate the direct children in execution order
    ///
    /// Nested graphs come back as a single node; descending into them is up
    /// to the caller.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskNode> {
        self.nodes.iter()
    }

    /// A cursor over the direct children that can move in both directions
    pub fn cursor(&self) -> GraphCursor<'_> {
        GraphCursor {
            nodes: &self.nodes,
            position: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, index: usize) -> Option<&TaskNode> {
        self.nodes.get(index)
    }

    pub fn first(&self) -> Option<&TaskNode> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&TaskNode> {
        self.nodes.last()
    }

    /// Depth-first walk over every task, including those in nested graphs
    pub fn tasks(&self) -> Tasks<'_> {
        Tasks {
            stack: vec![self.nodes.iter()],
        }
    }
}

impl<'a> IntoIterator for &'a TaskGraph {
    type Item = &'a TaskNode;
    type IntoIter = std::slice::Iter<'a, TaskNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bidirectional position over the children of a [`TaskGraph`]
///
/// The cursor sits between elements: `next` returns the element after it and
/// `previous` the element before it.
#[derive(Debug, Clone)]
pub struct GraphCursor<'a> {
    nodes: &'a [TaskNode],
    position: usize,
}

impl<'a> GraphCursor<'a> {
    pub fn has_next(&self) -> bool {
        self.position < self.nodes.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Step back and return the element passed over
    pub fn previous(&mut self) -> Option<&'a TaskNode> {
        if !self.has_previous() {
            return None;
        }
        self.position -= 1;
        self.nodes.get(self.position)
    }

    /// Index of the element `next` would return
    pub fn next_index(&self) -> usize {
        self.position
    }

    /// Index of the element `previous` would return
    pub fn previous_index(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    /// Move back in front of the first element
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'a> Iterator for GraphCursor<'a> {
    type Item = &'a TaskNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.position)?;
        self.position += 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.nodes.len() - self.position;
        (remaining, Some(remaining))
    }
}

/// Depth-first iterator over the tasks of a graph, see [`TaskGraph::tasks`]
#[derive(Debug)]
pub struct Tasks<'a> {
    stack: Vec<std::slice::Iter<'a, TaskNode>>,
}

impl<'a> Iterator for Tasks<'a> {
    type Item = &'a TaskDefinition;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(TaskNode::Task(task)) => return Some(task),
                Some(TaskNode::Graph(graph)) => self.stack.push(graph.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Build a new [`TaskGraph`] by running `configure` against a fresh builder
///
/// If `configure` fails, its error is returned as is and nothing is built.
pub fn build<F>(graph_type: GraphType, configure: F) -> Result<TaskGraph>
where
    F: FnOnce(&mut Builder) -> Result<()>,
{
    let mut builder = Builder::new(graph_type);
    configure(&mut builder)?;
    let graph = builder.build();
    debug!("Built {} graph with {} nodes", graph_type, graph.len());
    Ok(graph)
}

/// Create a graph with no tasks
pub fn empty_graph(graph_type: GraphType) -> TaskGraph {
    Builder::new(graph_type).build()
}

/// Create a graph holding a single task
pub fn singleton(
    graph_type: GraphType,
    name: impl Into<String>,
    task_ref: impl Into<TaskRef>,
) -> Result<TaskGraph> {
    build(graph_type, |builder| {
        builder.with_task(name, task_ref)?;
        Ok(())
    })
}

/// Create a bare task definition, for composing with [`Builder::with_node`]
pub fn task(name: impl Into<String>, task_ref: impl Into<TaskRef>) -> Result<TaskDefinition> {
    TaskDefinition::new(name, task_ref)
}
