//! Loop traversal - the redirect protocol an engine runs over a loop sub-graph

use crate::core::{
    error::{GraphError, Result},
    graph::{GraphCursor, TaskGraph, TaskNode},
    graph_type::GraphType,
    state::ExecutionStatus,
};
use tracing::debug;

/// Where a walk through a loop currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Running the child at this index
    Running(usize),
    /// The last child completed; continue after the loop
    Exit,
    /// A child reported a status that stops the stage
    Halted(ExecutionStatus),
}

/// Walks the children of a `LOOP` graph, restarting on redirect
///
/// The engine runs [`LoopWalker::current`] and feeds the resulting status to
/// [`LoopWalker::advance`]. A nested sub-graph comes back as a single node;
/// the engine walks it separately and reports its overall outcome here.
#[derive(Debug, Clone)]
pub struct LoopWalker<'a> {
    cursor: GraphCursor<'a>,
    current: Option<&'a TaskNode>,
    state: LoopState,
    iterations: usize,
}

impl<'a> LoopWalker<'a> {
    pub fn new(graph: &'a TaskGraph) -> Result<Self> {
        if graph.graph_type() != GraphType::Loop {
            return Err(GraphError::invalid(format!(
                "cannot walk a {} graph as a loop",
                graph.graph_type()
            )));
        }

        let mut cursor = graph.cursor();
        let current = cursor.next();
        // An empty loop has nothing to repeat and exits straight away
        let (state, iterations) = match current {
            Some(_) => (LoopState::Running(0), 1),
            None => (LoopState::Exit, 0),
        };

        Ok(Self {
            cursor,
            current,
            state,
            iterations,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of passes started through the loop
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The node to run next, if the walk is still going
    pub fn current(&self) -> Option<&'a TaskNode> {
        match self.state {
            LoopState::Running(_) => self.current,
            LoopState::Exit | LoopState::Halted(_) => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.state, LoopState::Running(_))
    }

    /// Record the status of the current node and move on
    ///
    /// Only a redirect from the last child restarts the loop; a redirect
    /// anywhere else moves on like a completion. Once the walk has exited or
    /// halted, further calls change nothing.
    pub fn advance(&mut self, status: ExecutionStatus) -> LoopState {
        let LoopState::Running(index) = self.state else {
            return self.state;
        };
        let is_last = !self.cursor.has_next();

        self.state = match status {
            ExecutionStatus::NotStarted | ExecutionStatus::Running => LoopState::Running(index),
            status if status.is_halt() => {
                self.current = None;
                LoopState::Halted(status)
            }
            ExecutionStatus::Redirect if is_last => {
                self.cursor.reset();
                self.current = self.cursor.next();
                self.iterations += 1;
                debug!("Loop redirected, starting pass {}", self.iterations);
                LoopState::Running(0)
            }
            _ => {
                self.current = self.cursor.next();
                match self.current {
                    Some(_) => LoopState::Running(index + 1),
                    None => {
                        debug!("Loop exited after {} passes", self.iterations);
                        LoopState::Exit
                    }
                }
            }
        };

        self.state
    }
}
