//! Test tasks and a minimal engine for walking stage graphs

use async_trait::async_trait;
use stagegraph::core::{
    ExecutionStatus, GraphType, LoopState, LoopWalker, StageContext, Task, TaskGraph, TaskNode,
    TaskRegistry, TaskResult,
};
use std::future::Future;
use std::pin::Pin;

/// Guard against a loop that never stops redirecting
pub const MAX_PASSES: usize = 50;

fn remaining(context: &StageContext) -> u64 {
    context.get("remaining").and_then(|v| v.as_u64()).unwrap_or(0)
}

/// Terminates one batch of instances
#[derive(Default)]
pub struct TerminateBatch;

#[async_trait]
impl Task for TerminateBatch {
    async fn execute(&self, context: &StageContext) -> TaskResult {
        TaskResult::succeeded().with_output("remaining", remaining(context).saturating_sub(1))
    }
}

/// Redirects while batches remain
#[derive(Default)]
pub struct CheckRemaining;

#[async_trait]
impl Task for CheckRemaining {
    async fn execute(&self, context: &StageContext) -> TaskResult {
        if remaining(context) > 0 {
            TaskResult::redirect()
        } else {
            TaskResult::succeeded()
        }
    }
}

#[derive(Default)]
pub struct Noop;

#[async_trait]
impl Task for Noop {
    async fn execute(&self, _context: &StageContext) -> TaskResult {
        TaskResult::succeeded()
    }
}

/// Always stops the stage
#[derive(Default)]
pub struct Explode;

#[async_trait]
impl Task for Explode {
    async fn execute(&self, _context: &StageContext) -> TaskResult {
        TaskResult::new(ExecutionStatus::Terminal)
    }
}

/// Registry holding every test task under its type key
pub fn registry() -> TaskRegistry {
    let mut registry = TaskRegistry::new();
    registry
        .register::<TerminateBatch>()
        .unwrap()
        .register::<CheckRemaining>()
        .unwrap()
        .register::<Noop>()
        .unwrap()
        .register::<Explode>()
        .unwrap();
    registry
}

/// Outcome of walking a graph
#[derive(Debug)]
pub struct Run {
    pub status: ExecutionStatus,
    pub executed: Vec<String>,
    pub context: StageContext,
}

/// Walk a graph the way an engine would, descending into sub-graphs
pub async fn run_graph(graph: &TaskGraph, registry: &TaskRegistry, context: StageContext) -> Run {
    let mut run = Run {
        status: ExecutionStatus::NotStarted,
        executed: Vec::new(),
        context,
    };
    run.status = run_sequence(graph, registry, &mut run.executed, &mut run.context).await;
    run
}

type BoxedStatus<'a> = Pin<Box<dyn Future<Output = ExecutionStatus> + 'a>>;

fn run_sequence<'a>(
    graph: &'a TaskGraph,
    registry: &'a TaskRegistry,
    executed: &'a mut Vec<String>,
    context: &'a mut StageContext,
) -> BoxedStatus<'a> {
    Box::pin(async move {
        if graph.graph_type() == GraphType::Loop {
            return run_loop(graph, registry, executed, context).await;
        }
        for node in graph {
            let status = run_node(node, registry, executed, context).await;
            if status.is_halt() {
                return status;
            }
        }
        ExecutionStatus::Succeeded
    })
}

async fn run_loop(
    graph: &TaskGraph,
    registry: &TaskRegistry,
    executed: &mut Vec<String>,
    context: &mut StageContext,
) -> ExecutionStatus {
    let mut walker = LoopWalker::new(graph).unwrap();
    while let Some(node) = walker.current() {
        let status = run_node(node, registry, executed, context).await;
        walker.advance(status);
        assert!(walker.iterations() <= MAX_PASSES, "loop never settled");
    }

    match walker.state() {
        LoopState::Halted(status) => status,
        LoopState::Exit => ExecutionStatus::Succeeded,
        LoopState::Running(i) => panic!("walker stopped while running item {}", i),
    }
}

async fn run_node(
    node: &TaskNode,
    registry: &TaskRegistry,
    executed: &mut Vec<String>,
    context: &mut StageContext,
) -> ExecutionStatus {
    match node {
        TaskNode::Task(definition) => {
            let task = registry.resolve(definition).unwrap();
            let result = task.execute(context).await;
            context.merge_outputs(&result.outputs);
            executed.push(definition.name().to_string());
            result.status
        }
        TaskNode::Graph(sub) => run_sequence(sub, registry, executed, context).await,
    }
}
