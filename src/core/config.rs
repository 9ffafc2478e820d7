//! Stage configuration from YAML

use crate::core::{
    builder::Builder,
    graph::{self, TaskGraph},
    graph_type::GraphType,
    task::TaskRef,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Top-level stage definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Stage name
    pub name: String,

    /// Optional stage description
    #[serde(default)]
    pub description: Option<String>,

    /// How the top-level graph is evaluated
    #[serde(rename = "type", default)]
    pub graph_type: GraphType,

    /// Tasks and loops, in execution order
    #[serde(default)]
    pub tasks: Vec<NodeConfig>,
}

/// A task or a loop entry as written in YAML
///
/// Each shape rejects fields of the other, so an entry mixing `loop` with
/// `name`/`implementation` fails to parse instead of losing the task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeConfig {
    /// A loop sub-graph
    Loop(LoopConfig),
    /// A single task
    Task(TaskConfig),
}

/// A single task entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Human-readable task name
    pub name: String,

    /// Registry key of the implementation
    pub implementation: String,
}

/// A loop entry holding the tasks to repeat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoopConfig {
    #[serde(rename = "loop")]
    pub tasks: Vec<NodeConfig>,
}

impl StageConfig {
    /// Load stage configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_yaml(&content)?;
        info!("Loaded stage '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Parse stage configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: StageConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the stage configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Stage name must not be empty");
        }
        Self::validate_nodes(&self.name, &self.tasks)
    }

    fn validate_nodes(scope: &str, nodes: &[NodeConfig]) -> Result<()> {
        for (index, node) in nodes.iter().enumerate() {
            match node {
                NodeConfig::Task(TaskConfig {
                    name,
                    implementation,
                }) => {
                    if name.trim().is_empty() {
                        anyhow::bail!("Task #{} in '{}' has an empty name", index + 1, scope);
                    }
                    if !TaskRef::named(implementation.as_str()).is_well_formed() {
                        anyhow::bail!(
                            "Task '{}' in '{}' has an invalid implementation key '{}'",
                            name,
                            scope,
                            implementation
                        );
                    }
                }
                NodeConfig::Loop(LoopConfig { tasks }) => {
                    let loop_scope = format!("{} > loop #{}", scope, index + 1);
                    if tasks.is_empty() {
                        anyhow::bail!("'{}' has no tasks", loop_scope);
                    }
                    Self::validate_nodes(&loop_scope, tasks)?;
                }
            }
        }
        Ok(())
    }

    /// Count every task, nested loops included
    pub fn task_count(&self) -> usize {
        fn count(nodes: &[NodeConfig]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    NodeConfig::Task(_) => 1,
                    NodeConfig::Loop(LoopConfig { tasks }) => count(tasks),
                })
                .sum()
        }
        count(&self.tasks)
    }

    /// Build the task graph this configuration declares
    pub fn to_graph(&self) -> Result<TaskGraph> {
        let graph = graph::build(self.graph_type, |builder| {
            Self::add_nodes(builder, &self.tasks)
        })
        .with_context(|| format!("Failed to build graph for stage '{}'", self.name))?;
        Ok(graph)
    }

    fn add_nodes(builder: &mut Builder, nodes: &[NodeConfig]) -> crate::core::error::Result<()> {
        for node in nodes {
            match node {
                NodeConfig::Task(TaskConfig {
                    name,
                    implementation,
                }) => {
                    builder.with_task(name.as_str(), implementation.as_str())?;
                }
                NodeConfig::Loop(LoopConfig { tasks }) => {
                    builder.with_loop(|sub| Self::add_nodes(sub, tasks))?;
                }
            }
        }
        Ok(())
    }
}
