//! Core domain models for stage task graphs
//!
//! This module defines the tree of tasks that describes how a stage runs,
//! the builder used to declare it, and the boundary types an execution
//! engine uses to walk it.

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod graph_type;
pub mod registry;
pub mod state;
pub mod task;
pub mod traversal;

pub use builder::*;
pub use context::*;
pub use error::*;
pub use graph::{GraphCursor, TaskGraph, TaskNode, Tasks};
pub use graph_type::*;
pub use registry::*;
pub use state::*;
pub use task::*;
pub use traversal::*;
