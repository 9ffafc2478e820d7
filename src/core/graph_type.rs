//! Graph type tag

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a task graph (or sub-graph) is evaluated by the execution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    /// The entire task sequence of a stage
    #[default]
    Full,
    /// A rolling-push style region that restarts when its last task redirects
    Loop,
    /// Tasks that run once before a parallel region
    Head,
    /// Tasks that run once after a parallel region
    Tail,
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphType::Full => "FULL",
            GraphType::Loop => "LOOP",
            GraphType::Head => "HEAD",
            GraphType::Tail => "TAIL",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_type_yaml_names() {
        let parsed: GraphType = serde_yaml::from_str("loop").unwrap();
        assert_eq!(parsed, GraphType::Loop);
        assert_eq!(serde_yaml::to_string(&GraphType::Tail).unwrap().trim(), "tail");
    }

    #[test]
    fn test_graph_type_display() {
        assert_eq!(GraphType::Full.to_string(), "FULL");
        assert_eq!(GraphType::Head.to_string(), "HEAD");
        assert_eq!(GraphType::default(), GraphType::Full);
    }
}
