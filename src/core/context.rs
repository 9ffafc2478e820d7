//! Stage context - values shared between the tasks of a stage

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key/value context handed to every task of a stage
///
/// Outputs returned by a task are merged in so later tasks, and later
/// passes through a loop, can see them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageContext {
    /// Stage inputs and accumulated task outputs
    pub values: Map<String, Value>,
}

impl StageContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Merge task outputs, overwriting existing keys
    pub fn merge_outputs(&mut self, outputs: &Map<String, Value>) {
        for (key, value) in outputs {
            self.values.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_values() {
        let mut ctx = StageContext::new();
        ctx.set("region", "us-east-1");

        assert_eq!(ctx.get("region"), Some(&json!("us-east-1")));
        assert_eq!(ctx.get("account"), None);
    }

    #[test]
    fn test_merge_outputs_overwrites() {
        let mut ctx = StageContext::new();
        ctx.set("remaining", 3);

        let mut outputs = Map::new();
        outputs.insert("remaining".to_string(), json!(2));
        outputs.insert("batch".to_string(), json!("b-1"));
        ctx.merge_outputs(&outputs);

        assert_eq!(ctx.get("remaining"), Some(&json!(2)));
        assert_eq!(ctx.get("batch"), Some(&json!("b-1")));
    }
}
