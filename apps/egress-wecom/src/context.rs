use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What the orchestrator knows about the current run.
///
/// The notifier only reads it for log fields and to render templated message
/// content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunContext {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub run_id: String,
    #[serde(default)]
    pub vars: Map<String, Value>,
}

impl RunContext {
    pub fn new(task_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            run_id: run_id.into(),
            vars: Map::new(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Data exposed to templates: every var plus `task_id` and `run_id`,
    /// the latter two taking precedence.
    pub fn template_data(&self) -> Value {
        let mut data = self.vars.clone();
        data.insert("task_id".into(), Value::String(self.task_id.clone()));
        data.insert("run_id".into(), Value::String(self.run_id.clone()));
        Value::Object(data)
    }
}
