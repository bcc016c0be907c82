//! Built-in tools usable out of the box. Anything else is registered by
//! implementing [`Tool`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::ToolError;
use crate::tool_registry::{Tool, ToolRegistry, ToolSchema};

/// Binary arithmetic on two operands.
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new("calculator", "Perform arithmetic on two numbers").with_parameters(json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "number",
                    "description": "First operand"
                },
                "b": {
                    "type": "number",
                    "description": "Second operand"
                },
                "operation": {
                    "type": "string",
                    "enum": ["add", "subtract", "multiply", "divide"],
                    "description": "Operation to apply"
                }
            },
            "required": ["a", "b", "operation"]
        }))
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let a = arguments["a"]
            .as_f64()
            .ok_or_else(|| ToolError::InvalidArguments("missing numeric field 'a'".to_string()))?;
        let b = arguments["b"]
            .as_f64()
            .ok_or_else(|| ToolError::InvalidArguments("missing numeric field 'b'".to_string()))?;
        let operation = arguments["operation"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("missing field 'operation'".to_string()))?;

        let result = match operation {
            "add" => a + b,
            "subtract" => a - b,
            "multiply" => a * b,
            "divide" => {
                if b == 0.0 {
                    return Err(ToolError::ExecutionFailed("division by zero".to_string()));
                }
                a / b
            }
            other => {
                return Err(ToolError::InvalidArguments(format!(
                    "unsupported operation '{other}'"
                )));
            }
        };

        Ok(json!({ "result": result }))
    }
}

/// Current date and time in UTC.
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new("current_time", "Get the current date and time in UTC")
    }

    async fn execute(&self, _arguments: Value) -> Result<Value, ToolError> {
        let now = chrono::Utc::now();
        Ok(json!({
            "rfc3339": now.to_rfc3339(),
            "unix": now.timestamp(),
        }))
    }
}

/// Registry preloaded with every built-in tool.
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CalculatorTool));
    registry.register(Arc::new(CurrentTimeTool));
    registry
}
