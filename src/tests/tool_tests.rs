use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::ToolError;
use crate::tool_registry::{Tool, ToolRegistry, ToolSchema};
use crate::tools::{CalculatorTool, CurrentTimeTool, builtin_registry};

#[tokio::test]
async fn calculator_adds() {
    let result = CalculatorTool
        .execute(json!({"a": 1, "b": 2, "operation": "add"}))
        .await
        .unwrap();

    assert_eq!(result["result"], 3.0);
}

#[tokio::test]
async fn calculator_divides() {
    let result = CalculatorTool
        .execute(json!({"a": 9, "b": 3, "operation": "divide"}))
        .await
        .unwrap();

    assert_eq!(result["result"], 3.0);
}

#[tokio::test]
async fn calculator_rejects_division_by_zero() {
    let err = CalculatorTool
        .execute(json!({"a": 1, "b": 0, "operation": "divide"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::ExecutionFailed(_)));
}

#[tokio::test]
async fn calculator_rejects_missing_operands() {
    let err = CalculatorTool
        .execute(json!({"operation": "add"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::InvalidArguments(_)));
}

#[tokio::test]
async fn calculator_rejects_unsupported_operations() {
    let err = CalculatorTool
        .execute(json!({"a": 1, "b": 2, "operation": "modulo"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::InvalidArguments(_)));
}

#[tokio::test]
async fn current_time_reports_rfc3339() {
    let result = CurrentTimeTool.execute(json!({})).await.unwrap();

    assert!(result["rfc3339"].as_str().unwrap().contains('T'));
    assert!(result["unix"].as_i64().unwrap() > 0);
}

#[test]
fn builtin_registry_exposes_every_tool() {
    let registry = builtin_registry();

    assert_eq!(registry.len(), 2);
    assert!(registry.has("calculator"));
    assert!(registry.has("current_time"));
    assert!(registry.get("calculator").is_some());
    assert!(registry.get("nonexistent").is_none());
}

#[test]
fn schemas_use_the_functions_wire_shape() {
    let registry = builtin_registry();
    let schemas = registry.schemas();

    assert_eq!(schemas.len(), 2);
    let calculator = schemas
        .iter()
        .find(|schema| schema["name"] == "calculator")
        .unwrap();
    assert!(!calculator["description"].as_str().unwrap().is_empty());
    assert_eq!(calculator["parameters"]["type"], "object");
}

#[test]
fn duplicate_registration_replaces_the_earlier_entry() {
    struct ShadowCalculator;

    #[async_trait]
    impl Tool for ShadowCalculator {
        fn schema(&self) -> ToolSchema {
            ToolSchema::new("calculator", "replacement")
        }

        async fn execute(&self, _arguments: Value) -> Result<Value, ToolError> {
            Ok(json!(null))
        }
    }

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CalculatorTool));
    registry.register(Arc::new(ShadowCalculator));

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.get("calculator").unwrap().schema().description,
        "replacement"
    );
}
