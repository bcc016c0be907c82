use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ChatError;

/// Speaker of a conversation message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Function,
}

/// One turn of a conversation, in the chat-completion wire shape.
///
/// `content` is `None` only for a function-call request coming back from
/// the model; messages stored in a conversation always carry text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            name: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
            name: None,
        }
    }

    /// A function result turn. `name` identifies the function that produced
    /// the result.
    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            content: Some(content.into()),
            name: Some(name.into()),
        }
    }
}

/// What the model sent back: either a finished answer or a request to
/// invoke one of the advertised functions. Never both.
#[derive(Clone, Debug, PartialEq)]
pub enum CompletionResult {
    Answer(String),
    FunctionCall(FunctionCallRequest),
}

/// A function invocation requested by the model. `arguments` is the raw
/// payload exactly as it appeared on the wire.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FunctionCallRequest {
    pub name: String,
    pub arguments: String,
}

impl FunctionCallRequest {
    /// Parse the raw argument payload into a key/value map.
    ///
    /// The payload is treated strictly as data; anything that is not a JSON
    /// object is reported as `MalformedArguments` for the caller to handle.
    pub fn parse_arguments(&self) -> Result<Map<String, Value>, ChatError> {
        let value: Value =
            serde_json::from_str(&self.arguments).map_err(|e| ChatError::MalformedArguments {
                name: self.name.clone(),
                detail: e.to_string(),
            })?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(ChatError::MalformedArguments {
                name: self.name.clone(),
                detail: format!("expected a JSON object, got: {other}"),
            }),
        }
    }
}
