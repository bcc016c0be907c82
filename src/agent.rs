use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::conversation::Conversation;
use crate::error::ChatError;
use crate::llm_client::ChatClient;
use crate::tool_registry::ToolRegistry;
use crate::types::{CompletionResult, Message};

/// Completion backend the orchestrator drives. Lets tests substitute a
/// scripted mock for the HTTP client.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        conversation: &Conversation,
    ) -> Result<CompletionResult, ChatError>;

    async fn complete_with_functions(
        &self,
        conversation: &Conversation,
        tools: &ToolRegistry,
        target: Option<&str>,
    ) -> Result<CompletionResult, ChatError>;
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete(
        &self,
        conversation: &Conversation,
    ) -> Result<CompletionResult, ChatError> {
        ChatClient::complete(self, conversation).await
    }

    async fn complete_with_functions(
        &self,
        conversation: &Conversation,
        tools: &ToolRegistry,
        target: Option<&str>,
    ) -> Result<CompletionResult, ChatError> {
        ChatClient::complete_with_functions(self, conversation, tools, target).await
    }
}

/// Drives the function-calling round trip: request a function call, execute
/// it locally, feed the result back, and ask for the final reply.
pub struct Agent {
    llm: Box<dyn ChatCompletion>,
    tools: ToolRegistry,
}

impl Agent {
    pub fn new(llm: Box<dyn ChatCompletion>, tools: ToolRegistry) -> Self {
        Self { llm, tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// One full function-calling round trip.
    ///
    /// The model must answer with a function call; `target` forces a
    /// specific registered function. On success the conversation gains
    /// exactly two messages: the function result and the assistant's final
    /// reply. Failures before the function result is appended leave the
    /// conversation untouched.
    pub async fn run_function_call_turn(
        &self,
        conversation: &mut Conversation,
        target: Option<&str>,
    ) -> Result<String, ChatError> {
        let result = self
            .llm
            .complete_with_functions(conversation, &self.tools, target)
            .await?;

        let call = match result {
            CompletionResult::FunctionCall(call) => call,
            CompletionResult::Answer(text) => return Err(ChatError::NoFunctionCall(text)),
        };

        let arguments = call.parse_arguments()?;

        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| ChatError::UnknownFunction(call.name.clone()))?;

        debug!(function = %call.name, "executing requested function");
        let output = tool.execute(Value::Object(arguments)).await?;
        let rendered = render_result(output);
        debug!(function = %call.name, result = %rendered, "function executed");

        conversation.add_message(Message::function(&call.name, rendered));

        let answer = match self.llm.complete(conversation).await? {
            CompletionResult::Answer(text) => text,
            CompletionResult::FunctionCall(call) => {
                return Err(ChatError::InvalidResponse(format!(
                    "model requested another function call ('{}') instead of answering",
                    call.name
                )));
            }
        };

        conversation.add_message(Message::assistant(answer.clone()));
        Ok(answer)
    }

    /// Plain chat turn: append the user's message, return the assistant's
    /// reply. No functions are advertised.
    pub async fn chat(
        &self,
        conversation: &mut Conversation,
        user_input: impl Into<String> + Send,
    ) -> Result<String, ChatError> {
        conversation.add_message(Message::user(user_input));

        let answer = match self.llm.complete(conversation).await? {
            CompletionResult::Answer(text) => text,
            CompletionResult::FunctionCall(call) => {
                return Err(ChatError::InvalidResponse(format!(
                    "unsolicited function call: '{}'",
                    call.name
                )));
            }
        };

        conversation.add_message(Message::assistant(answer.clone()));
        Ok(answer)
    }
}

// A string result goes in verbatim, anything else as compact JSON.
fn render_result(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
