use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::agent::ChatCompletion;
use crate::conversation::Conversation;
use crate::error::ChatError;
use crate::tool_registry::ToolRegistry;
use crate::types::{CompletionResult, FunctionCallRequest, Message};

enum Scripted {
    Result(CompletionResult),
    Fail(String),
}

/// Queue-driven stand-in for `ChatClient`. Responses come back in the order
/// they were added; every completion call is recorded for later inspection.
#[derive(Clone, Default)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<Scripted>>>,
    call_history: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_answer(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push(Scripted::Result(CompletionResult::Answer(text.to_string())));
    }

    pub fn add_function_call(&self, name: &str, arguments: &str) {
        self.responses.lock().unwrap().push(Scripted::Result(
            CompletionResult::FunctionCall(FunctionCallRequest {
                name: name.to_string(),
                arguments: arguments.to_string(),
            }),
        ));
    }

    /// The next completion call fails with a server error.
    pub fn add_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push(Scripted::Fail(message.to_string()));
    }

    /// Message snapshots of every completion call made so far.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    fn record(&self, conversation: &Conversation) {
        self.call_history
            .lock()
            .unwrap()
            .push(conversation.messages().to_vec());
    }

    fn next_response(&self) -> Result<CompletionResult, ChatError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(CompletionResult::Answer(
                "no more mock responses configured".to_string(),
            ));
        }
        match responses.remove(0) {
            Scripted::Result(result) => Ok(result),
            Scripted::Fail(message) => Err(ChatError::Api {
                status: 500,
                message,
            }),
        }
    }
}

#[async_trait]
impl ChatCompletion for MockChatClient {
    async fn complete(
        &self,
        conversation: &Conversation,
    ) -> Result<CompletionResult, ChatError> {
        self.record(conversation);
        self.next_response()
    }

    async fn complete_with_functions(
        &self,
        conversation: &Conversation,
        _tools: &ToolRegistry,
        _target: Option<&str>,
    ) -> Result<CompletionResult, ChatError> {
        self.record(conversation);
        self.next_response()
    }
}
