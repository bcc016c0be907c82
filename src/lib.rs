//! Minimal client for an LLM chat-completion API with function calling.
//!
//! The crate drives the function-calling round trip against an
//! OpenAI-compatible endpoint: advertise a registry of callables, let the
//! model pick one, execute it locally, feed the result back into the
//! conversation, and return the model's final reply.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use toolchat::tools::CalculatorTool;
//! use toolchat::{Agent, ChatClient, ChatConfig, Conversation, Message, ToolRegistry};
//!
//! # async fn demo() -> Result<(), toolchat::ChatError> {
//! let client = ChatClient::new(ChatConfig::from_env()?)?;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(Arc::new(CalculatorTool));
//!
//! let agent = Agent::new(Box::new(client), registry);
//!
//! let mut conversation = Conversation::with_system("You are a helpful assistant.");
//! conversation.add_message(Message::user("What is 21 * 2?"));
//!
//! let answer = agent.run_function_call_turn(&mut conversation, None).await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod conversation;
pub mod error;
pub mod llm_client;
pub mod mocks;
pub mod tool_registry;
pub mod tools;
pub mod types;

#[cfg(test)]
mod tests;

pub use agent::{Agent, ChatCompletion};
pub use conversation::Conversation;
pub use error::{ChatError, ToolError};
pub use llm_client::{ChatClient, ChatConfig, RetryConfig};
pub use tool_registry::{Tool, ToolRegistry, ToolSchema};
pub use types::{CompletionResult, FunctionCallRequest, Message, Role};
