pub mod mock_llm_client;

pub use mock_llm_client::MockChatClient;
