mod conversation_tests;
mod tool_tests;
