use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use toolchat::tools::{CalculatorTool, CurrentTimeTool};
use toolchat::{Agent, ChatClient, ChatConfig, ChatError, Conversation, Message, ToolRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ChatConfig::from_env().context("OPENAI_API_KEY must be set")?;
    let client = ChatClient::new(config)?;

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CalculatorTool));
    registry.register(Arc::new(CurrentTimeTool));
    let agent = Agent::new(Box::new(client), registry);

    let mut conversation = Conversation::with_system("You are a helpful assistant.");

    println!("\u{001b}[94mChat with function calling. Type 'quit' to exit.\u{001b}[0m");

    loop {
        print!("\u{001b}[93mYou:\u{001b}[0m ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "" => continue,
            "quit" => break,
            line => {
                conversation.add_message(Message::user(line));
                // Let the model pick a function; fall back to its plain
                // answer when it does not want one.
                match agent.run_function_call_turn(&mut conversation, None).await {
                    Ok(answer) => println!("\u{001b}[96mAgent:\u{001b}[0m {answer}"),
                    Err(ChatError::NoFunctionCall(text)) => {
                        conversation.add_message(Message::assistant(text.clone()));
                        println!("\u{001b}[96mAgent:\u{001b}[0m {text}");
                    }
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
        }
    }

    Ok(())
}
