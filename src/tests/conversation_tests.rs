use crate::conversation::Conversation;
use crate::types::{Message, Role};

#[test]
fn starts_empty_with_a_fresh_id() {
    let a = Conversation::new();
    let b = Conversation::new();

    assert!(a.is_empty());
    assert_eq!(a.len(), 0);
    assert_ne!(a.id, b.id);
}

#[test]
fn with_system_seeds_the_system_prompt() {
    let conversation = Conversation::with_system("You are a helpful assistant.");

    assert_eq!(conversation.len(), 1);
    let message = conversation.last().unwrap();
    assert_eq!(message.role, Role::System);
    assert_eq!(
        message.content.as_deref(),
        Some("You are a helpful assistant.")
    );
}

#[test]
fn messages_are_appended_in_order() {
    let mut conversation = Conversation::new();
    conversation.add_message(Message::user("first"));
    conversation.add_message(Message::assistant("second"));
    conversation.add_message(Message::function("add", "3"));

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[2].role, Role::Function);
}

#[test]
fn appending_advances_updated_at() {
    let mut conversation = Conversation::new();
    let created = conversation.updated_at;

    conversation.add_message(Message::user("hi"));

    assert!(conversation.updated_at >= created);
}

#[test]
fn function_messages_carry_their_name() {
    let message = Message::function("add", "3");

    assert_eq!(message.role, Role::Function);
    assert_eq!(message.name.as_deref(), Some("add"));
    assert_eq!(message.content.as_deref(), Some("3"));
}

#[test]
fn message_serialization_matches_the_wire_shape() {
    let user = serde_json::to_value(Message::user("hello")).unwrap();
    assert_eq!(user["role"], "user");
    assert_eq!(user["content"], "hello");
    assert!(user.get("name").is_none());

    let function = serde_json::to_value(Message::function("add", "3")).unwrap();
    assert_eq!(function["role"], "function");
    assert_eq!(function["name"], "add");
    assert_eq!(function["content"], "3");
}
