//! Data model for the remote chat-completions exchange.
//!
//! These types serialize/deserialize directly to/from the JSON payloads of
//! `POST {base_url}/chat/completions` on OpenAI-compatible endpoints.

use serde::{Deserialize, Serialize};

/// Conversation participant role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction message (the assembled directory context).
    System,
    /// End-user message (the raw query line).
    User,
    /// Assistant/model message.
    Assistant,
}

/// A single message in the two-message exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for POST /chat/completions.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier used for request routing.
    pub model: String,
    /// System context followed by the user query.
    pub messages: Vec<Message>,
}

/// Response body from POST /chat/completions.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Ranked response choices; the first one carries the answer.
    pub choices: Vec<Choice>,
}

/// A single choice in the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Message,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_chat_request_shape() {
        let req = ChatRequest {
            model: "sonar-reasoning-pro".into(),
            messages: vec![
                Message::system("Current directory: /tmp"),
                Message::user("explain main.rs"),
            ],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "sonar-reasoning-pro");
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "explain main.rs");
    }

    #[test]
    fn deserialize_chat_response_first_choice() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hello!" },
                "finish_reason": "stop"
            }]
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.choices.len(), 1);
        assert_eq!(resp.choices[0].message.content, "Hello!");
        assert_eq!(resp.choices[0].message.role, Role::Assistant);
    }

    #[test]
    fn deserialize_empty_choices() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(resp.choices.is_empty());
    }
}
