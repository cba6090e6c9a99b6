use serde::{Deserialize, Serialize};

/// A single message in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, content: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Request sent to a model provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub stream: bool,
}

impl CompletionRequest {
    /// A streaming request over the given history.
    pub fn streaming(messages: Vec<Message>) -> Self {
        Self { messages, stream: true }
    }
}

/// A single streamed event from the model.
#[derive(Debug, Clone)]
pub enum ResponseEvent {
    /// A text chunk streamed from the model
    TextDelta(String),
    /// The stream finished normally
    Done,
    /// A recoverable error reported in-band by the provider
    Error(String),
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(Message::system("p").role, Role::System);
        assert_eq!(Message::user("q").role, Role::User);
        assert_eq!(Message::assistant("a").role, Role::Assistant);
    }

    #[test]
    fn role_serialises_lowercase() {
        let m = Message::user("hi");
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"role\":\"user\""), "got: {json}");
    }

    #[test]
    fn message_round_trips_through_json() {
        let original = Message::assistant("test payload");
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn streaming_request_sets_flag() {
        let req = CompletionRequest::streaming(vec![Message::user("hi")]);
        assert!(req.stream);
        assert_eq!(req.messages.len(), 1);
    }
}
