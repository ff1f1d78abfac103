use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

/// Append-only turn history for one chat session. Turns are never reordered
/// or removed; display order is insertion order.
#[derive(Debug, Clone)]
pub struct Conversation {
    id: String,
    turns: Vec<ChatTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: Role::User,
            content: content.into(),
            created_at: now_rfc3339(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            role: Role::Assistant,
            content: content.into(),
            created_at: now_rfc3339(),
        });
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// One user turn's worth of input to the prompt builder.
#[derive(Debug, Clone)]
pub struct AlgorithmRequest {
    pub problem_description: String,
    pub target_language: String,
}

impl AlgorithmRequest {
    pub fn new(problem_description: impl Into<String>) -> Self {
        Self {
            problem_description: problem_description.into(),
            target_language: "Any".to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = language.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct AlgorithmResponse {
    pub explanation_text: String,
    pub used_dynamic_typing_framing: bool,
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::{Conversation, Role};

    #[test]
    fn turns_keep_insertion_order() {
        let mut conv = Conversation::new();
        conv.push_user("first");
        conv.push_assistant("second");
        conv.push_user("third");

        let roles: Vec<Role> = conv.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(conv.turns()[2].content, "third");
    }

    #[test]
    fn new_conversations_get_distinct_ids() {
        let a = Conversation::new();
        let b = Conversation::new();
        assert_ne!(a.id(), b.id());
        assert!(a.is_empty());
    }

    #[test]
    fn timestamps_are_rfc3339() {
        let mut conv = Conversation::new();
        conv.push_user("hi");
        let ts = &conv.turns()[0].created_at;
        assert!(ts.contains('T'), "unexpected timestamp: {ts}");
    }
}
