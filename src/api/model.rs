//! Wire models shared with the backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder the backend uses for profile fields that were never filled in.
const UNSET_FIELD: &str = "null";

/// A user's profile as returned by `GET /users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub university: String,
}

impl UserProfile {
    /// Whether every onboarding field has been filled in.
    pub fn is_onboarded(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.student_id,
            &self.university,
        ]
        .iter()
        .all(|field| !field.trim().is_empty() && field.as_str() != UNSET_FIELD)
    }
}

/// `{ "user": { ... } }`
#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: UserProfile,
}

/// Lifecycle state of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationStatus {
    Active,
    Archived,
    Starred,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub last_message_at: DateTime<Utc>,
    pub status: ConversationStatus,
}

/// The user's conversations, as returned by `GET /conversations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationList {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

impl ConversationList {
    /// Only conversations in the `Active` state.
    pub fn active(self) -> Self {
        Self {
            conversations: self
                .conversations
                .into_iter()
                .filter(|c| c.status == ConversationStatus::Active)
                .collect(),
        }
    }

    /// Newest `last_message_at` first.
    pub fn sorted_by_recent(mut self) -> Self {
        self.conversations
            .sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        self
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub role: Role,
}

/// `{ "messages": [...] }`
#[derive(Debug, Deserialize)]
pub(crate) struct MessagesEnvelope {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// An AI completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
}

/// Signup payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub university: String,
}

/// Profile fields collected during onboarding (`PUT /users`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub student_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(id: i64, at: &str, status: ConversationStatus) -> Conversation {
        Conversation {
            id,
            owner_id: 1,
            title: format!("conv {id}"),
            last_message_at: at.parse().unwrap(),
            status,
        }
    }

    #[test]
    fn active_sorted_newest_first() {
        let list = ConversationList {
            conversations: vec![
                conversation(1, "2024-01-01T10:00:00Z", ConversationStatus::Active),
                conversation(2, "2024-03-01T10:00:00Z", ConversationStatus::Archived),
                conversation(3, "2024-02-01T10:00:00Z", ConversationStatus::Active),
            ],
        };

        let list = list.active().sorted_by_recent();
        let ids: Vec<i64> = list.conversations.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn user_with_placeholder_fields_is_not_onboarded() {
        let json = r#"{"user": {"id": 7, "email": "a@tcu.edu", "first_name": "null",
            "last_name": "null", "student_id": "null", "university": "null"}}"#;
        let envelope: UserEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.user.id, 7);
        assert!(!envelope.user.is_onboarded());
    }

    #[test]
    fn complete_user_is_onboarded() {
        let user = UserProfile {
            id: 1,
            email: "ada@tcu.edu".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            student_id: "S100".into(),
            university: "TCU".into(),
        };
        assert!(user.is_onboarded());
    }

    #[test]
    fn conversation_list_tolerates_missing_field() {
        let list: ConversationList = serde_json::from_str("{}").unwrap();
        assert!(list.is_empty());
    }
}
