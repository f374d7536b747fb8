//! Conversation, message and completion endpoints.

use serde_json::json;

use super::client::{ApiClient, RequestSpec};
use super::model::{Completion, ConversationList, Message, MessagesEnvelope, Role};
use crate::error::ApiError;
use crate::guard::SessionCredential;

/// Title given to conversations created from the chat page.
pub const DEFAULT_CONVERSATION_TITLE: &str = "Untitled";

impl ApiClient {
    /// GET /conversations
    pub async fn fetch_conversations(
        &self,
        credential: &SessionCredential,
    ) -> Result<ConversationList, ApiError> {
        self.send_json(RequestSpec::get("/conversations").authorized(Some(credential)))
            .await
    }

    /// POST /conversations
    ///
    /// Returns the new conversation's id.
    pub async fn create_conversation(
        &self,
        credential: &SessionCredential,
        title: &str,
    ) -> Result<i64, ApiError> {
        let path = "/conversations";
        let created: serde_json::Value = self
            .send_json(
                RequestSpec::post(path)
                    .json(json!({ "title": title }))
                    .authorized(Some(credential)),
            )
            .await?;

        created
            .get("conversation_id")
            .and_then(|id| id.as_i64())
            .ok_or_else(|| ApiError::Decode {
                path: path.to_string(),
                reason: "missing conversation_id".to_string(),
            })
    }

    /// GET /conversations/{id}/messages
    pub async fn fetch_messages(
        &self,
        credential: &SessionCredential,
        conversation_id: i64,
    ) -> Result<Vec<Message>, ApiError> {
        let envelope: MessagesEnvelope = self
            .send_json(
                RequestSpec::get(format!("/conversations/{conversation_id}/messages"))
                    .authorized(Some(credential)),
            )
            .await?;
        Ok(envelope.messages)
    }

    /// POST /conversations/{id}/messages
    pub async fn create_message(
        &self,
        credential: &SessionCredential,
        conversation_id: i64,
        content: &str,
        role: Role,
    ) -> Result<(), ApiError> {
        self.send(
            RequestSpec::post(format!("/conversations/{conversation_id}/messages"))
                .json(json!({ "content": content, "role": role }))
                .authorized(Some(credential)),
        )
        .await?;
        Ok(())
    }

    /// POST /completions
    pub async fn create_completion(
        &self,
        credential: &SessionCredential,
        query: &str,
    ) -> Result<Completion, ApiError> {
        let message = Message {
            content: query.to_string(),
            role: Role::User,
        };
        let body = json!({ "messages": [message] });
        self.send_json(
            RequestSpec::post("/completions")
                .json(body)
                .authorized(Some(credential)),
        )
        .await
    }
}
