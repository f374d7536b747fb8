//! Chat layout, conversation pages and message posting.

use axum::extract::{Extension, Path, State};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::{AppState, PageError, credential};
use crate::api::{
    ApiClient, Completion, Conversation, DEFAULT_CONVERSATION_TITLE, Message, Role, UserProfile,
};
use crate::guard::{RequestContext, SessionCredential};

/// Data shared by every page under `/chat`.
#[derive(Debug, Serialize)]
pub struct ChatLayout {
    pub user: UserProfile,
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Deserialize)]
pub struct NewMessage {
    #[serde(alias = "message")]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct NewChat {
    pub conversation_id: i64,
    pub completion: Completion,
}

#[derive(Debug, Serialize)]
pub struct ConversationPage {
    pub conversation_id: i64,
    pub messages: Vec<Message>,
}

/// GET /chat
///
/// Backend failures degrade to an empty layout instead of an error page.
pub async fn chat_layout(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<ChatLayout>, PageError> {
    let credential = credential(&ctx)?;

    let user_fut = async {
        match ctx.user.clone() {
            Some(user) => Ok(user),
            None => state.api.fetch_user(credential).await,
        }
    };
    let conversations_fut = state.api.fetch_conversations(credential);
    let (user, conversations) = futures::join!(user_fut, conversations_fut);

    let user = user.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load user for chat layout");
        UserProfile::default()
    });
    let conversations = match conversations {
        Ok(list) => list.active().sorted_by_recent().conversations,
        Err(e) => {
            warn!(error = %e, "Failed to load conversations for chat layout");
            Vec::new()
        }
    };

    Ok(Json(ChatLayout {
        user,
        conversations,
    }))
}

/// POST /chat
///
/// Starts a conversation from its first message and answers it.
pub async fn start_chat(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Form(message): Form<NewMessage>,
) -> Result<Json<NewChat>, PageError> {
    let credential = credential(&ctx)?;

    let conversation_id = state
        .api
        .create_conversation(credential, DEFAULT_CONVERSATION_TITLE)
        .await?;
    let completion = exchange(&state.api, credential, conversation_id, &message.content).await?;

    Ok(Json(NewChat {
        conversation_id,
        completion,
    }))
}

/// GET /chat/{conversation_id}
pub async fn conversation(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(conversation_id): Path<i64>,
) -> Result<Json<ConversationPage>, PageError> {
    let credential = credential(&ctx)?;

    let messages = state
        .api
        .fetch_messages(credential, conversation_id)
        .await
        .map_err(|e| {
            error!(conversation_id, error = %e, "Error fetching messages");
            PageError::Internal("Failed to fetch messages".to_string())
        })?;

    Ok(Json(ConversationPage {
        conversation_id,
        messages,
    }))
}

/// POST /chat/{conversation_id}
pub async fn send_message(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(conversation_id): Path<i64>,
    Form(message): Form<NewMessage>,
) -> Result<Json<Completion>, PageError> {
    let credential = credential(&ctx)?;
    let completion = exchange(&state.api, credential, conversation_id, &message.content).await?;
    Ok(Json(completion))
}

/// Store the user's message, ask for a completion, store the answer.
async fn exchange(
    api: &ApiClient,
    credential: &SessionCredential,
    conversation_id: i64,
    content: &str,
) -> Result<Completion, PageError> {
    api.create_message(credential, conversation_id, content, Role::User)
        .await?;
    let completion = api.create_completion(credential, content).await?;
    api.create_message(
        credential,
        conversation_id,
        &completion.content,
        Role::Assistant,
    )
    .await?;
    Ok(completion)
}
