//! Backend REST client.

pub mod auth;
pub mod client;
pub mod conversations;
pub mod model;
pub mod users;

pub use client::{ApiClient, RequestSpec};
pub use conversations::DEFAULT_CONVERSATION_TITLE;
pub use model::{
    Completion, Conversation, ConversationList, ConversationStatus, Message, NewUser,
    ProfileUpdate, Role, UserProfile,
};
