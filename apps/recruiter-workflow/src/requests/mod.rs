// Interview requests: recruiter proposes, candidate answers once.
// A confirmation opens a chat session through the chat outbox.

pub mod handlers;
pub mod models;
pub mod store;
pub mod workflow;
