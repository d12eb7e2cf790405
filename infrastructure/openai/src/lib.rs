pub mod chat_model;
pub mod client;
pub mod sse;
