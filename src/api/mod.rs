//! Messaging platform API
//!
//! Typed records and a client exposing one paginated source per resource.

mod client;
mod models;

pub use client::{Endpoint, MessagingApi};
pub use models::{Company, MembershipType, Message, MessageChannel, User};

#[cfg(test)]
mod tests;
