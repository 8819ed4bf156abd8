//! Outbound messaging
//!
//! The platform adapter is reached only through [`Messenger`]; features build
//! a [`Reply`] and leave delivery to it.

mod console;
mod types;


pub use console::ConsoleMessenger;
pub use types::{Conversation, Reply, split_paragraphs};

use crate::utils::error::Result;
use async_trait::async_trait;

/// Send primitive of the chat platform
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver one logical reply to a conversation
    async fn send(&self, target: &Conversation, reply: Reply) -> Result<()>;
}
