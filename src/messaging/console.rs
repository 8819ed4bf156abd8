//! Stdout messenger used by the console binary

use super::Messenger;
use super::types::{Conversation, Reply};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Writes replies to stdout, one block per reply
pub struct ConsoleMessenger {
    out: Mutex<tokio::io::Stdout>,
}

impl ConsoleMessenger {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for ConsoleMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send(&self, target: &Conversation, reply: Reply) -> Result<()> {
        let block = format!("[{}] {}\n", target, reply.render());
        let mut out = self.out.lock().await;
        out.write_all(block.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}
