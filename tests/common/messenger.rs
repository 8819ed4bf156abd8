//! Messenger that keeps every reply for inspection

use async_trait::async_trait;
use llmbot::Result;
use llmbot::messaging::{Conversation, Messenger, Reply};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(Conversation, Reply)>>,
}

impl RecordingMessenger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(Conversation, Reply)> {
        self.sent.lock().clone()
    }

    /// Rendered text of every reply, in order
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(_, r)| r.render()).collect()
    }

    pub fn last(&self) -> Option<Reply> {
        self.sent.lock().last().map(|(_, r)| r.clone())
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, target: &Conversation, reply: Reply) -> Result<()> {
        self.sent.lock().push((target.clone(), reply));
        Ok(())
    }
}
