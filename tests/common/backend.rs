//! Scripted model server doubles

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use llmbot::core::AvailabilityProbe;
use llmbot::core::ollama::ChatRequest;
use llmbot::core::streaming::{ChatBackend, LineStream};
use llmbot::{BotError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// One NDJSON chunk carrying `content`
pub fn chunk_line(content: &str) -> String {
    serde_json::json!({
        "message": { "role": "assistant", "content": content },
        "done": false
    })
    .to_string()
}

/// Final NDJSON chunk
pub fn done_line() -> String {
    serde_json::json!({
        "message": { "role": "assistant", "content": "" },
        "done": true
    })
    .to_string()
}

/// Behaviour of one streaming call
#[derive(Debug, Clone)]
pub enum StreamScript {
    /// Emit these lines, then end
    Lines(Vec<String>),
    /// Open, then never produce a line
    Stall,
    /// Refuse to open with this HTTP status
    Fail(u16),
}

impl StreamScript {
    /// Complete reply split into word chunks
    pub fn reply(text: &str) -> Self {
        let mut lines: Vec<String> = text
            .split_inclusive(' ')
            .map(chunk_line)
            .collect();
        lines.push(done_line());
        Self::Lines(lines)
    }
}

/// Chat backend that plays back queued scripts and records every request
pub struct ScriptedBackend {
    default_reply: String,
    scripts: Mutex<VecDeque<StreamScript>>,
    complete_reply: Mutex<Option<String>>,
    requests: Mutex<Vec<ChatRequest>>,
    complete_calls: AtomicUsize,
}

impl ScriptedBackend {
    /// Every stream answers `text` unless a script is queued
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            default_reply: text.to_string(),
            scripts: Mutex::new(VecDeque::new()),
            complete_reply: Mutex::new(Some(text.to_string())),
            requests: Mutex::new(Vec::new()),
            complete_calls: AtomicUsize::new(0),
        })
    }

    /// Queue a script for the next streaming call
    pub fn push(&self, script: StreamScript) {
        self.scripts.lock().push_back(script);
    }

    /// Text of non-streaming calls; None makes them fail with HTTP 503
    pub fn set_complete_reply(&self, reply: Option<&str>) {
        *self.complete_reply.lock() = reply.map(str::to_string);
    }

    /// Every request seen, streaming or not
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }

    pub fn complete_calls(&self) -> usize {
        self.complete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn open_stream(&self, request: &ChatRequest, _timeout: Duration) -> Result<LineStream> {
        self.requests.lock().push(request.clone());
        let script = self
            .scripts
            .lock()
            .pop_front()
            .unwrap_or_else(|| StreamScript::reply(&self.default_reply));

        match script {
            StreamScript::Lines(lines) => Ok(stream::iter(lines.into_iter().map(Ok::<String, BotError>)).boxed()),
            StreamScript::Stall => Ok(stream::pending::<Result<String>>().boxed()),
            StreamScript::Fail(status) => Err(BotError::Upstream {
                status,
                message: "scripted failure".to_string(),
            }),
        }
    }

    async fn complete(&self, request: &ChatRequest, _timeout: Duration) -> Result<String> {
        self.requests.lock().push(request.clone());
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        match self.complete_reply.lock().clone() {
            Some(text) => Ok(text),
            None => Err(BotError::Upstream {
                status: 503,
                message: "model loading".to_string(),
            }),
        }
    }
}

/// Availability probe with a switchable answer
pub struct StaticProbe {
    up: AtomicBool,
}

impl StaticProbe {
    pub fn new(up: bool) -> Arc<Self> {
        Arc::new(Self {
            up: AtomicBool::new(up),
        })
    }

    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvailabilityProbe for StaticProbe {
    async fn probe(&self) -> Result<()> {
        if self.up.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BotError::connection("connection refused"))
        }
    }
}
