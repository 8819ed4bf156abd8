//! Streaming response reader
//!
//! Reads a streamed chat completion line by line with a per-line timeout,
//! accepts partial output when the stream stalls after producing text, and
//! falls back to a single non-streaming request when it stalls before any
//! text arrived.

mod backend;
mod reader;
mod types;


pub use backend::{ChatBackend, LineStream};
pub use reader::StreamingReader;
pub use types::{GenerationOutcome, ResponseSource, StreamingConfig};
