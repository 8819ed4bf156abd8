//! Per-user conversation memory
//!
//! Users opt in to memory; while enabled their recent turns are replayed to
//! the model. Histories are bounded and expire after a period of inactivity.

mod store;


pub use store::{ContextStatus, ConversationStore};
