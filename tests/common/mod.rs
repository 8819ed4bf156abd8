//! Common test utilities for llmbot
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{ScriptedBackend, TestBot};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let bot = TestBot::new(ScriptedBackend::replying("hi")).await;
//!     // ...
//! }
//! ```

pub mod backend;
pub mod harness;
pub mod messenger;

// Re-export commonly used items
pub use backend::{ScriptedBackend, StaticProbe, StreamScript, chunk_line, done_line};
pub use database::TestDatabase;
pub use harness::TestBot;
pub use messenger::RecordingMessenger;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
