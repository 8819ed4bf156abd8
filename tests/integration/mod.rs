//! Integration tests for llmbot
//!
//! These tests drive whole features through the dispatcher, talk to a mock
//! HTTP server, and use a real in-memory SQLite ledger.

pub mod config_tests;
pub mod dispatcher_tests;
pub mod ledger_tests;
pub mod ollama_client_tests;
pub mod runtime_tests;
