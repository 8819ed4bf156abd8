//! Bot features
//!
//! Each service owns nothing global: limiters, the task runner, locks and
//! clients are handed in through [`Services`].

pub mod chat;
mod services;
pub mod sign_in;
pub mod welcome;


pub use chat::{ChatService, GenerationKind};
pub use services::{Services, Switches};
pub use sign_in::SignInService;
pub use welcome::WelcomeService;
