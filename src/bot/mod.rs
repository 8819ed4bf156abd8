//! Bot runtime and event dispatch
//!
//! [`BotRuntime`] owns the service lifecycle; [`Dispatcher`] routes inbound
//! platform events to the feature services.

mod command;
mod dispatcher;
mod event;
mod runtime;


pub use command::Command;
pub use dispatcher::Dispatcher;
pub use event::InboundEvent;
pub use runtime::BotRuntime;
