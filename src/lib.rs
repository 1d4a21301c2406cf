//! Lead Form — multi-step lead capture with draft persistence, bot
//! guards and provider submission.

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod store;
pub mod submit;
