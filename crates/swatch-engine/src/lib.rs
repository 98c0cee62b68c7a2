pub mod cli;
pub mod command;
pub mod config;
pub mod executor;
pub mod formatter;
pub mod fragment;
pub mod session;

pub use swatch_common::protocol;
pub use swatch_core::resolver;
