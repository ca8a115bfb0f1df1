//! Greets a user by name, preferring a remote greeting service and falling
//! back to a local template table, and speaks the greeting aloud.

pub mod cli;
pub mod config;
pub mod http;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;
