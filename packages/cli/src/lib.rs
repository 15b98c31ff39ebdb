//! Operator console for the AdEase signage server.

pub mod api;
pub mod commands;
pub mod console;
pub mod render;
pub mod session;
pub mod shell;
