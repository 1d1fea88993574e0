//! Shared helper functionality, mostly error types
pub mod errors;
