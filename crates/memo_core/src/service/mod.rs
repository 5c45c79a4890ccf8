//! Memo use-case services.
//!
//! # Responsibility
//! - Own the in-memory memo collection and its mutation rules.
//! - Keep callers decoupled from the snapshot storage format.

pub mod clock;
pub mod memo_store;
