//! Memo domain model.
//!
//! # Responsibility
//! - Define the single record type persisted and projected by core.
//! - Own timestamp parsing/formatting rules for the persisted `date` field.
//!
//! # Invariants
//! - Every memo is identified by a stable `MemoId`, never by content.
//! - `date` is fixed at creation and never rewritten by edits.

pub mod memo;
