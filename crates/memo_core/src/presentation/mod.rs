//! Presentation boundary: user intents in, render-ready views out.
//!
//! # Responsibility
//! - Hold UI session state (sort selection, compose/edit editor) next to the
//!   memo store it drives.
//! - Translate intents into memo store operations.
//!
//! # Invariants
//! - The board is the only owner of its `MemoStore`; no other path mutates it.
//! - Rendering never mutates state.

pub mod board;
pub mod view_model;
