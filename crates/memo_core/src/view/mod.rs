//! Read-only projections over the memo collection.

pub mod projector;
