//! Domain logic for the movie catalog.
//!
//! This crate performs no I/O. It holds the shared id/timestamp types, the
//! error taxonomy, and the pure algorithms (cast reconciliation, paging,
//! poster filename rules) used by the persistence and HTTP layers.

pub mod cast;
pub mod error;
pub mod paging;
pub mod poster;
pub mod search;
pub mod types;
