//! Domain types and pure validation rules for facerate.
//!
//! Nothing in this crate performs I/O. The database crate and the HTTP layer
//! both depend on it for ids, errors, and the rules that decide whether a
//! request is acceptable before it reaches Postgres or the object store.

pub mod error;
pub mod exclusion;
pub mod gate;
pub mod rating;
pub mod redirect;
pub mod types;
pub mod upload;
