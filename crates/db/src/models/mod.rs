//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where the service inserts rows, a create DTO.

pub mod face;
pub mod rating;
pub mod user;
