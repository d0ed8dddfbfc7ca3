//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod face_repo;
pub mod rating_repo;
pub mod user_repo;

pub use face_repo::FaceRepo;
pub use rating_repo::RatingRepo;
pub use user_repo::UserRepo;
