pub mod error;
pub mod partial_update;
pub mod user_repo;
