//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx
//! prepared statements.
//!
//! # Repositories
//!
//! - [`PgTourRepository`] - Tour storage and aggregate queries
//! - [`PgUserRepository`] - Account storage and lookups

pub mod pg_tour_repository;
pub mod pg_user_repository;

pub use pg_tour_repository::PgTourRepository;
pub use pg_user_repository::PgUserRepository;
