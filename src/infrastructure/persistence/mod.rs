//! Repository implementations.
//!
//! # Stores
//!
//! - [`InMemoryStore`] - Process-local store implementing both repositories
//! - [`PgLinkRepository`] - PostgreSQL link registry
//! - [`PgClickRepository`] - PostgreSQL click log

pub mod memory_store;
pub mod pg_click_repository;
pub mod pg_link_repository;

pub use memory_store::InMemoryStore;
pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
