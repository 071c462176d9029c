//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`geolocation`] - IP geolocation providers (HTTP and no-op)
//! - [`persistence`] - In-memory and PostgreSQL repository implementations

pub mod geolocation;
pub mod persistence;
