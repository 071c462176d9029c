//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire. Request bodies are checked with
//! validator before they reach a service.

pub mod health;
pub mod links;
pub mod track;
