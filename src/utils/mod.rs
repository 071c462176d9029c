//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Destination URL validation
//! - [`user_agent`] - Device, browser, and OS classification
//! - [`client_ip`] - Visitor address resolution from headers and socket

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
pub mod user_agent;
