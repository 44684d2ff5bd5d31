//! Shared configuration, route constants and error types for the Rolodex
//! CardDAV server.

pub mod config;
pub mod constants;
pub mod error;
