//! Academia Types - Shared domain types
//!
//! This crate contains domain types used across academia services:
//! - Subject identity
//! - Roles and role groups
//! - Authentication request/response types

pub mod auth;
pub mod role;
pub mod subject;

pub use auth::*;
pub use role::*;
pub use subject::*;
