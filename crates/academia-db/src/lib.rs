//! Academia DB - Credential store adapter
//!
//! Defines the [`CredentialSource`] capability interface consumed by the
//! auth core, the Postgres implementations for the two credential-bearing
//! tables (staff and students), and the chain that composes them.

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod source;

pub use error::*;
pub use models::*;
pub use pool::*;
pub use source::*;
