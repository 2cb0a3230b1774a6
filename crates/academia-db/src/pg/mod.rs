//! PostgreSQL credential sources

mod staff;
mod students;

pub use staff::PgStaffCredentials;
pub use students::PgStudentCredentials;
