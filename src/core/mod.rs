//! Core operations - Database access for distributors and machines, plus the SQL,
//! seed, schema, diagnostics and client-build logic behind the tools.

pub mod client_build;
pub(crate) mod common;
pub mod diagnostics;
pub mod distributor;
pub mod machine;
pub mod schema;
pub mod seed;
pub mod sql;
