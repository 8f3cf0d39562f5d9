//! Dialect-specific statement analysis.

pub mod mysql;
