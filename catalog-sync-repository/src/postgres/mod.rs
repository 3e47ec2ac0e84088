//! Postgres implementation of the record source.
//!
//! This module provides a concrete implementation of `RecordSource` backed
//! by a Postgres products table.

mod source;

pub use source::PostgresRecordSource;
