//! Configuration and dependency wiring for the catalog sync binary.

mod dependencies;

pub use dependencies::Dependencies;
