//! Convert Teradata `CREATE TABLE` statements into Talend schema metadata XML.
#![warn(missing_docs)]

/// Error type for I/O, type-map loading, and rendering failures.
pub mod error;
/// XML schema rendering from extracted columns.
pub mod generator;
/// Source type keyword → target type tag mapping.
pub mod mapping;
/// File output and markdown report generation.
pub mod output;
/// DDL normalization and column extraction.
pub mod parser;
