/// Reads DDL input and writes the schema document and report to disk.
pub mod formatter;
/// Builds a Markdown conversion report from an extraction.
pub mod report;
