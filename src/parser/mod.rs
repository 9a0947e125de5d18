/// Column-list extraction: section splitting, continuation repair, and column tokenizing.
pub mod column_extractor;
/// Structured problems reported per column while extracting.
pub mod diagnostics;
/// Identifier unquoting and whole-word keyword matching.
pub mod names;
/// Line-break removal ahead of comma splitting.
pub mod normalizer;

use crate::mapping::type_map::TypeMap;
use column_extractor::{ErrorPolicy, Extraction};

/// Convenience: normalize a raw `CREATE TABLE` statement and extract its columns.
pub fn parse_ddl(raw: &str, type_map: &TypeMap, policy: ErrorPolicy) -> Extraction {
    column_extractor::extract_columns(&normalizer::normalize(raw), type_map, policy)
}
