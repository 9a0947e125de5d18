use std::path::PathBuf;

/// Failures outside the parser itself: reading input, loading a type map,
/// rendering and writing the schema document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted (`read`, `write`, `create directory for`).
        action: &'static str,
        /// The file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A type-map document was not a JSON object of keyword → tag strings.
    #[error("Invalid type map JSON: {0}")]
    TypeMapJson(#[from] serde_json::Error),

    /// A type-map entry had an empty keyword or tag.
    #[error("Invalid type map entry '{keyword}': keyword and target type must be non-empty")]
    TypeMapEntry {
        /// The offending keyword as written in the document.
        keyword: String,
    },

    /// The XML writer rejected an event.
    #[error("Failed to render schema XML: {0}")]
    Xml(String),

    /// A column reached the renderer with a type the map does not know.
    #[error("Data type '{raw_type}' of column '{column}' has no target type mapping")]
    UnmappedType {
        /// Column name.
        column: String,
        /// Type keyword as written in the DDL.
        raw_type: String,
    },
}

impl Error {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
