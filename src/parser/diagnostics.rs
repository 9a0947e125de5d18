use std::fmt;

/// Coarse classification of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// No section opened the column list.
    MissingColumnSection,
    /// A column fragment lacked a name or a type.
    MalformedColumnFragment,
    /// A split precision/scale list never closed.
    UnresolvedDecimalContinuation,
    /// The type keyword has no entry in the type map.
    UnknownType,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::MissingColumnSection => write!(f, "MissingColumnSection"),
            DiagnosticKind::MalformedColumnFragment => write!(f, "MalformedColumnFragment"),
            DiagnosticKind::UnresolvedDecimalContinuation => {
                write!(f, "UnresolvedDecimalContinuation")
            }
            DiagnosticKind::UnknownType => write!(f, "UnknownType"),
        }
    }
}

/// A problem found while extracting columns.
///
/// The `Display` output is meant to be shown to the operator as-is: it names
/// the offending text and what was expected of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// The statement has no section with an unmatched `(`.
    #[error(
        "Unable to find the column list in '{statement}': expected an unmatched '(' opening the column definitions"
    )]
    MissingColumnSection {
        /// The normalized statement.
        statement: String,
    },

    /// Fewer than two whitespace-delimited tokens in a column fragment.
    #[error(
        "Unable to parse column #{position} '{fragment}': expected at least <COLUMN_NAME> <DATA_TYPE>"
    )]
    MalformedColumnFragment {
        /// 1-based column position.
        position: usize,
        /// The fragment text.
        fragment: String,
    },

    /// A precision/scale argument list was split by a comma and no later
    /// fragment closed it, or the merged list did not hold two arguments.
    #[error(
        "Unable to parse column #{position} '{fragment}': expected a closed (<size>,<precision>) list"
    )]
    UnresolvedDecimalContinuation {
        /// 1-based column position.
        position: usize,
        /// The fragment text, merged with whatever continuation was found.
        fragment: String,
    },

    /// The bare type keyword has no entry in the type map.
    #[error("Column #{position} '{column}': data type '{type_name}' is not a valid data type")]
    UnknownType {
        /// 1-based column position.
        position: usize,
        /// Column name.
        column: String,
        /// The bare type keyword.
        type_name: String,
    },
}

impl Diagnostic {
    /// The kind of this diagnostic.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::MissingColumnSection { .. } => DiagnosticKind::MissingColumnSection,
            Diagnostic::MalformedColumnFragment { .. } => DiagnosticKind::MalformedColumnFragment,
            Diagnostic::UnresolvedDecimalContinuation { .. } => {
                DiagnosticKind::UnresolvedDecimalContinuation
            }
            Diagnostic::UnknownType { .. } => DiagnosticKind::UnknownType,
        }
    }

    /// The source text the diagnostic is about.
    pub fn offending_text(&self) -> &str {
        match self {
            Diagnostic::MissingColumnSection { statement } => statement,
            Diagnostic::MalformedColumnFragment { fragment, .. }
            | Diagnostic::UnresolvedDecimalContinuation { fragment, .. } => fragment,
            Diagnostic::UnknownType { type_name, .. } => type_name,
        }
    }

    /// 1-based column position, when the diagnostic concerns a single column.
    pub fn position(&self) -> Option<usize> {
        match self {
            Diagnostic::MissingColumnSection { .. } => None,
            Diagnostic::MalformedColumnFragment { position, .. }
            | Diagnostic::UnresolvedDecimalContinuation { position, .. }
            | Diagnostic::UnknownType { position, .. } => Some(*position),
        }
    }

    /// True when nothing at all could be extracted.
    pub fn is_fatal(&self) -> bool {
        self.kind() == DiagnosticKind::MissingColumnSection
    }
}
