use std::fmt;

use crate::mapping::type_map::TypeMap;
use crate::parser::diagnostics::Diagnostic;
use crate::parser::names::{contains_phrase, keyword_tokens, unquote_identifier};

/// Type keywords whose argument list is `(size, precision)`.
///
/// A comma inside their argument list is what the naive section split
/// breaks, so these are the only types the continuation repair applies to.
pub const PRECISION_SCALE_TYPES: &[&str] = &["DECIMAL", "NUMERIC"];

/// What to do once a column produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    /// Stop at the first diagnostic, keeping the columns extracted before it.
    #[default]
    FailFast,
    /// Extract every column, collecting one diagnostic per failed column.
    BestEffort,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::FailFast => write!(f, "fail-fast"),
            ErrorPolicy::BestEffort => write!(f, "best-effort"),
        }
    }
}

impl std::str::FromStr for ErrorPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail-fast" => Ok(ErrorPolicy::FailFast),
            "best-effort" => Ok(ErrorPolicy::BestEffort),
            _ => Err(format!(
                "Invalid error policy: {s} (expected fail-fast or best-effort)"
            )),
        }
    }
}

/// One column declaration pulled out of a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRecord {
    /// Column name, without surrounding double quotes.
    pub name: String,
    /// Bare type keyword as written (`VARCHAR`, `DECIMAL`).
    pub raw_type: String,
    /// First argument of a single-size type, e.g. `100` for `VARCHAR(100)`.
    pub size: Option<String>,
    /// Second argument of a precision/scale type, e.g. `2` for `DECIMAL(9,2)`.
    pub precision: Option<String>,
    /// Tokens after the type declaration (`NOT`, `NULL`, `DEFAULT`, `0`, ...).
    pub modifiers: Vec<String>,
}

impl ColumnRecord {
    /// Build a record with no modifiers.
    pub fn new(
        name: impl Into<String>,
        raw_type: impl Into<String>,
        size: Option<&str>,
        precision: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            size: size.map(str::to_string),
            precision: precision.map(str::to_string),
            modifiers: Vec::new(),
        }
    }

    /// False when the declaration carries `NOT NULL`.
    pub fn nullable(&self) -> bool {
        !contains_phrase(&self.modifiers.join(" "), "NOT NULL")
    }

    /// The token following `DEFAULT`, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.modifiers
            .iter()
            .position(|token| token.eq_ignore_ascii_case("DEFAULT"))
            .and_then(|idx| self.modifiers.get(idx + 1))
            .map(String::as_str)
    }
}

/// Result of extracting columns from one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Well-formed records, in source order.
    pub columns: Vec<ColumnRecord>,
    /// One entry per column that could not be extracted, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// True when [`ErrorPolicy::FailFast`] stopped extraction early.
    pub aborted: bool,
}

impl Extraction {
    /// True when every column was extracted without a diagnostic.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// True when the column list itself could not be located.
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }
}

/// Extracts [`ColumnRecord`]s from a normalized `CREATE TABLE` statement.
#[derive(Debug, Clone, Copy)]
pub struct ColumnExtractor<'a> {
    type_map: &'a TypeMap,
    policy: ErrorPolicy,
}

impl<'a> ColumnExtractor<'a> {
    /// Create an extractor resolving types against `type_map`, failing fast.
    pub fn new(type_map: &'a TypeMap) -> Self {
        Self {
            type_map,
            policy: ErrorPolicy::default(),
        }
    }

    /// Set the continuation policy.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Extract every column declaration from `normalized`.
    ///
    /// `normalized` must already be on a single line (see
    /// [`normalize`](crate::parser::normalizer::normalize)).
    pub fn extract(&self, normalized: &str) -> Extraction {
        let mut extraction = Extraction::default();

        let sections = split_sections(normalized);
        let Some(fragments) = column_fragments(&sections) else {
            extraction.diagnostics.push(Diagnostic::MissingColumnSection {
                statement: normalized.trim().to_string(),
            });
            extraction.aborted = self.policy == ErrorPolicy::FailFast;
            return extraction;
        };
        tracing::debug!(fragments = fragments.len(), "located column list");

        for unit in merge_continuations(&fragments) {
            let result = match unit {
                ColumnText::Complete {
                    position,
                    text,
                    repaired,
                } => parse_column(position, &text, repaired, self.type_map),
                ColumnText::Unterminated { position, text } => {
                    Err(Diagnostic::UnresolvedDecimalContinuation {
                        position,
                        fragment: text,
                    })
                }
            };

            match result {
                Ok(column) => extraction.columns.push(column),
                Err(diagnostic) => {
                    extraction.diagnostics.push(diagnostic);
                    if self.policy == ErrorPolicy::FailFast {
                        extraction.aborted = true;
                        break;
                    }
                }
            }
        }

        extraction
    }
}

/// Extract columns from a normalized statement; see [`ColumnExtractor::extract`].
pub fn extract_columns(normalized: &str, type_map: &TypeMap, policy: ErrorPolicy) -> Extraction {
    ColumnExtractor::new(type_map)
        .with_policy(policy)
        .extract(normalized)
}

/// Naive comma split; argument lists like `(9,2)` end up in two sections.
fn split_sections(normalized: &str) -> Vec<&str> {
    normalized.split(',').map(str::trim).collect()
}

/// `(` count minus `)` count.
fn paren_balance(text: &str) -> isize {
    text.chars().fold(0, |balance, ch| match ch {
        '(' => balance + 1,
        ')' => balance - 1,
        _ => balance,
    })
}

fn ends_column_list(section: &str) -> bool {
    (contains_phrase(section, "CONSTRAINT") && contains_phrase(section, "PRIMARY KEY"))
        || contains_phrase(section, "UNIQUE INDEX")
}

/// Index of the section that opens the column list.
///
/// That is the first section with more `(` than `)`. A statement whose only
/// parenthesized section is balanced (`CREATE TABLE T (A VARCHAR(5))`) opens
/// its column list at the first `(` instead.
fn column_list_start(sections: &[&str]) -> Option<usize> {
    sections
        .iter()
        .position(|section| paren_balance(section) > 0)
        .or_else(|| sections.iter().position(|section| section.contains('(')))
}

/// Byte offset of the `)` that brings `depth` back to zero, updating `depth`.
fn closing_paren(text: &str, depth: &mut usize) -> Option<usize> {
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => *depth += 1,
            ')' => {
                *depth = depth.saturating_sub(1);
                if *depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Collect the trimmed sections between the column list's opening `(` and
/// its end: a primary-key constraint, a unique index, or the `)` closing the
/// statement's column list.
fn column_fragments(sections: &[&str]) -> Option<Vec<String>> {
    let start = column_list_start(sections)?;
    let mut fragments = Vec::new();
    let mut depth = 1usize;

    for (offset, section) in sections[start..].iter().enumerate() {
        if ends_column_list(section) {
            break;
        }
        let text = if offset == 0 {
            section.split_once('(').map_or("", |(_, rest)| rest)
        } else {
            *section
        };
        if let Some(close) = closing_paren(text, &mut depth) {
            fragments.push(text[..close].trim().to_string());
            break;
        }
        fragments.push(text.trim().to_string());
    }

    Some(fragments)
}

/// A column's text after continuation repair.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnText {
    /// Ready to tokenize. `repaired` marks text merged from several fragments.
    Complete {
        position: usize,
        text: String,
        repaired: bool,
    },
    /// A precision/scale list that was still open when the fragments ran out.
    Unterminated { position: usize, text: String },
}

enum ContinuationState {
    AwaitingFragment,
    Accumulating {
        position: usize,
        text: String,
        balance: isize,
    },
}

fn opens_precision_scale_list(fragment: &str) -> bool {
    let declares_precision_scale_type = fragment
        .split_whitespace()
        .nth(1)
        .and_then(|type_token| keyword_tokens(type_token).into_iter().next())
        .is_some_and(|keyword| is_precision_scale_type(&keyword));
    declares_precision_scale_type && paren_balance(fragment) > 0
}

fn is_precision_scale_type(keyword: &str) -> bool {
    PRECISION_SCALE_TYPES
        .iter()
        .any(|ty| ty.eq_ignore_ascii_case(keyword))
}

/// Rejoin precision/scale lists the section split tore apart.
///
/// A fragment declaring a precision/scale type with an unclosed `(` starts a
/// continuation; following fragments are joined back with `,` until the
/// parentheses balance again.
fn merge_continuations(fragments: &[String]) -> Vec<ColumnText> {
    let mut units = Vec::with_capacity(fragments.len());
    let mut state = ContinuationState::AwaitingFragment;

    for fragment in fragments {
        state = match state {
            ContinuationState::AwaitingFragment => {
                let position = units.len() + 1;
                if opens_precision_scale_list(fragment) {
                    ContinuationState::Accumulating {
                        position,
                        text: fragment.clone(),
                        balance: paren_balance(fragment),
                    }
                } else {
                    units.push(ColumnText::Complete {
                        position,
                        text: fragment.clone(),
                        repaired: false,
                    });
                    ContinuationState::AwaitingFragment
                }
            }
            ContinuationState::Accumulating {
                position,
                mut text,
                balance,
            } => {
                text.push(',');
                text.push_str(fragment);
                let balance = balance + paren_balance(fragment);
                if balance <= 0 {
                    tracing::debug!(
                        column = position,
                        text = %text,
                        "rejoined split argument list"
                    );
                    units.push(ColumnText::Complete {
                        position,
                        text,
                        repaired: true,
                    });
                    ContinuationState::AwaitingFragment
                } else {
                    ContinuationState::Accumulating {
                        position,
                        text,
                        balance,
                    }
                }
            }
        };
    }

    if let ContinuationState::Accumulating { position, text, .. } = state {
        units.push(ColumnText::Unterminated { position, text });
    }

    units
}

/// Tokenize one column declaration into a [`ColumnRecord`].
fn parse_column(
    position: usize,
    text: &str,
    repaired: bool,
    type_map: &TypeMap,
) -> Result<ColumnRecord, Diagnostic> {
    let malformed = || Diagnostic::MalformedColumnFragment {
        position,
        fragment: text.to_string(),
    };

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (name, type_token) = match tokens.as_slice() {
        [name, type_token, ..] => (*name, *type_token),
        _ => return Err(malformed()),
    };

    // `DECIMAL (9,2)` and `DECIMAL( 9,2 )`: pull the argument list back onto the type.
    let mut type_decl = type_token.to_string();
    let mut rest = 2;
    let detached =
        !type_decl.contains('(') && tokens.get(rest).is_some_and(|t| t.starts_with('('));
    if detached || paren_balance(&type_decl) > 0 {
        while let Some(token) = tokens.get(rest) {
            type_decl.push_str(token);
            rest += 1;
            if paren_balance(&type_decl) <= 0 {
                break;
            }
        }
    }

    let stripped = type_decl.replace(')', "");
    let (raw_type, arguments) = match stripped.split_once('(') {
        Some((raw_type, arguments)) => (raw_type.trim(), Some(arguments)),
        None => (stripped.trim(), None),
    };
    if raw_type.is_empty() {
        return Err(malformed());
    }

    let name = unquote_identifier(name);
    if let Err(unknown) = type_map.lookup(raw_type) {
        return Err(Diagnostic::UnknownType {
            position,
            column: name.to_string(),
            type_name: unknown.type_name,
        });
    }

    let arguments: Vec<&str> = arguments
        .map(|list| list.split(',').map(str::trim).collect())
        .unwrap_or_default();

    let (size, precision) = if is_precision_scale_type(raw_type) {
        // A list that absorbed later column declarations fails here.
        match arguments.as_slice() {
            [size, precision] if is_digits(size) && is_digits(precision) => {
                (None, Some(*precision))
            }
            _ if repaired => {
                return Err(Diagnostic::UnresolvedDecimalContinuation {
                    position,
                    fragment: text.to_string(),
                });
            }
            [] => (None, None),
            [size] if is_digits(size) => (None, None),
            _ => return Err(malformed()),
        }
    } else {
        (arguments.first().copied().filter(|size| !size.is_empty()), None)
    };

    Ok(ColumnRecord {
        name: name.to_string(),
        raw_type: raw_type.to_string(),
        size: size.map(str::to_string),
        precision: precision.map(str::to_string),
        modifiers: tokens[rest..].iter().map(|t| t.to_string()).collect(),
    })
}

fn is_digits(argument: &str) -> bool {
    !argument.is_empty() && argument.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::diagnostics::DiagnosticKind;

    fn type_map() -> TypeMap {
        TypeMap::teradata()
    }

    #[test]
    fn sections_split_naively_on_commas() {
        assert_eq!(
            split_sections("T (A DECIMAL(9, 2), B DATE)"),
            vec!["T (A DECIMAL(9", "2)", "B DATE)"]
        );
    }

    #[test]
    fn column_list_starts_at_first_unbalanced_section() {
        let sections = split_sections(
            "CREATE MULTISET TABLE DB.T ,FALLBACK ,MAP = TD_MAP1 (ID INTEGER NOT NULL, NAME CHAR(3))",
        );
        assert_eq!(column_list_start(&sections), Some(2));
        assert_eq!(
            column_fragments(&sections),
            Some(vec!["ID INTEGER NOT NULL".to_string(), "NAME CHAR(3)".to_string()])
        );
    }

    #[test]
    fn balanced_single_column_statement_still_opens_a_column_list() {
        let sections = split_sections("CREATE TABLE T (A VARCHAR(5))");
        assert_eq!(
            column_fragments(&sections),
            Some(vec!["A VARCHAR(5)".to_string()])
        );
    }

    #[test]
    fn no_parenthesis_means_no_column_list() {
        assert_eq!(column_fragments(&split_sections("CREATE TABLE T")), None);
    }

    #[test]
    fn closing_parenthesis_drops_trailing_table_options() {
        let sections =
            split_sections("CREATE TABLE T (A INTEGER, B DATE) PRIMARY INDEX (A);");
        assert_eq!(
            column_fragments(&sections),
            Some(vec!["A INTEGER".to_string(), "B DATE".to_string()])
        );
    }

    #[test]
    fn split_argument_list_is_rejoined() {
        let fragments: Vec<String> = ["A DECIMAL(9", "2)", "B DATE"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            merge_continuations(&fragments),
            vec![
                ColumnText::Complete {
                    position: 1,
                    text: "A DECIMAL(9,2)".to_string(),
                    repaired: true,
                },
                ColumnText::Complete {
                    position: 2,
                    text: "B DATE".to_string(),
                    repaired: false,
                },
            ]
        );
    }

    #[test]
    fn numeric_argument_list_is_rejoined() {
        let fragments = vec!["TOTAL NUMERIC(12".to_string(), "3) NOT NULL".to_string()];
        assert_eq!(
            merge_continuations(&fragments),
            vec![ColumnText::Complete {
                position: 1,
                text: "TOTAL NUMERIC(12,3) NOT NULL".to_string(),
                repaired: true,
            }]
        );

        let column = parse_column(1, "TOTAL NUMERIC(12,3) NOT NULL", true, &type_map())
            .expect("column should parse");
        assert_eq!(column.raw_type, "NUMERIC");
        assert_eq!(column.precision.as_deref(), Some("3"));
    }

    #[test]
    fn continuation_accumulates_until_parentheses_balance() {
        let fragments: Vec<String> = ["A DECIMAL(9", "B INTEGER", "C DATE)", "D CHAR(1)"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            merge_continuations(&fragments),
            vec![
                ColumnText::Complete {
                    position: 1,
                    text: "A DECIMAL(9,B INTEGER,C DATE)".to_string(),
                    repaired: true,
                },
                ColumnText::Complete {
                    position: 2,
                    text: "D CHAR(1)".to_string(),
                    repaired: false,
                },
            ]
        );
    }

    #[test]
    fn absorbed_column_declarations_are_not_a_precision() {
        let text = "A DECIMAL(9,B INTEGER,C DATE)";
        let err = parse_column(1, text, true, &type_map())
            .expect_err("non-numeric arguments should fail");
        assert_eq!(
            err,
            Diagnostic::UnresolvedDecimalContinuation {
                position: 1,
                fragment: text.to_string(),
            }
        );
    }

    #[test]
    fn repaired_list_needs_exactly_two_arguments() {
        assert!(parse_column(1, "A DECIMAL(9,2,1)", true, &type_map()).is_err());
        assert!(parse_column(1, "A DECIMAL(9,X)", true, &type_map()).is_err());
    }

    #[test]
    fn spaced_argument_list_is_rejoined_onto_the_type() {
        let column = parse_column(1, "A DECIMAL( 9,2 ) NOT NULL", true, &type_map())
            .expect("column should parse");
        assert_eq!(column.precision.as_deref(), Some("2"));
        assert_eq!(column.modifiers, vec!["NOT", "NULL"]);
    }

    #[test]
    fn non_numeric_single_decimal_argument_is_malformed() {
        let err = parse_column(3, "QTY DECIMAL(X)", false, &type_map())
            .expect_err("non-numeric size should fail");
        assert_eq!(err.kind(), DiagnosticKind::MalformedColumnFragment);
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn continuation_still_open_at_end_is_unterminated() {
        let fragments = vec!["A DECIMAL(9".to_string()];
        assert_eq!(
            merge_continuations(&fragments),
            vec![ColumnText::Unterminated {
                position: 1,
                text: "A DECIMAL(9".to_string(),
            }]
        );
    }

    #[test]
    fn detached_argument_list_is_reattached() {
        let column = parse_column(1, "AMOUNT DECIMAL (9,2) NOT NULL", true, &type_map())
            .expect("column should parse");
        assert_eq!(column.raw_type, "DECIMAL");
        assert_eq!(column.precision.as_deref(), Some("2"));
        assert_eq!(column.modifiers, vec!["NOT", "NULL"]);
        assert!(!column.nullable());
    }

    #[test]
    fn quoted_column_names_are_unquoted() {
        let column =
            parse_column(1, "\"ORDER\" INTEGER", false, &type_map()).expect("column should parse");
        assert_eq!(column.name, "ORDER");
    }

    #[test]
    fn decimal_without_scale_has_no_precision() {
        let column =
            parse_column(1, "QTY DECIMAL(9)", false, &type_map()).expect("column should parse");
        assert_eq!(column.size, None);
        assert_eq!(column.precision, None);
    }

    #[test]
    fn repaired_decimal_with_empty_scale_is_unresolved() {
        let err = parse_column(4, "QTY DECIMAL(9,)", true, &type_map())
            .expect_err("empty scale should fail");
        assert_eq!(
            err,
            Diagnostic::UnresolvedDecimalContinuation {
                position: 4,
                fragment: "QTY DECIMAL(9,)".to_string(),
            }
        );
    }

    #[test]
    fn default_value_is_the_token_after_default() {
        let column = parse_column(1, "FLAG CHAR(1) DEFAULT 'N' NOT NULL", false, &type_map())
            .expect("column should parse");
        assert_eq!(column.default_value(), Some("'N'"));
        assert_eq!(column.size.as_deref(), Some("1"));
    }

    #[test]
    fn error_policy_parses_from_cli_spellings() {
        assert_eq!("fail-fast".parse::<ErrorPolicy>(), Ok(ErrorPolicy::FailFast));
        assert_eq!("Best-Effort".parse::<ErrorPolicy>(), Ok(ErrorPolicy::BestEffort));
        assert!("sometimes".parse::<ErrorPolicy>().is_err());
        assert!("continue".parse::<ErrorPolicy>().is_err());
        assert!("best_effort".parse::<ErrorPolicy>().is_err());
    }
}
