/// Flatten a DDL statement onto a single line.
///
/// Every line-break character is removed and the remaining text is
/// concatenated as-is: no separator is inserted and whitespace runs are kept,
/// so a break in the middle of a type declaration (`DECIMAL(9,\n2)`) still
/// splits on the same commas as the single-line form.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|ch| !is_line_break(*ch)).collect()
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_unix_and_windows_line_breaks() {
        assert_eq!(
            normalize("CREATE TABLE T (\r\n  A INTEGER,\n  B DATE\n)"),
            "CREATE TABLE T (  A INTEGER,  B DATE)"
        );
    }

    #[test]
    fn keeps_single_line_input_untouched() {
        let ddl = "  CREATE TABLE T (A   CHAR(1)) ;  ";
        assert_eq!(normalize(ddl), ddl);
    }

    #[test]
    fn is_idempotent() {
        for input in ["", "\n", "a\r\nb", "X DECIMAL(9,\n2)\n\n", "no breaks"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\r\n\n"), "");
    }
}
