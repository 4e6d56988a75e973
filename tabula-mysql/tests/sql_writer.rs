#[cfg(test)]
mod tests {
    use tabula_core::{ColumnSpec, GenericSqlWriter, format, format_value, values};
    use tabula_mysql::MySQLSqlWriter;

    const WRITER: MySQLSqlWriter = MySQLSqlWriter::new();

    #[test]
    fn backslashes_are_escaped() {
        assert_eq!(
            format_value(&WRITER, &r"C:\temp".into(), true).unwrap(),
            r"'C:\\temp'"
        );
        assert_eq!(
            format_value(&WRITER, &r"\'; DROP TABLE t; --".into(), true).unwrap(),
            r"'\\''; DROP TABLE t; --'"
        );
        assert_eq!(
            format_value(&GenericSqlWriter, &r"C:\temp".into(), true).unwrap(),
            r"'C:\temp'"
        );
    }

    #[test]
    fn several_escapes_in_one_pass() {
        let mut out = String::new();
        tabula_core::SqlWriter::write_escaped(
            &GenericSqlWriter,
            &mut out,
            r"a'b\c'",
            &[('\'', "''"), ('\\', "\\\\")],
        );
        assert_eq!(out, r"a''b\\c''");
    }

    #[test]
    fn unquoted_text_is_untouched() {
        assert_eq!(
            format_value(&WRITER, &r"a\b".into(), false).unwrap(),
            r"a\b"
        );
        assert_eq!(format_value(&WRITER, &"?".into(), true).unwrap(), "?");
    }

    #[test]
    fn rows() {
        let mut out = String::new();
        tabula_core::SqlWriter::write_row_tuples(
            &WRITER,
            &mut out,
            &[values![1, "it's"], values![2, r"x\y", true]],
        )
        .unwrap();
        assert_eq!(out, r"(1, 'it''s'), (2, 'x\\y', TRUE)");
        assert_eq!(
            format(&WRITER, &ColumnSpec::assignments([("name", "O'Neil")]), true).unwrap(),
            "name = 'O''Neil'"
        );
    }
}
