use tabula_core::SqlWriter;

/// MySQL treats a backslash inside a string literal as an escape character, so it is doubled
/// along with the quotes.
#[derive(Default, Debug, Clone, Copy)]
pub struct MySQLSqlWriter {}

impl MySQLSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for MySQLSqlWriter {
    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, &[('\'', "''"), ('\\', "\\\\")]);
        out.push('\'');
    }
}
