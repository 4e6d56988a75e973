use crate::{ColumnSpec, GenericSqlWriter, Result, SqlWriter, Value};

/// Render a column spec into text.
///
/// With `quote` set, strings become single quoted literals (the `?` placeholder excluded).
/// Fails with [`Error::UnsupportedValue`](crate::Error::UnsupportedValue) on values that are
/// neither integers, booleans nor strings.
pub fn format(writer: &dyn SqlWriter, spec: &ColumnSpec, quote: bool) -> Result<String> {
    let mut out = String::new();
    writer.write_column_spec(&mut out, spec, quote)?;
    Ok(out)
}

/// Render a single scalar.
pub fn format_value(writer: &dyn SqlWriter, value: &Value, quote: bool) -> Result<String> {
    let mut out = String::new();
    writer.write_value(&mut out, value, quote)?;
    Ok(out)
}

/// [`format`] with the portable writer.
pub fn format_generic(spec: &ColumnSpec, quote: bool) -> Result<String> {
    format(&GenericSqlWriter, spec, quote)
}
