use crate::{ColumnSpec, Error, Result, Value, try_separated_by};

/// The placeholder token, never quoted by the writer.
pub const PLACEHOLDER: &str = "?";

/// Dialect-aware rendering of literals and column specs.
///
/// The default methods produce portable SQL. Drivers override what their dialect needs
/// (for example MySQL treats backslashes inside string literals as escapes).
pub trait SqlWriter: Send + Sync {
    /// Copy `value` replacing every character found in `escapes` with its replacement.
    fn write_escaped(&self, out: &mut String, value: &str, escapes: &[(char, &str)]) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if let Some((_, replace)) = escapes.iter().find(|(search, _)| *search == c) {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Render a single quoted string literal, doubling inner quotes.
    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, &[('\'', "''")]);
        out.push('\'');
    }

    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push_str(["FALSE", "TRUE"][value as usize]);
    }

    /// Render one scalar.
    ///
    /// Integers are written unquoted, booleans as `TRUE`/`FALSE`. Strings are written verbatim
    /// unless `quote` is set, in which case they become escaped literals, except for the
    /// placeholder `?` that always stays bare. Every other value is rejected.
    fn write_value(&self, out: &mut String, value: &Value, quote: bool) -> Result<()> {
        match value {
            Value::Int64(v) => out.push_str(itoa::Buffer::new().format(*v)),
            Value::UInt64(v) => out.push_str(itoa::Buffer::new().format(*v)),
            Value::Boolean(v) => self.write_value_bool(out, *v),
            Value::Varchar(v) if !quote || v == PLACEHOLDER => out.push_str(v),
            Value::Varchar(v) => self.write_value_string(out, v),
            _ => {
                let error =
                    Error::UnsupportedValue(format!("{} ({})", value, value.type_name()));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Render a column spec: lists as `a, b`, assignments as `a = 1, b = 2`.
    fn write_column_spec(&self, out: &mut String, spec: &ColumnSpec, quote: bool) -> Result<()> {
        match spec {
            ColumnSpec::Raw(v) => {
                out.push_str(v);
                Ok(())
            }
            ColumnSpec::List(v) => {
                try_separated_by(out, v, |out, v| self.write_value(out, v, quote), ", ")
            }
            ColumnSpec::Assignments(v) => try_separated_by(
                out,
                v,
                |out, (k, v)| {
                    out.push_str(k);
                    out.push_str(" = ");
                    self.write_value(out, v, quote)
                },
                ", ",
            ),
        }
    }

    /// Render only the values of a spec (keys of an assignment list are dropped).
    fn write_values(&self, out: &mut String, spec: &ColumnSpec, quote: bool) -> Result<()> {
        match spec {
            ColumnSpec::Raw(v) => {
                out.push_str(v);
                Ok(())
            }
            _ => try_separated_by(
                out,
                spec.values(),
                |out, v| self.write_value(out, v, quote),
                ", ",
            ),
        }
    }

    /// Render `(v1, v2), (v3, v4)` with every value quoted.
    fn write_row_tuples(&self, out: &mut String, rows: &[Vec<Value>]) -> Result<()> {
        try_separated_by(
            out,
            rows,
            |out, row| {
                out.push('(');
                try_separated_by(out, row, |out, v| self.write_value(out, v, true), ", ")?;
                out.push(')');
                Ok(())
            },
            ", ",
        )
    }
}

/// Writer producing portable SQL, used when the dialect does not matter.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for GenericSqlWriter {}
