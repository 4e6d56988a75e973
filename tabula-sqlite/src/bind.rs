use crate::error_message;
use anyhow::{Error, Result};
use libsqlite3_sys::*;
use std::{
    ffi::{CStr, c_int},
    os::raw::{c_char, c_void},
};
use tabula_core::{Value, truncate_long};
use time::PrimitiveDateTime;

/// Bind `values` to the placeholders of `statement`, in order.
pub(crate) fn bind_all(statement: *mut sqlite3_stmt, values: &[Value]) -> Result<()> {
    let expected = unsafe { sqlite3_bind_parameter_count(statement) } as usize;
    if expected != values.len() {
        return Err(Error::msg(format!(
            "The query expects {} parameters but {} were provided",
            expected,
            values.len()
        )));
    }
    for (i, value) in values.iter().enumerate() {
        bind_index(statement, value, i as c_int + 1)?;
    }
    Ok(())
}

fn bind_text(statement: *mut sqlite3_stmt, index: c_int, value: &str) -> c_int {
    unsafe {
        sqlite3_bind_text(
            statement,
            index,
            value.as_ptr() as *const c_char,
            value.len() as c_int,
            SQLITE_TRANSIENT(),
        )
    }
}

fn format_timestamp(value: &PrimitiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
        value.year(),
        value.month() as u8,
        value.day(),
        value.hour(),
        value.minute(),
        value.second(),
        value.microsecond()
    )
}

fn bind_index(statement: *mut sqlite3_stmt, value: &Value, index: c_int) -> Result<()> {
    unsafe {
        let rc = match value {
            Value::Null => sqlite3_bind_null(statement, index),
            Value::Boolean(v) => sqlite3_bind_int(statement, index, *v as c_int),
            Value::Int64(v) => sqlite3_bind_int64(statement, index, *v),
            Value::UInt64(v) => {
                let Ok(v) = sqlite3_int64::try_from(*v) else {
                    return Err(Error::msg(format!(
                        "Cannot bind u64 value `{}` into sqlite integer because it's out of bounds",
                        v
                    )));
                };
                sqlite3_bind_int64(statement, index, v)
            }
            Value::Float64(v) => sqlite3_bind_double(statement, index, *v),
            Value::Varchar(v) => bind_text(statement, index, v),
            Value::Blob(v) => sqlite3_bind_blob(
                statement,
                index,
                v.as_ptr() as *const c_void,
                v.len() as c_int,
                SQLITE_TRANSIENT(),
            ),
            Value::Timestamp(v) => bind_text(statement, index, &format_timestamp(v)),
            Value::Interval(..) => {
                return Err(Error::msg(format!(
                    "Cannot use a {} as a query parameter",
                    value.type_name()
                )));
            }
        };
        if rc != SQLITE_OK {
            let query = sqlite3_sql(statement);
            return Err(Error::msg(error_message(sqlite3_db_handle(statement))).context(
                format!(
                    "Cannot bind parameter {} to query:\n{}",
                    index,
                    truncate_long!(CStr::from_ptr(query).to_string_lossy())
                ),
            ));
        }
        Ok(())
    }
}
