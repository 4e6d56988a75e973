use mysql_async::{
    Column, FromValueError,
    consts::{ColumnFlags, ColumnType},
};
use std::str::{self, FromStr};
use tabula_core::Value;
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

/// Character set id MySQL uses for binary columns.
const BINARY_CHARSET: u16 = 63;

pub(crate) struct ValueWrap(pub(crate) Value);

impl From<Value> for ValueWrap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
impl From<ValueWrap> for Value {
    fn from(value: ValueWrap) -> Self {
        value.0
    }
}

impl ValueWrap {
    /// Convert a value read from `column`.
    ///
    /// The text protocol sends everything as bytes, the column type tells how to read them.
    pub(crate) fn decode(
        value: mysql_async::Value,
        column: &Column,
    ) -> Result<Self, FromValueError> {
        let bytes = match value {
            mysql_async::Value::Bytes(bytes) => bytes,
            _ => return value.try_into(),
        };
        fn parse<T: FromStr>(bytes: Vec<u8>, f: impl Fn(T) -> Value) -> Result<Value, FromValueError> {
            match str::from_utf8(&bytes).ok().and_then(|v| v.parse::<T>().ok()) {
                Some(v) => Ok(f(v)),
                None => Err(FromValueError(mysql_async::Value::Bytes(bytes))),
            }
        }
        let unsigned = column.flags().contains(ColumnFlags::UNSIGNED_FLAG);
        Ok(ValueWrap(match column.column_type() {
            ColumnType::MYSQL_TYPE_TINY
            | ColumnType::MYSQL_TYPE_SHORT
            | ColumnType::MYSQL_TYPE_INT24
            | ColumnType::MYSQL_TYPE_LONG
            | ColumnType::MYSQL_TYPE_LONGLONG
            | ColumnType::MYSQL_TYPE_YEAR => {
                if unsigned {
                    parse(bytes, Value::UInt64)?
                } else {
                    parse(bytes, Value::Int64)?
                }
            }
            ColumnType::MYSQL_TYPE_FLOAT | ColumnType::MYSQL_TYPE_DOUBLE => {
                parse(bytes, Value::Float64)?
            }
            ColumnType::MYSQL_TYPE_TINY_BLOB
            | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
            | ColumnType::MYSQL_TYPE_LONG_BLOB
            | ColumnType::MYSQL_TYPE_BLOB
            | ColumnType::MYSQL_TYPE_VARCHAR
            | ColumnType::MYSQL_TYPE_VAR_STRING
            | ColumnType::MYSQL_TYPE_STRING
                if column.character_set() == BINARY_CHARSET =>
            {
                Value::Blob(bytes.into())
            }
            _ => match String::from_utf8(bytes) {
                Ok(v) => Value::Varchar(v),
                Err(e) => Value::Blob(e.into_bytes().into()),
            },
        }))
    }
}

impl TryFrom<mysql_async::Value> for ValueWrap {
    type Error = FromValueError;
    fn try_from(value: mysql_async::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            mysql_async::Value::NULL => Value::Null,
            mysql_async::Value::Bytes(v) => match String::from_utf8(v) {
                Ok(v) => Value::Varchar(v),
                Err(e) => Value::Blob(e.into_bytes().into()),
            },
            mysql_async::Value::Int(v) => Value::Int64(v),
            mysql_async::Value::UInt(v) => Value::UInt64(v),
            mysql_async::Value::Float(v) => Value::Float64(v.into()),
            mysql_async::Value::Double(v) => Value::Float64(v),
            mysql_async::Value::Date(year, month, day, hour, minute, second, microsecond) => {
                let date = Month::try_from(month)
                    .ok()
                    .and_then(|month| Date::from_calendar_date(year as _, month, day).ok());
                let time = Time::from_hms_micro(hour, minute, second, microsecond).ok();
                match date.zip(time) {
                    Some((date, time)) => Value::Timestamp(PrimitiveDateTime::new(date, time)),
                    None => return Err(FromValueError(value)),
                }
            }
            mysql_async::Value::Time(negative, days, hours, minutes, seconds, micro) => {
                let result = Duration::days(days as _)
                    + Duration::hours(hours as _)
                    + Duration::minutes(minutes as _)
                    + Duration::seconds(seconds as _)
                    + Duration::microseconds(micro as _);
                Value::Interval(if negative { -result } else { result })
            }
        }
        .into())
    }
}

impl TryFrom<ValueWrap> for mysql_async::Value {
    type Error = anyhow::Error;

    fn try_from(value: ValueWrap) -> Result<Self, Self::Error> {
        type MySQLValue = mysql_async::Value;
        Ok(match value.0 {
            Value::Null => MySQLValue::NULL,
            Value::Boolean(v) => MySQLValue::from(v),
            Value::Int64(v) => MySQLValue::from(v),
            Value::UInt64(v) => MySQLValue::from(v),
            Value::Float64(v) => MySQLValue::from(v),
            Value::Varchar(v) => MySQLValue::from(v),
            Value::Blob(v) => MySQLValue::Bytes(v.into_vec()),
            Value::Timestamp(v) => {
                if !(0..=9999).contains(&v.year()) {
                    return Err(anyhow::anyhow!("Date {} is out of range for MySQL", v));
                }
                MySQLValue::Date(
                    v.year() as _,
                    v.month().into(),
                    v.day(),
                    v.hour(),
                    v.minute(),
                    v.second(),
                    v.microsecond(),
                )
            }
            Value::Interval(v) => {
                let abs = v.abs();
                let secs = abs.whole_seconds();
                MySQLValue::Time(
                    v.is_negative(),
                    (secs / 86_400) as _,
                    (secs % 86_400 / 3600) as _,
                    (secs % 3600 / 60) as _,
                    (secs % 60) as _,
                    abs.subsec_microseconds() as _,
                )
            }
        })
    }
}
