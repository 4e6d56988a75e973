use crate::{SQLiteConnection, SQLiteSqlWriter};
use tabula_core::Driver;

#[derive(Clone, Copy, Default)]
pub struct SQLiteDriver;
impl SQLiteDriver {
    pub const fn new() -> Self {
        Self
    }
}

impl Driver for SQLiteDriver {
    type Connection = SQLiteConnection;
    type SqlWriter = SQLiteSqlWriter;

    const NAME: &'static str = "sqlite";
    fn sql_writer(&self) -> Self::SqlWriter {
        SQLiteSqlWriter::default()
    }
}
