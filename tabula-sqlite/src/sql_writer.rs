use tabula_core::SqlWriter;

#[derive(Default, Debug, Clone, Copy)]
pub struct SQLiteSqlWriter {}

impl SQLiteSqlWriter {
    pub const fn new() -> Self {
        Self {}
    }
}

impl SqlWriter for SQLiteSqlWriter {}
