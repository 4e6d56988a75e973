mod any;

pub use any::*;
pub use tabula_core::*;
pub use tabula_mysql::{MySQLConnection, MySQLDriver, MySQLSqlWriter};
pub use tabula_sqlite::{SQLiteConnection, SQLiteDriver, SQLiteSqlWriter};

/// Connection manager over the driver named in the configuration.
pub type AnyDatabase = Database<AnyConnection>;
/// Query builder over the driver named in the configuration.
pub type AnyQueryBuilder = QueryBuilder<AnyConnection>;
