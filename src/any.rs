use tabula_core::{
    Connection, ConnectionConfig, Driver, Executor, Query, QueryResult, SqlWriter,
    anyhow::{Error, Result},
    future::Either,
    stream::Stream,
};
use tabula_mysql::{MySQLConnection, MySQLDriver};
use tabula_sqlite::{SQLiteConnection, SQLiteDriver};

/// A connection to any of the supported databases, picked by [`ConnectionConfig::driver`].
///
/// ```no_run
/// # async fn run() -> tabula::Result<()> {
/// use tabula::{AnyQueryBuilder, ConnectionConfig, values};
/// let config = ConnectionConfig::from_url("sqlite://:memory:")?;
/// let mut builder = AnyQueryBuilder::open(&config).await?;
/// builder
///     .database_mut()
///     .execute_raw("CREATE TABLE t (id INTEGER, name TEXT)")
///     .await?;
/// builder.use_table("t").use_columns(["id", "name"]);
/// builder.insert_many(&[values![1, "a"], values![2, "b"]]).await?;
/// let rows = builder.select("id = ?", values![2]).await?;
/// # Ok(())
/// # }
/// ```
pub enum AnyConnection {
    MySQL(MySQLConnection),
    SQLite(SQLiteConnection),
}

impl Executor for AnyConnection {
    fn driver_name(&self) -> &'static str {
        match self {
            AnyConnection::MySQL(connection) => connection.driver_name(),
            AnyConnection::SQLite(connection) => connection.driver_name(),
        }
    }

    fn sql_writer(&self) -> &dyn SqlWriter {
        match self {
            AnyConnection::MySQL(connection) => connection.sql_writer(),
            AnyConnection::SQLite(connection) => connection.sql_writer(),
        }
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        match self {
            AnyConnection::MySQL(connection) => Either::Left(connection.run(query)),
            AnyConnection::SQLite(connection) => Either::Right(connection.run(query)),
        }
    }
}

impl Connection for AnyConnection {
    async fn connect(config: &ConnectionConfig) -> Result<AnyConnection> {
        let driver = config.driver.as_str();
        log::debug!("Opening a `{}` connection", driver);
        if driver == MySQLDriver::NAME {
            Ok(AnyConnection::MySQL(MySQLConnection::connect(config).await?))
        } else if driver == SQLiteDriver::NAME {
            Ok(AnyConnection::SQLite(SQLiteConnection::connect(config).await?))
        } else {
            Err(Error::msg(format!(
                "Unknown driver `{}`, the supported ones are `{}` and `{}`",
                driver,
                MySQLDriver::NAME,
                SQLiteDriver::NAME
            )))
        }
    }
}

impl From<MySQLConnection> for AnyConnection {
    fn from(value: MySQLConnection) -> Self {
        AnyConnection::MySQL(value)
    }
}

impl From<SQLiteConnection> for AnyConnection {
    fn from(value: SQLiteConnection) -> Self {
        AnyConnection::SQLite(value)
    }
}
