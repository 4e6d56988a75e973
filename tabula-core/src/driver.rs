use crate::{ConnectionConfig, Connection, SqlWriter};
use std::future::Future;

/// A database backend: its name, its connection type and its SQL dialect.
pub trait Driver: Default + Send + Sync {
    /// Name used in connection urls and in [`ConnectionConfig::driver`].
    const NAME: &'static str;
    type Connection: Connection;
    type SqlWriter: SqlWriter;

    fn sql_writer(&self) -> Self::SqlWriter;

    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = anyhow::Result<Self::Connection>> + Send {
        Self::Connection::connect(config)
    }
}
