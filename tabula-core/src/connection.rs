use crate::{ConnectionConfig, Executor};
use std::future::Future;

/// An open, exclusively owned handle to a database. Closed on drop.
pub trait Connection: Executor + Sized {
    /// Open a connection described by `config`.
    fn connect(config: &ConnectionConfig) -> impl Future<Output = anyhow::Result<Self>> + Send;
}
