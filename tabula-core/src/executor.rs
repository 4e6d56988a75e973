use crate::{
    Query, QueryResult, RowLabeled, RowsAffected, SqlWriter, StatementResult,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

pub trait Executor: Send {
    /// Name of the driver behind this executor.
    fn driver_name(&self) -> &'static str;

    fn sql_writer(&self) -> &dyn SqlWriter;

    /// General method to send any query and return any result type (either row or count)
    fn run(&mut self, query: Query) -> impl Stream<Item = anyhow::Result<QueryResult>> + Send;

    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: Query) -> impl Stream<Item = anyhow::Result<RowLabeled>> + Send {
        self.run(query).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the query and return the total number of rows affected.
    fn execute(&mut self, query: Query) -> impl Future<Output = anyhow::Result<RowsAffected>> + Send {
        self.run(query)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }

    /// Execute the query and gather both rows and modify results.
    fn collect(&mut self, query: Query) -> impl Future<Output = anyhow::Result<StatementResult>> + Send {
        self.run(query).try_collect()
    }
}
