use crate::{MySQLDriver, MySQLSqlWriter, RowWrap, ValueWrap};
use anyhow::{Context, Error, Result};
use async_stream::try_stream;
use mysql_async::{Conn, Opts, OptsBuilder, Params, prelude::Queryable};
use std::sync::Arc;
use tabula_core::{
    Connection, ConnectionConfig, Driver, Executor, Query, QueryResult, RowsAffected, SqlWriter,
    stream::{Stream, StreamExt, TryStreamExt},
};

pub struct MySQLConnection {
    pub(crate) connection: Conn,
}

impl MySQLConnection {
    /// Close the connection gracefully, dropping it closes it as well.
    pub async fn disconnect(self) -> Result<()> {
        self.connection
            .disconnect()
            .await
            .context("While disconnecting from MySQL")
    }
}

impl Executor for MySQLConnection {
    fn driver_name(&self) -> &'static str {
        MySQLDriver::NAME
    }

    fn sql_writer(&self) -> &dyn SqlWriter {
        &MySQLSqlWriter {}
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        let context = Arc::new(format!("While running the query:\n{}", query));
        try_stream! {
            match query {
                Query::Raw(sql) => {
                    let mut result = self.connection.query_iter(sql).await?;
                    let mut rows = 0;
                    while let Some(mut stream) = result.stream::<RowWrap>().await? {
                        while let Some(row) = stream.next().await.transpose()? {
                            rows += 1;
                            yield QueryResult::Row(row.0)
                        }
                    }
                    if rows == 0 {
                        yield QueryResult::Affected(RowsAffected {
                            rows_affected: result.affected_rows(),
                            last_affected_id: result.last_insert_id().map(|v| v as _),
                        })
                    }
                }
                Query::Bound(statement) => {
                    let params = if statement.bindings.is_empty() {
                        Params::Empty
                    } else {
                        Params::Positional(
                            statement
                                .bindings
                                .into_iter()
                                .map(|v| ValueWrap(v).try_into())
                                .collect::<Result<_>>()?,
                        )
                    };
                    let mut result = self.connection.exec_iter(statement.sql, params).await?;
                    let mut rows = 0;
                    while let Some(mut stream) = result.stream::<RowWrap>().await? {
                        while let Some(row) = stream.next().await.transpose()? {
                            rows += 1;
                            yield QueryResult::Row(row.0)
                        }
                    }
                    if rows == 0 {
                        yield QueryResult::Affected(RowsAffected {
                            rows_affected: result.affected_rows(),
                            last_affected_id: result.last_insert_id().map(|v| v as _),
                        })
                    }
                }
            }
        }
        .map_err(move |e: Error| {
            let e = e.context(context.clone());
            log::debug!("{:#}", e);
            e
        })
    }
}

impl Connection for MySQLConnection {
    async fn connect(config: &ConnectionConfig) -> Result<MySQLConnection> {
        let context = || format!("While trying to connect to `{}`", config.redacted_url());
        let prefix = format!("{}://", MySQLDriver::NAME);
        let mut url = config.url();
        if !url.starts_with(&prefix) {
            return Err(Error::msg(format!(
                "MySQL connection url must start with `{}`",
                &prefix
            ))
            .context(context()));
        }
        if !config.options.extra.is_empty() {
            url.push('?');
            url.push_str(
                &url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&config.options.extra)
                    .finish(),
            );
        }
        let opts = Opts::from_url(&url).with_context(context)?;
        let opts = OptsBuilder::from_opts(opts)
            .wait_timeout(Some(config.options.timeout().as_secs() as _));
        let connection = Conn::new(opts).await.with_context(context)?;
        Ok(MySQLConnection { connection })
    }
}
