use crate::{
    Connection, ConnectionConfig, ConnectionOptions, Error, ErrorMode, Executor, FetchMode,
    Query, RenderedStatement, Result, RowNames, SqlWriter, StatementResult, Value, truncate_long,
};
use anyhow::Context;
use std::fmt::Display;

/// Connection manager: one live connection, the options it was opened with and a record of
/// the last statement it was asked to run.
pub struct Database<C: Connection> {
    connection: C,
    options: ConnectionOptions,
    last_statement: Option<RenderedStatement>,
    last_insert_id: Option<String>,
}

impl<C: Connection> Database<C> {
    /// Connect using `config`, caller options merged over the defaults.
    pub async fn open(config: &ConnectionConfig) -> Result<Self> {
        let options = config.effective_options();
        let config = ConnectionConfig {
            options: options.clone(),
            ..config.clone()
        };
        let target = config.redacted_url();
        match C::connect(&config)
            .await
            .with_context(|| format!("While connecting to `{}`", target))
        {
            Ok(connection) => {
                log::debug!("Connected to `{}`", target);
                Ok(Self::new(connection, options))
            }
            Err(e) => {
                report(options.error_mode(), &e);
                Err(Error::connection(target, e))
            }
        }
    }

    /// Wrap a connection that is already open.
    pub fn new(connection: C, options: ConnectionOptions) -> Self {
        Self {
            connection,
            options: ConnectionOptions::defaults().merge(options),
            last_statement: None,
            last_insert_id: None,
        }
    }

    /// Prepare `sql`, bind `bindings` to its placeholders and execute it.
    pub async fn execute(
        &mut self,
        sql: impl Into<String>,
        bindings: impl IntoIterator<Item = Value>,
    ) -> Result<StatementResult> {
        self.run(Query::Bound(RenderedStatement::new(sql, bindings)))
            .await
    }

    /// Execute `sql` as is, without parameter binding.
    pub async fn execute_raw(&mut self, sql: impl Into<String>) -> Result<StatementResult> {
        self.run(Query::Raw(sql.into())).await
    }

    async fn run(&mut self, query: Query) -> Result<StatementResult> {
        let statement = match &query {
            Query::Raw(sql) => RenderedStatement::new(sql.clone(), []),
            Query::Bound(statement) => statement.clone(),
        };
        log::debug!("{}", query);
        let sql = statement.sql.clone();
        self.last_statement = Some(statement);
        match self
            .connection
            .collect(query)
            .await
            .with_context(|| format!("While executing the query:\n{}", truncate_long!(sql)))
        {
            Ok(mut result) => {
                if let Some(id) = result.last_insert_id {
                    self.last_insert_id = Some(id.to_string());
                }
                if self.options.fetch_mode() == FetchMode::Num {
                    label_by_position(&mut result);
                }
                Ok(result)
            }
            Err(e) => {
                self.report(&e);
                Err(Error::query(sql, e))
            }
        }
    }

    /// Log `error` at the level picked by the error mode.
    pub fn report(&self, error: &dyn Display) {
        report(self.options.error_mode(), error);
    }

    /// Id generated by the most recent statement that reported one.
    pub fn last_inserted_id(&self) -> Option<String> {
        self.last_insert_id.clone()
    }

    /// The last statement handed to the driver, recorded whether it succeeded or not.
    pub fn last_statement(&self) -> Option<&RenderedStatement> {
        self.last_statement.as_ref()
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    pub fn sql_writer(&self) -> &dyn SqlWriter {
        self.connection.sql_writer()
    }

    pub fn driver_name(&self) -> &'static str {
        self.connection.driver_name()
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn into_connection(self) -> C {
        self.connection
    }
}

fn report(mode: ErrorMode, error: &dyn Display) {
    match mode {
        ErrorMode::Exception => log::error!("{:#}", error),
        ErrorMode::Warning => log::warn!("{:#}", error),
        ErrorMode::Silent => {}
    }
}

fn label_by_position(result: &mut StatementResult) {
    let mut labels: Option<RowNames> = None;
    for row in &mut result.rows {
        let reuse = labels.as_ref().filter(|v| v.len() == row.values.len()).cloned();
        let current = reuse.unwrap_or_else(|| (0..row.values.len()).map(|i| i.to_string()).collect());
        row.labels = current.clone();
        labels = Some(current);
    }
}
