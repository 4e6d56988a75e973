use tabula_core::{
    Connection, ConnectionConfig, Executor, GenericSqlWriter, Query, QueryResult, RowLabeled,
    RowsAffected, SqlWriter,
    anyhow::{self, anyhow},
    stream::{self, Stream},
};

/// Connection that records every query and answers with canned results.
#[derive(Default)]
pub struct MockConnection {
    pub queries: Vec<Query>,
    pub rows: Vec<RowLabeled>,
    pub last_insert_id: Option<i64>,
    pub fail: bool,
}

impl MockConnection {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_insert_id(id: i64) -> Self {
        Self {
            last_insert_id: Some(id),
            ..Default::default()
        }
    }

    pub fn sql(&self) -> Vec<&str> {
        self.queries.iter().map(Query::sql).collect()
    }
}

impl Executor for MockConnection {
    fn driver_name(&self) -> &'static str {
        "mock"
    }

    fn sql_writer(&self) -> &dyn SqlWriter {
        &GenericSqlWriter
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = anyhow::Result<QueryResult>> + Send {
        self.queries.push(query);
        let results: Vec<anyhow::Result<QueryResult>> = if self.fail {
            vec![Err(anyhow!("Table 'shop.t' doesn't exist"))]
        } else {
            self.rows
                .iter()
                .cloned()
                .map(|v| Ok(QueryResult::Row(v)))
                .chain([Ok(QueryResult::Affected(RowsAffected {
                    rows_affected: 1,
                    last_affected_id: self.last_insert_id,
                }))])
                .collect()
        };
        stream::iter(results)
    }
}

impl Connection for MockConnection {
    async fn connect(config: &ConnectionConfig) -> anyhow::Result<Self> {
        if config.host == "unreachable" {
            return Err(anyhow!("Connection refused"));
        }
        Ok(Self::default())
    }
}
