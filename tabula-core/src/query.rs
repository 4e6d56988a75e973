use crate::{Value, truncate_long};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// SQL text together with the values bound to its `?` placeholders.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    pub sql: String,
    pub bindings: Vec<Value>,
}

impl RenderedStatement {
    pub fn new(sql: impl Into<String>, bindings: impl IntoIterator<Item = Value>) -> Self {
        Self {
            sql: sql.into(),
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl Display for RenderedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}

/// A query ready to be executed by an [`Executor`](crate::Executor).
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Literal SQL, run without parameter binding. It may contain several statements.
    Raw(String),
    /// A single statement prepared and executed with its bindings.
    Bound(RenderedStatement),
}

impl Query {
    pub fn sql(&self) -> &str {
        match self {
            Query::Raw(sql) => sql,
            Query::Bound(statement) => &statement.sql,
        }
    }

    pub fn bindings(&self) -> &[Value] {
        match self {
            Query::Raw(..) => &[],
            Query::Bound(statement) => &statement.bindings,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Query::Bound(..))
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query::Raw(value.into())
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query::Raw(value)
    }
}

impl From<RenderedStatement> for Query {
    fn from(value: RenderedStatement) -> Self {
        Query::Bound(value)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql()))
    }
}

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted identifier when available.
    pub last_affected_id: Option<i64>,
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_affected_id.is_some() {
                self.last_affected_id = elem.last_affected_id;
            }
        }
    }
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values[i])
    }
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// Heterogeneous items emitted by `Executor::run` combining rows and modify results.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// A labeled row.
    Row(RowLabeled),
    /// A modify effect aggregation.
    Affected(RowsAffected),
}

impl From<RowLabeled> for QueryResult {
    fn from(value: RowLabeled) -> Self {
        QueryResult::Row(value)
    }
}

impl From<RowsAffected> for QueryResult {
    fn from(value: RowsAffected) -> Self {
        QueryResult::Affected(value)
    }
}

/// Everything a statement produced: the rows it returned and what it modified.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct StatementResult {
    pub rows: Vec<RowLabeled>,
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

impl StatementResult {
    pub fn push(&mut self, result: QueryResult) {
        match result {
            QueryResult::Row(row) => self.rows.push(row),
            QueryResult::Affected(affected) => {
                self.rows_affected += affected.rows_affected;
                if affected.last_affected_id.is_some() {
                    self.last_insert_id = affected.last_affected_id;
                }
            }
        }
    }
}

impl Extend<QueryResult> for StatementResult {
    fn extend<T: IntoIterator<Item = QueryResult>>(&mut self, iter: T) {
        for result in iter {
            self.push(result);
        }
    }
}

impl IntoIterator for StatementResult {
    type Item = RowLabeled;
    type IntoIter = std::vec::IntoIter<RowLabeled>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
