use crate::{
    ColumnSpec, Connection, ConnectionConfig, Database, Error, PLACEHOLDER, Precondition,
    Result, RowLabeled, Value, separated_by,
};

/// Stateful query builder.
///
/// The table and the columns are set once and reused by every following operation until they
/// are changed or [`reset`](QueryBuilder::reset).
///
/// ```ignore
/// let mut builder = QueryBuilder::<SQLiteConnection>::open(&config).await?;
/// builder.use_table("tasks").use_columns(["id", "title"]);
/// builder.insert(values![1, "write docs"], []).await?;
/// let rows = builder.select("id = ?", [1.into()]).await?;
/// ```
pub struct QueryBuilder<C: Connection> {
    database: Database<C>,
    table: String,
    columns: Option<ColumnSpec>,
}

impl<C: Connection> QueryBuilder<C> {
    pub fn new(database: Database<C>) -> Self {
        Self {
            database,
            table: String::new(),
            columns: None,
        }
    }

    /// Open a [`Database`] and wrap it.
    pub async fn open(config: &ConnectionConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config).await?))
    }

    pub fn use_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    /// Columns used by the next operations. A list is rendered unquoted, the values of an
    /// assignment list are quoted when it becomes the `SET` clause of an update.
    pub fn use_columns(&mut self, columns: impl Into<ColumnSpec>) -> &mut Self {
        self.columns = Some(columns.into());
        self
    }

    /// Forget table and columns.
    pub fn reset(&mut self) -> &mut Self {
        self.table.clear();
        self.columns = None;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> Option<&ColumnSpec> {
        self.columns.as_ref()
    }

    pub fn has_table(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn has_columns(&self) -> bool {
        self.columns.as_ref().is_some_and(|v| !v.is_empty())
    }

    pub fn database(&self) -> &Database<C> {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database<C> {
        &mut self.database
    }

    pub fn into_database(self) -> Database<C> {
        self.database
    }

    /// `SELECT {columns} FROM {table} [WHERE {condition}]`
    pub async fn select(
        &mut self,
        condition: &str,
        bindings: impl IntoIterator<Item = Value>,
    ) -> Result<Vec<RowLabeled>> {
        let columns = self.require_columns()?;
        let mut sql = String::with_capacity(64);
        sql.push_str("SELECT ");
        self.database
            .sql_writer()
            .write_column_spec(&mut sql, columns, false)?;
        sql.push_str(" FROM ");
        sql.push_str(&self.table);
        write_condition(&mut sql, condition);
        Ok(self.database.execute(sql, bindings).await?.rows)
    }

    /// `INSERT INTO {table}({columns}) VALUES ({values})`, returns the generated id or `"0"`.
    ///
    /// Values are quoted, for an assignment list only the values are written.
    pub async fn insert(
        &mut self,
        values: impl Into<ColumnSpec>,
        bindings: impl IntoIterator<Item = Value>,
    ) -> Result<String> {
        let values = values.into();
        let mut sql = self.insert_prefix()?;
        self.database
            .sql_writer()
            .write_values(&mut sql, &values, true)?;
        sql.push(')');
        let result = self.database.execute(sql, bindings).await?;
        Ok(result
            .last_insert_id
            .map_or_else(|| "0".into(), |v| v.to_string()))
    }

    /// Insert every row in a single statement with the values written inline.
    pub async fn insert_many(&mut self, rows: &[Vec<Value>]) -> Result<&mut Self> {
        let mut sql = self.insert_many_prefix(rows)?;
        self.database
            .sql_writer()
            .write_row_tuples(&mut sql, rows)?;
        self.database.execute_raw(sql).await?;
        Ok(self)
    }

    /// Like [`insert_many`](QueryBuilder::insert_many) but every value is bound to a placeholder.
    pub async fn insert_many_bound(&mut self, rows: &[Vec<Value>]) -> Result<&mut Self> {
        let mut sql = self.insert_many_prefix(rows)?;
        separated_by(
            &mut sql,
            rows,
            |out, row| {
                out.push('(');
                separated_by(out, row, |out, _| out.push_str(PLACEHOLDER), ", ");
                out.push(')');
            },
            ", ",
        );
        let bindings = rows.iter().flatten().cloned().collect::<Vec<_>>();
        self.database.execute(sql, bindings).await?;
        Ok(self)
    }

    /// `UPDATE {table} SET {columns} [WHERE {condition}]`
    ///
    /// Only the values of an assignment list are quoted, a plain list is written as is.
    pub async fn update(
        &mut self,
        condition: &str,
        bindings: impl IntoIterator<Item = Value>,
    ) -> Result<&mut Self> {
        let columns = self.require_columns()?;
        let mut sql = String::with_capacity(64);
        sql.push_str("UPDATE ");
        sql.push_str(&self.table);
        sql.push_str(" SET ");
        let quote = matches!(columns, ColumnSpec::Assignments(..));
        self.database
            .sql_writer()
            .write_column_spec(&mut sql, columns, quote)?;
        write_condition(&mut sql, condition);
        self.database.execute(sql, bindings).await?;
        Ok(self)
    }

    /// `DELETE FROM {table} WHERE {condition}`, the condition is mandatory.
    pub async fn delete(
        &mut self,
        condition: &str,
        bindings: impl IntoIterator<Item = Value>,
    ) -> Result<&mut Self> {
        self.require_table()?;
        if condition.trim().is_empty() {
            return Err(self.fail(Precondition::EmptyCondition));
        }
        let sql = format!("DELETE FROM {} WHERE {}", self.table, condition);
        self.database.execute(sql, bindings).await?;
        Ok(self)
    }

    /// Text of the last statement, followed by its bindings when `include_params` is set.
    pub fn to_sql(&self, include_params: bool) -> String {
        let Some(statement) = self.database.last_statement() else {
            return String::new();
        };
        let mut out = statement.sql.clone();
        if include_params {
            out.push_str("\n-- bindings: [");
            separated_by(
                &mut out,
                &statement.bindings,
                |out, v| out.push_str(&v.to_string()),
                ", ",
            );
            out.push(']');
        }
        out
    }

    /// Write [`to_sql`](QueryBuilder::to_sql) to the log.
    pub fn dump_sql(&self, include_params: bool) {
        log::info!("{}", self.to_sql(include_params));
    }

    fn fail(&self, precondition: Precondition) -> Error {
        let error = Error::from(precondition);
        self.database.report(&error);
        error
    }

    fn require_table(&self) -> Result<()> {
        if !self.has_table() {
            return Err(self.fail(Precondition::TableNotSet));
        }
        Ok(())
    }

    fn require_columns(&self) -> Result<&ColumnSpec> {
        self.require_table()?;
        match &self.columns {
            Some(columns) if !columns.is_empty() => Ok(columns),
            _ => Err(self.fail(Precondition::ColumnsNotSet)),
        }
    }

    fn insert_prefix(&self) -> Result<String> {
        let columns = self.require_columns()?;
        let mut sql = String::with_capacity(128);
        sql.push_str("INSERT INTO ");
        sql.push_str(&self.table);
        sql.push('(');
        self.database
            .sql_writer()
            .write_column_spec(&mut sql, columns, false)?;
        sql.push_str(") VALUES (");
        Ok(sql)
    }

    fn insert_many_prefix(&self, rows: &[Vec<Value>]) -> Result<String> {
        let mut sql = self.insert_prefix()?;
        if rows.is_empty() {
            return Err(self.fail(Precondition::NoRows));
        }
        // The tuples bring their own parentheses
        sql.pop();
        Ok(sql)
    }
}

fn write_condition(out: &mut String, condition: &str) {
    if !condition.trim().is_empty() {
        out.push_str(" WHERE ");
        out.push_str(condition);
    }
}
