use crate::{
    CBox, SQLiteDriver, SQLiteSqlWriter,
    bind::bind_all,
    error_message,
    extract::{extract_name, extract_value},
};
use anyhow::{Context, Error, Result};
use async_stream::try_stream;
use libsqlite3_sys::{
    SQLITE_DONE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI,
    SQLITE_ROW, sqlite3, sqlite3_busy_timeout, sqlite3_close, sqlite3_column_count,
    sqlite3_finalize, sqlite3_last_insert_rowid, sqlite3_open_v2, sqlite3_prepare_v2,
    sqlite3_sql, sqlite3_step, sqlite3_stmt, sqlite3_stmt_readonly, sqlite3_total_changes64,
};
use std::{
    ffi::{CStr, CString, c_char, c_int},
    ptr,
    sync::Arc,
};
use tabula_core::{
    Connection, ConnectionConfig, Driver, Executor, Query, QueryResult, RowLabeled, RowNames,
    RowsAffected, SqlWriter,
    stream::{Stream, TryStreamExt},
};
use tokio::task::spawn_blocking;

pub struct SQLiteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SQLiteConnection {
    /// Prepare the first statement found in `sql`, `tail` is moved past it.
    unsafe fn prepare(
        connection: *mut sqlite3,
        sql: *const c_char,
        tail: &mut *const c_char,
    ) -> Result<CBox<*mut sqlite3_stmt>> {
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let rc = unsafe { sqlite3_prepare_v2(connection, sql, -1, &mut *statement, tail) };
        if rc != SQLITE_OK {
            return Err(Error::msg(error_message(connection)));
        }
        Ok(statement)
    }

    /// Step `statement` to completion collecting its rows and, for writes, what changed.
    unsafe fn step(
        connection: *mut sqlite3,
        statement: *mut sqlite3_stmt,
    ) -> Result<Vec<QueryResult>> {
        unsafe {
            let count = sqlite3_column_count(statement);
            let labels = (0..count)
                .map(|i| extract_name(statement, i))
                .collect::<Result<RowNames>>()?;
            let before = sqlite3_total_changes64(connection);
            let mut results = Vec::new();
            loop {
                match sqlite3_step(statement) {
                    SQLITE_ROW => results.push(QueryResult::Row(RowLabeled::new(
                        labels.clone(),
                        (0..count)
                            .map(|i| extract_value(statement, i))
                            .collect::<Result<_>>()?,
                    ))),
                    SQLITE_DONE => break,
                    _ => return Err(Error::msg(error_message(connection))),
                }
            }
            if sqlite3_stmt_readonly(statement) == 0 {
                let changes = (sqlite3_total_changes64(connection) - before).max(0) as u64;
                let inserted = changes > 0 && is_insert(sqlite3_sql(statement));
                results.push(QueryResult::Affected(RowsAffected {
                    rows_affected: changes,
                    last_affected_id: inserted.then(|| sqlite3_last_insert_rowid(connection)),
                }));
            }
            Ok(results)
        }
    }

    /// Run every statement in `query`, blocking the current thread.
    unsafe fn execute(connection: *mut sqlite3, query: Query) -> Result<Vec<QueryResult>> {
        unsafe {
            match query {
                Query::Raw(sql) => {
                    let sql = CString::new(sql)
                        .context("Could not create a CString from the query String")?;
                    let mut results = Vec::new();
                    let mut remaining = sql.as_ptr();
                    loop {
                        let mut tail = ptr::null();
                        let statement = Self::prepare(connection, remaining, &mut tail)?;
                        if !statement.is_null() {
                            results.extend(Self::step(connection, *statement)?);
                        }
                        if tail.is_null() || *tail == 0 || tail == remaining {
                            break;
                        }
                        remaining = tail;
                    }
                    Ok(results)
                }
                Query::Bound(statement) => {
                    let sql = CString::new(statement.sql)
                        .context("Could not create a CString from the query String")?;
                    let mut tail = ptr::null();
                    let prepared = Self::prepare(connection, sql.as_ptr(), &mut tail)?;
                    if prepared.is_null() {
                        return Err(Error::msg("The query does not contain any statement"));
                    }
                    let mut remaining = tail;
                    while !remaining.is_null() && *remaining != 0 {
                        let mut next = ptr::null();
                        let extra = Self::prepare(connection, remaining, &mut next)?;
                        if !extra.is_null() {
                            return Err(Error::msg(
                                "Cannot prepare more than one statement at a time",
                            ));
                        }
                        if next == remaining {
                            break;
                        }
                        remaining = next;
                    }
                    bind_all(*prepared, &statement.bindings)?;
                    Self::step(connection, *prepared)
                }
            }
        }
    }
}

/// Whether the statement text starts with `INSERT` or `REPLACE`.
unsafe fn is_insert(sql: *const c_char) -> bool {
    if sql.is_null() {
        return false;
    }
    let sql = unsafe { CStr::from_ptr(sql) }.to_bytes();
    let start = sql
        .iter()
        .position(|v| !v.is_ascii_whitespace())
        .unwrap_or(sql.len());
    let keyword = sql[start..]
        .iter()
        .take_while(|v| v.is_ascii_alphabetic())
        .count();
    let keyword = &sql[start..start + keyword];
    keyword.eq_ignore_ascii_case(b"INSERT") || keyword.eq_ignore_ascii_case(b"REPLACE")
}

impl Executor for SQLiteConnection {
    fn driver_name(&self) -> &'static str {
        SQLiteDriver::NAME
    }

    fn sql_writer(&self) -> &dyn SqlWriter {
        &SQLiteSqlWriter {}
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        let context = Arc::new(format!("While running the query:\n{}", query));
        let connection = CBox::new(*self.connection, |_| {});
        try_stream! {
            let results = spawn_blocking(move || unsafe {
                Self::execute(*connection, query)
            })
            .await??;
            for result in results {
                yield result;
            }
        }
        .map_err(move |e: Error| {
            let e = e.context(context.clone());
            log::debug!("{:#}", e);
            e
        })
    }
}

impl Connection for SQLiteConnection {
    async fn connect(config: &ConnectionConfig) -> Result<SQLiteConnection> {
        let context = || {
            format!(
                "While trying to open the SQLite database `{}`",
                config.database
            )
        };
        for (key, value) in &config.options.extra {
            log::warn!("SQLite ignores the connection option `{}={}`", key, value);
        }
        let path = CString::new(config.database.as_str()).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe {
            sqlite3_open_v2(
                path.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            return Err(Error::msg(error_message(*connection)).context(context()));
        }
        let timeout = config.options.timeout().as_millis().min(c_int::MAX as u128) as c_int;
        unsafe {
            sqlite3_busy_timeout(*connection, timeout);
        }
        Ok(SQLiteConnection { connection })
    }
}
