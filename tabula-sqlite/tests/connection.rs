#[cfg(test)]
mod tests {
    use indoc::indoc;
    use std::{path::Path, sync::Mutex, time::Duration};
    use tabula_core::{
        ColumnSpec, Connection, ConnectionConfig, ConnectionOptions, Database, Error, ErrorMode,
        FetchMode, Executor, QueryBuilder, Value, values,
    };
    use tabula_sqlite::SQLiteConnection;
    use tabula_tests::{init_logs, silent_logs};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    fn memory() -> ConnectionConfig {
        ConnectionConfig::new(":memory:").driver("sqlite")
    }

    #[tokio::test]
    async fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .await
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        let config = ConnectionConfig::new(DB_PATH).driver("sqlite");
        SQLiteConnection::connect(&config)
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        fs::remove_file(DB_PATH)
            .await
            .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
    }

    #[tokio::test]
    async fn open_failure() {
        init_logs();
        let config = ConnectionConfig::new("../target/debug/missing/directory/db.sqlite")
            .driver("sqlite")
            .options(ConnectionOptions::new().with_error_mode(ErrorMode::Silent));
        let Err(error) = Database::<SQLiteConnection>::open(&config).await else {
            panic!("Opening a database in a missing directory must fail");
        };
        assert!(error.is_connection());
    }

    #[tokio::test]
    async fn unknown_options_are_ignored() {
        init_logs();
        let config = memory().options(
            ConnectionOptions::new()
                .with_timeout(Duration::from_secs(1))
                .with("charset", "utf8")
                .unwrap(),
        );
        let database = silent_logs! {
            Database::<SQLiteConnection>::open(&config).await
        }
        .expect("Extra options must not prevent the connection");
        assert_eq!(database.options().timeout(), Duration::from_secs(1));
        assert_eq!(database.driver_name(), "sqlite");
    }

    #[tokio::test]
    async fn multiple_statements() {
        init_logs();
        let mut connection = SQLiteConnection::connect(&memory())
            .await
            .expect("Could not open the database");
        let result = connection
            .collect(
                indoc! {"
                    CREATE TABLE a (v INTEGER);
                    INSERT INTO a VALUES (1), (2), (3);
                    -- trailing comment
                    SELECT SUM(v) AS total FROM a;
                "}
                .into(),
            )
            .await
            .expect("Several statements must run in one raw query");
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].get_column("total"), Some(&Value::Int64(6)));
        assert_eq!(result.rows_affected, 3);
    }

    #[tokio::test]
    async fn bound_statements() {
        init_logs();
        let mut database = Database::<SQLiteConnection>::open(&memory())
            .await
            .expect("Could not open the database");
        database
            .execute_raw("CREATE TABLE kv (k TEXT PRIMARY KEY, v BLOB, f REAL, n INTEGER)")
            .await
            .expect("Could not create the table");
        let result = database
            .execute(
                "INSERT INTO kv (k, v, f, n) VALUES (?, ?, ?, ?);",
                values!["a", vec![0u8, 1, 2], 0.5, Value::Null],
            )
            .await
            .expect("Could not insert");
        assert_eq!(result.rows_affected, 1);
        let rows = database
            .execute("SELECT k, v, f, n FROM kv WHERE k = ?", values!["a"])
            .await
            .expect("Could not select")
            .rows;
        assert_eq!(
            rows[0].values(),
            [
                Value::Varchar("a".into()),
                Value::Blob(vec![0u8, 1, 2].into()),
                Value::Float64(0.5),
                Value::Null,
            ]
        );

        let rows = database
            .execute("SELECT k FROM kv WHERE k = ?; -- by key", values!["a"])
            .await
            .expect("A trailing comment is not a second statement")
            .rows;
        assert_eq!(rows.len(), 1);

        let error = silent_logs! {
            database.execute("SELECT 1; SELECT 2", []).await
        }
        .unwrap_err();
        assert!(error.is_query());
        let error = silent_logs! {
            database.execute("SELECT k FROM kv WHERE k = ?", []).await
        }
        .unwrap_err();
        assert!(error.is_query());
        let error = silent_logs! {
            database
                .execute("SELECT k FROM kv WHERE k = ?", values![time::Duration::seconds(1)])
                .await
        }
        .unwrap_err();
        assert!(matches!(error, Error::Query { .. }));
    }

    #[tokio::test]
    async fn fetch_mode_num() {
        init_logs();
        let config =
            memory().options(ConnectionOptions::new().with_fetch_mode(FetchMode::Num));
        let mut builder = QueryBuilder::<SQLiteConnection>::open(&config)
            .await
            .expect("Could not open the database");
        builder
            .database_mut()
            .execute_raw("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)")
            .await
            .expect("Could not create the table");
        builder.use_table("t").use_columns(["id", "name"]);
        let id = builder
            .insert(ColumnSpec::assignments([("id", Value::from(5)), ("name", "x".into())]), [])
            .await
            .expect("Could not insert");
        assert_eq!(id, "5");
        assert_eq!(builder.to_sql(false), "INSERT INTO t(id, name) VALUES (5, 'x')");
        let rows = builder.select("", []).await.expect("Could not select");
        assert_eq!(rows[0].names(), ["0", "1"]);
        assert_eq!(rows[0].get_column("1"), Some(&Value::Varchar("x".into())));
    }

    #[tokio::test]
    async fn updates_report_no_id() {
        init_logs();
        let mut database = Database::<SQLiteConnection>::open(&memory())
            .await
            .expect("Could not open the database");
        let result = database
            .execute_raw(indoc! {"
                CREATE TABLE t (id INTEGER PRIMARY KEY, n INTEGER);
                INSERT INTO t (n) VALUES (1);
            "})
            .await
            .expect("Could not setup");
        assert_eq!(result.last_insert_id, Some(1));
        let result = database
            .execute("UPDATE t SET n = n + 1", [])
            .await
            .expect("Could not update");
        assert_eq!(result.rows_affected, 1);
        assert_eq!(result.last_insert_id, None);
        assert_eq!(database.last_inserted_id().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn inserted_ids_across_tables() {
        init_logs();
        let mut builder = QueryBuilder::<SQLiteConnection>::open(&memory())
            .await
            .expect("Could not open the database");
        builder
            .database_mut()
            .execute_raw(indoc! {"
                CREATE TABLE a (id INTEGER PRIMARY KEY, v TEXT);
                CREATE TABLE b (id INTEGER PRIMARY KEY, v TEXT);
            "})
            .await
            .expect("Could not create the tables");
        let first = builder
            .use_table("a")
            .use_columns(["v"])
            .insert(values!["x"], [])
            .await
            .expect("Could not insert into a");
        let second = builder
            .use_table("b")
            .insert(values!["y"], [])
            .await
            .expect("Could not insert into b");
        assert_eq!(first, "1");
        assert_eq!(second, "1");

        builder.delete("id = ?", values![1]).await.expect("Could not delete");
        let again = builder
            .insert(values!["z"], [])
            .await
            .expect("Could not insert into b again");
        assert_eq!(again, "1");
        assert_eq!(builder.database().last_inserted_id().as_deref(), Some("1"));

        let result = builder
            .database_mut()
            .execute("INSERT INTO a (v) SELECT v FROM a WHERE v = ?", values!["missing"])
            .await
            .expect("Could not insert nothing");
        assert_eq!(result.rows_affected, 0);
        assert_eq!(result.last_insert_id, None);
    }
}
