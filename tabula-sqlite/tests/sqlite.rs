#[cfg(test)]
mod tests {
    use std::{path::Path, sync::Mutex};
    use tabula_core::{ConnectionConfig, Database};
    use tabula_sqlite::SQLiteConnection;
    use tabula_tests::{execute_tests, init_logs};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/tests.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH).await.expect(
                format!("Failed to remove existing test database file {}", DB_PATH).as_str(),
            );
        }
        let database = Database::<SQLiteConnection>::open(
            &ConnectionConfig::from_url(&format!("sqlite://{}", DB_PATH))
                .expect("Could not parse the url"),
        )
        .await
        .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        execute_tests(database).await;
    }

    #[tokio::test]
    async fn sqlite_memory() {
        init_logs();
        let database =
            Database::<SQLiteConnection>::open(&ConnectionConfig::new(":memory:").driver("sqlite"))
                .await
                .expect("Could not open the in memory database");
        execute_tests(database).await;
    }
}
