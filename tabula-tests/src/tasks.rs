use crate::auto_increment_id;
use std::sync::LazyLock;
use tabula::{ColumnSpec, Connection, QueryBuilder, Value, values};
use tokio::sync::Mutex;

pub async fn tasks<C: Connection>(builder: &mut QueryBuilder<C>) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    let database = builder.database_mut();
    let id = auto_increment_id(database.driver_name());
    database
        .execute_raw("DROP TABLE IF EXISTS tasks")
        .await
        .expect("Failed to drop the tasks table");
    database
        .execute_raw(format!(
            "CREATE TABLE tasks (id {id}, title VARCHAR(255) NOT NULL, status VARCHAR(32) NOT NULL, priority INTEGER NOT NULL)"
        ))
        .await
        .expect("Failed to create the tasks table");

    // Insert
    builder
        .reset()
        .use_table("tasks")
        .use_columns(["title", "status", "priority"]);
    let first = builder
        .insert(values!["?", "todo", 1], values!["Write docs"])
        .await
        .expect("Failed to insert the first task");
    assert!(!first.is_empty());
    assert_ne!(first, "0");
    assert_eq!(
        builder.to_sql(false),
        "INSERT INTO tasks(title, status, priority) VALUES (?, 'todo', 1)"
    );
    let second = builder
        .insert(
            ColumnSpec::assignments([
                ("title", Value::from("Fix 'quotes'")),
                ("status", "todo".into()),
                ("priority", 2.into()),
            ]),
            [],
        )
        .await
        .expect("Failed to insert the second task");
    assert_ne!(first, second);
    assert_eq!(
        builder.database().last_inserted_id().as_deref(),
        Some(second.as_str())
    );

    // Select
    builder.use_columns(["id", "title", "status", "priority"]);
    let rows = builder
        .select("", [])
        .await
        .expect("Failed to select all the tasks");
    assert_eq!(rows.len(), 2);
    let rows = builder
        .select("title = ?", values!["Fix 'quotes'"])
        .await
        .expect("Failed to select a task by title");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get_column("id").and_then(Value::as_i64).map(|v| v.to_string()),
        Some(second.clone())
    );
    assert_eq!(rows[0].get_column("priority").and_then(Value::as_i64), Some(2));
    assert_eq!(
        rows[0].get_column("status").and_then(Value::as_str),
        Some("todo")
    );

    // Update
    builder.use_columns(ColumnSpec::assignments([("status", "done")]));
    builder
        .update("priority = ?", values![1])
        .await
        .expect("Failed to update the tasks");
    assert_eq!(
        builder.to_sql(true),
        "UPDATE tasks SET status = 'done' WHERE priority = ?\n-- bindings: [1]"
    );
    builder.use_columns(["title"]);
    let rows = builder
        .select("status = ?", values!["done"])
        .await
        .expect("Failed to select the completed tasks");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get_column("title").and_then(Value::as_str),
        Some("Write docs")
    );

    // Delete
    builder
        .delete("status = ?", values!["done"])
        .await
        .expect("Failed to delete the completed tasks");
    builder.use_columns("COUNT(*)");
    let rows = builder
        .select("", [])
        .await
        .expect("Failed to count the tasks");
    assert_eq!(rows[0].get(0).and_then(Value::as_i64), Some(1));
}
