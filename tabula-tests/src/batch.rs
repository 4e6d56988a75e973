use std::sync::LazyLock;
use tabula::{Connection, QueryBuilder, Value, values};
use tokio::sync::Mutex;

pub async fn batch<C: Connection>(builder: &mut QueryBuilder<C>) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    // Setup
    let database = builder.database_mut();
    database
        .execute_raw("DROP TABLE IF EXISTS notes")
        .await
        .expect("Failed to drop the notes table");
    database
        .execute_raw("CREATE TABLE notes (id INTEGER NOT NULL, body VARCHAR(255) NOT NULL, pinned BOOLEAN NOT NULL)")
        .await
        .expect("Failed to create the notes table");

    // Literal values
    builder
        .reset()
        .use_table("notes")
        .use_columns(["id", "body", "pinned"]);
    builder
        .insert_many(&[
            values![1, "plain", true],
            values![2, "it's", false],
            values![3, r"C:\temp\new", false],
        ])
        .await
        .expect("Failed to insert the literal rows");
    assert!(builder.to_sql(false).starts_with(
        "INSERT INTO notes(id, body, pinned) VALUES (1, 'plain', TRUE), (2, 'it''s', FALSE), "
    ));

    // Bound values
    builder
        .insert_many_bound(&[
            values![4, "bound 'quote'", true],
            values![5, r"back\slash", false],
        ])
        .await
        .expect("Failed to insert the bound rows");
    assert_eq!(
        builder.to_sql(false),
        "INSERT INTO notes(id, body, pinned) VALUES (?, ?, ?), (?, ?, ?)"
    );

    let rows = builder
        .select("id > ? ORDER BY id", values![0])
        .await
        .expect("Failed to select the notes");
    let bodies = rows
        .iter()
        .map(|v| v.get_column("body").and_then(Value::as_str).unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(
        bodies,
        ["plain", "it's", r"C:\temp\new", "bound 'quote'", r"back\slash"]
    );
    let pinned = rows
        .iter()
        .filter(|v| v.get_column("pinned").and_then(Value::as_bool) == Some(true))
        .count();
    assert_eq!(pinned, 2);
}
