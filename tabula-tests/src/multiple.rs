use tabula::{Connection, QueryBuilder, Value};

/// Several statements sent as one raw text.
pub async fn multiple<C: Connection>(builder: &mut QueryBuilder<C>) {
    let result = builder
        .database_mut()
        .execute_raw(
            "DROP TABLE IF EXISTS counters; \
             CREATE TABLE counters (name VARCHAR(32) NOT NULL, hits INTEGER NOT NULL); \
             INSERT INTO counters (name, hits) VALUES ('home', 3), ('about', 1); \
             UPDATE counters SET hits = hits + 1 WHERE name = 'home'; \
             SELECT name, hits FROM counters ORDER BY hits DESC;",
        )
        .await
        .expect("Failed to run several statements");
    assert_eq!(result.rows.len(), 2);
    assert_eq!(
        result.rows[0].get_column("name").and_then(Value::as_str),
        Some("home")
    );
    assert_eq!(
        result.rows[0].get_column("hits").and_then(Value::as_i64),
        Some(4)
    );
}
