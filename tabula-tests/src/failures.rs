use crate::silent_logs;
use tabula::{Precondition, QueryBuilder, Connection, values};

pub async fn failures<C: Connection>(builder: &mut QueryBuilder<C>) {
    // Statement rejected by the database is still recorded
    builder
        .reset()
        .use_table("table_that_does_not_exist")
        .use_columns(["id"]);
    let result = silent_logs! {
        builder.select("id = ?", values![1]).await
    };
    let error = result.expect_err("Selecting from a missing table must fail");
    assert!(error.is_query());
    assert_eq!(
        builder.to_sql(true),
        "SELECT id FROM table_that_does_not_exist WHERE id = ?\n-- bindings: [1]"
    );

    // Preconditions never reach the database
    builder.reset();
    let error = silent_logs! {
        builder.select("", []).await.expect_err("Select without table must fail")
    };
    assert_eq!(error.precondition(), Some(Precondition::TableNotSet));
    builder.use_table("tasks");
    let error = silent_logs! {
        builder.delete("", []).await.err().expect("Delete without condition must fail")
    };
    assert_eq!(error.precondition(), Some(Precondition::EmptyCondition));
    assert_eq!(
        builder.to_sql(false),
        "SELECT id FROM table_that_does_not_exist WHERE id = ?"
    );
}
