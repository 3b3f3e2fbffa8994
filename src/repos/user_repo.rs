/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - PgPool を受け取り 参照 / 部分更新 / 削除 を提供
 * - 部分更新は partial_update で SET 句を組み立て、値は bind で渡す (文字列に埋め込まない)
 */
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

use crate::repos::error::RepoResult;
use crate::repos::partial_update::sql_for_partial_update;

/// Request field name → users column. Only fields `UpdateUserRequest` can carry.
pub const USER_COLUMNS: &[(&str, &str)] = &[("firstName", "first_name"), ("lastName", "last_name")];

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<UserRow>> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, first_name, last_name, email, is_admin
        FROM users
        ORDER BY username
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, username: &str) -> RepoResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT username, first_name, last_name, email, is_admin
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Apply only the fields present in `changes`.
///
/// An empty `changes` fails with `PartialUpdateError::NoData` before touching the db.
pub async fn update(
    db: &PgPool,
    username: &str,
    changes: &Map<String, Value>,
) -> RepoResult<Option<UserRow>> {
    let update = sql_for_partial_update(changes, USER_COLUMNS)?;
    let sql = update_statement(&update.set_cols, update.next_placeholder());

    let mut query = sqlx::query_as::<_, UserRow>(&sql);
    for value in update.values {
        query = bind_json(query, value);
    }

    let row = query.bind(username).fetch_optional(db).await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, username: &str) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn update_statement(set_cols: &str, username_idx: usize) -> String {
    format!(
        "UPDATE users SET {set_cols} WHERE username = ${username_idx} \
         RETURNING username, first_name, last_name, email, is_admin"
    )
}

// Bind a JSON value with the closest Postgres type.
fn bind_json<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    value: Value,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s),
        other => query.bind(sqlx::types::Json(other)),
    }
}
