use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::models::{Item, MAX_NAME_LEN};

/// Opens the pool described by `config`, creating the database file if needed.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Creates the items table if it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let create_table = format!(
        r#"CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND {MAX_NAME_LEN})
        )"#
    );

    sqlx::query(&create_table).execute(pool).await?;
    Ok(())
}

// Item statements take a bare connection so callers can run them inside a transaction
pub async fn insert_item(conn: &mut SqliteConnection, name: &str) -> Result<Item, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"INSERT INTO items (name) VALUES (?) RETURNING id, name"#
    )
    .bind(name)
    .fetch_one(conn)
    .await
}

pub async fn delete_item(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"DELETE FROM items WHERE id = ? RETURNING id, name"#
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn list_items(conn: &mut SqliteConnection) -> Result<Vec<Item>, sqlx::Error> {
    sqlx::query_as::<_, Item>(
        r#"SELECT id, name FROM items ORDER BY id"#
    )
    .fetch_all(conn)
    .await
}

/// Single-connection in-memory pool with the schema applied.
///
/// Every connection to `sqlite::memory:` is its own database, so the pool is
/// capped at one connection that never expires.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    use std::time::Duration;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(2))
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    init_schema(&pool).await.expect("schema");
    pool
}
