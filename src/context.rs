//! Per-request database access
//!
//! Each handler receives its own [`RequestContext`]. The context checks a
//! connection out of the pool the first time it is asked for one and hands
//! it back when the request finishes, on every exit path.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnection, SqlitePool},
    Sqlite,
};

pub struct RequestContext {
    pool: SqlitePool,
    conn: Option<PoolConnection<Sqlite>>,
}

impl RequestContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, conn: None }
    }

    /// The request's connection, acquired on first use.
    pub async fn conn(&mut self) -> Result<&mut SqliteConnection, sqlx::Error> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                let conn = self.pool.acquire().await?;
                tracing::trace!("Acquired database connection");
                conn
            }
        };

        Ok(&mut **self.conn.insert(conn))
    }

    pub fn has_connection(&self) -> bool {
        self.conn.is_some()
    }
}

impl Drop for RequestContext {
    fn drop(&mut self) {
        // The PoolConnection returns itself to the pool when the field drops
        if self.has_connection() {
            tracing::trace!("Released database connection");
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::new(SqlitePool::from_ref(state)))
    }
}
