use crate::db::sql_common::{
    impl_sqlx_engine, QUERY_KV_EXISTS_SQLITE, QUERY_KV_GET_SQLITE, QUERY_KV_SET_SQLITE,
};
use crate::db::EngineError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;


pub struct SqliteEngine {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
}


impl SqliteEngine {
    /// Connect with a single connection, so `sqlite::memory:` databases
    /// stay the same database for the lifetime of the engine.
    pub async fn connect(conn_str: &str) -> Result<Self, EngineError> {
        let options = SqliteConnectOptions::from_str(conn_str)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        Ok(SqliteEngine::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        SqliteEngine { pool, tx: None }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}


impl_sqlx_engine!(
    SqliteEngine,
    get = QUERY_KV_GET_SQLITE,
    set = QUERY_KV_SET_SQLITE,
    exists = QUERY_KV_EXISTS_SQLITE
);
