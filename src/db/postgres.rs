use crate::db::sql_common::{
    impl_sqlx_engine, QUERY_KV_EXISTS_POSTGRES, QUERY_KV_GET_POSTGRES, QUERY_KV_SET_POSTGRES,
};
use crate::db::EngineError;

use sqlx::{PgPool, Postgres, Transaction};


pub struct PostgresEngine {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}


impl PostgresEngine {
    pub async fn connect(conn_str: &str) -> Result<Self, EngineError> {
        let pool = PgPool::connect(conn_str).await?;

        Ok(PostgresEngine { pool, tx: None })
    }
}


impl_sqlx_engine!(
    PostgresEngine,
    get = QUERY_KV_GET_POSTGRES,
    set = QUERY_KV_SET_POSTGRES,
    exists = QUERY_KV_EXISTS_POSTGRES
);
