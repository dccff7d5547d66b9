pub const CREATE_KV_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS squall_kv (
        namespace TEXT NOT NULL,
        key TEXT NOT NULL,
        value TEXT NOT NULL,
        PRIMARY KEY (namespace, key)
    )
"#;
pub const QUERY_KV_GET_SQLITE: &str = r#"
    SELECT value
    FROM squall_kv
    WHERE namespace = ? AND key = ?
"#;
pub const QUERY_KV_SET_SQLITE: &str = r#"
    INSERT INTO squall_kv (namespace, key, value)
    VALUES (?, ?, ?)
    ON CONFLICT (namespace, key)
    DO UPDATE SET value = excluded.value
"#;
pub const QUERY_KV_GET_POSTGRES: &str = r#"
    SELECT value
    FROM squall_kv
    WHERE namespace = $1 AND key = $2
"#;
pub const QUERY_KV_SET_POSTGRES: &str = r#"
    INSERT INTO squall_kv (namespace, key, value)
    VALUES ($1, $2, $3)
    ON CONFLICT (namespace, key)
    DO UPDATE SET value = EXCLUDED.value
"#;
pub const QUERY_KV_EXISTS_SQLITE: &str = r#"
    SELECT COUNT(*)
    FROM sqlite_master
    WHERE type = 'table' AND name = 'squall_kv'
"#;
pub const QUERY_KV_EXISTS_POSTGRES: &str = r#"
    SELECT COUNT(*)
    FROM information_schema.tables
    WHERE table_schema = current_schema() AND table_name = 'squall_kv'
"#;


/// Implements [`DbEngine`](crate::db::DbEngine) and
/// [`KeyValueStore`](crate::db::KeyValueStore) for an engine holding
/// `pool` and `tx: Option<Transaction>`. Statements run inside the open
/// transaction when there is one.
macro_rules! impl_sqlx_engine {
    ($engine:ty, get = $get:expr, set = $set:expr, exists = $exists:expr) => {
        #[async_trait::async_trait]
        impl $crate::db::DbEngine for $engine {
            async fn begin(&mut self) -> Result<(), $crate::db::EngineError> {
                if self.tx.is_none() {
                    self.tx = Some(self.pool.begin().await?);
                }
                Ok(())
            }

            async fn execute(&mut self, sql: &str) -> Result<(), $crate::db::EngineError> {
                let result = match self.tx.as_mut() {
                    Some(tx) => sqlx::Executor::execute(&mut **tx, sqlx::raw_sql(sql)).await,
                    None => sqlx::Executor::execute(&self.pool, sqlx::raw_sql(sql)).await,
                };

                result
                    .map(|_| ())
                    .map_err(|e| $crate::db::EngineError::statement(sql, e))
            }

            async fn commit(&mut self) -> Result<(), $crate::db::EngineError> {
                match self.tx.take() {
                    Some(tx) => Ok(tx.commit().await?),
                    None => Err($crate::db::EngineError {
                        kind: $crate::db::EngineErrorKind::TransactionNotStarted,
                    }),
                }
            }

            async fn rollback(&mut self) -> Result<(), $crate::db::EngineError> {
                if let Some(tx) = self.tx.take() {
                    tx.rollback().await?;
                }
                Ok(())
            }
        }

        #[async_trait::async_trait]
        impl $crate::db::KeyValueStore for $engine {
            async fn ensure_store(&mut self) -> Result<(), $crate::db::EngineError> {
                $crate::db::DbEngine::execute(self, $crate::db::sql_common::CREATE_KV_TABLE).await
            }

            async fn store_exists(&mut self) -> Result<bool, $crate::db::EngineError> {
                let query = sqlx::query_scalar::<_, i64>($exists);

                let count = match self.tx.as_mut() {
                    Some(tx) => query.fetch_one(&mut **tx).await?,
                    None => query.fetch_one(&self.pool).await?,
                };
                Ok(count > 0)
            }

            async fn get(
                &mut self,
                namespace: &str,
                key: &str,
            ) -> Result<Option<String>, $crate::db::EngineError> {
                let query = sqlx::query_scalar::<_, String>($get)
                    .bind(namespace)
                    .bind(key);

                let value = match self.tx.as_mut() {
                    Some(tx) => query.fetch_optional(&mut **tx).await?,
                    None => query.fetch_optional(&self.pool).await?,
                };
                Ok(value)
            }

            async fn set(
                &mut self,
                namespace: &str,
                key: &str,
                value: &str,
            ) -> Result<(), $crate::db::EngineError> {
                let query = sqlx::query($set)
                    .bind(namespace)
                    .bind(key)
                    .bind(value);

                match self.tx.as_mut() {
                    Some(tx) => query.execute(&mut **tx).await?,
                    None => query.execute(&self.pool).await?,
                };
                Ok(())
            }
        }
    };
}

pub(crate) use impl_sqlx_engine;
