use crate::db::{EngineError, KeyValueStore};


pub const PROGRESS_NAMESPACE: &str = "migrations";
pub const WATERMARK_KEY: &str = "last";
/// Watermark value meaning "nothing applied yet".
pub const NO_WATERMARK: i64 = -1;


/// Reads and writes the last-applied migration ID through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ProgressStore {
    namespace: String,
}

impl Default for ProgressStore {
    fn default() -> Self {
        ProgressStore::new(PROGRESS_NAMESPACE)
    }
}

impl ProgressStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        ProgressStore { namespace: namespace.into() }
    }

    /// Absent or unparsable values read as [`NO_WATERMARK`]. Never creates
    /// the backing table.
    pub async fn watermark<S>(&self, store: &mut S) -> Result<i64, EngineError>
    where
        S: KeyValueStore + ?Sized,
    {
        if !store.store_exists().await? {
            return Ok(NO_WATERMARK);
        }
        let value = store.get(&self.namespace, WATERMARK_KEY).await?;

        Ok(parse_watermark(value.as_deref()))
    }

    pub async fn set_watermark<S>(&self, store: &mut S, id: i64) -> Result<(), EngineError>
    where
        S: KeyValueStore + ?Sized,
    {
        store.ensure_store().await?;
        store.set(&self.namespace, WATERMARK_KEY, &id.to_string()).await
    }
}

fn parse_watermark(value: Option<&str>) -> i64 {
    match value.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(id)) => id,
        Some(Err(_)) => {
            tracing::warn!("Ignoring unparsable watermark {:?}", value);
            NO_WATERMARK
        }
        None => NO_WATERMARK,
    }
}
