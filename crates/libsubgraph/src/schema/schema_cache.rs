use crate::pagination::Transport;
use crate::pagination::TransportError;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;
use thiserror::Error;

/// A per-service store of already-built [`Schema`]s.
///
/// Nothing in this crate holds a process-wide schema registry; callers that
/// want to avoid re-introspecting a service pass a [`SchemaCache`] to
/// [`load_cached()`] explicitly.
pub trait SchemaCache: Send + Sync {
    fn get(&self, url: &str) -> Option<Arc<Schema>>;
    fn put(&self, url: &str, schema: Arc<Schema>);
}

/// A [`SchemaCache`] that keeps schemas in memory for the lifetime of the
/// cache value.
#[derive(Debug, Default)]
pub struct InMemorySchemaCache {
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
}
impl InMemorySchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.schemas.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl SchemaCache for InMemorySchemaCache {
    fn get(&self, url: &str) -> Option<Arc<Schema>> {
        // A poisoned lock only means another thread panicked mid-insert; the
        // map itself is still usable as a cache.
        let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
        schemas.get(url).cloned()
    }

    fn put(&self, url: &str, schema: Arc<Schema>) {
        let mut schemas = self.schemas.write().unwrap_or_else(|e| e.into_inner());
        schemas.insert(url.to_string(), schema);
    }
}

/// Return the cached [`Schema`] for `url`, or introspect the service through
/// `transport` and cache the result.
pub fn load_cached(
    url: &str,
    cache: &dyn SchemaCache,
    transport: &dyn Transport,
) -> Result<Arc<Schema>, SchemaLoadError> {
    if let Some(schema) = cache.get(url) {
        log::trace!("Schema cache hit for `{url}`.");
        return Ok(schema);
    }

    log::debug!("Schema cache miss for `{url}`; introspecting.");
    let schema = Arc::new(Schema::introspect(transport)?);
    cache.put(url, schema.clone());
    Ok(schema)
}

#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("Failed to build a schema from the introspection result: {0}")]
    Build(#[from] SchemaBuildError),

    #[error("The introspection request failed: {0}")]
    Transport(#[from] TransportError),
}
