use crate::pagination::JsonMap;
use crate::pagination::TransportError;
use crate::schema::INTROSPECTION_QUERY;
use crate::schema::InMemorySchemaCache;
use crate::schema::Schema;
use crate::schema::SchemaCache;
use crate::schema::SchemaLoadError;
use crate::schema::load_cached;
use crate::test::fixtures::dex_introspection_response;
use serde_json::Value as JsonValue;
use std::cell::Cell;
use std::sync::Arc;

#[test]
fn introspect_sends_the_introspection_query() {
    let transport = |document: &str, variables: &JsonMap| -> Result<JsonValue, TransportError> {
        assert_eq!(document, INTROSPECTION_QUERY);
        assert!(variables.is_empty());
        Ok(dex_introspection_response())
    };

    let schema = Schema::introspect(&transport).unwrap();
    assert_eq!(schema.query_type().name(), "Query");
}

#[test]
fn introspect_surfaces_transport_failures() {
    let transport = |_: &str, _: &JsonMap| -> Result<JsonValue, TransportError> {
        Err(TransportError::new("connection refused"))
    };

    let err = Schema::introspect(&transport).unwrap_err();
    assert!(matches!(err, SchemaLoadError::Transport(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn load_cached_introspects_each_url_once() {
    let calls = Cell::new(0);
    let transport = |_: &str, _: &JsonMap| -> Result<JsonValue, TransportError> {
        calls.set(calls.get() + 1);
        Ok(dex_introspection_response())
    };
    let cache = InMemorySchemaCache::new();
    assert!(cache.is_empty());

    let first = load_cached("https://example.test/a", &cache, &transport).unwrap();
    let second = load_cached("https://example.test/a", &cache, &transport).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);

    load_cached("https://example.test/b", &cache, &transport).unwrap();
    assert_eq!(calls.get(), 2);
    assert_eq!(cache.len(), 2);
    assert!(cache.get("https://example.test/c").is_none());
}
