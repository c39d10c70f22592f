mod introspection;
mod lookup_error;
#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod schema_cache;

pub use introspection::INTROSPECTION_QUERY;
pub use lookup_error::LookupError;
pub use schema::Schema;
pub use schema_builder::GraphQLOperationType;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use schema_cache::InMemorySchemaCache;
pub use schema_cache::SchemaCache;
pub use schema_cache::SchemaLoadError;
pub use schema_cache::load_cached;

#[cfg(test)]
mod tests;
