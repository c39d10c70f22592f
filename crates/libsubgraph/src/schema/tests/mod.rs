mod schema_cache_tests;
mod schema_tests;
