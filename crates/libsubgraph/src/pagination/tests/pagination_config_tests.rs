use crate::pagination::DEFAULT_MAX_PAGE_SIZE;
use crate::pagination::PaginationConfig;
use crate::pagination::PaginationStrategy;

#[test]
fn default_is_first_skip_offsets() {
    let config = PaginationConfig::default();
    assert_eq!(config.max_page_size, DEFAULT_MAX_PAGE_SIZE);
    assert_eq!(config.strategy_for("anything"), &PaginationStrategy::Offset {
        page_size_arg: "first".to_string(),
        offset_arg: "skip".to_string(),
    });
    assert_eq!(config.strategy_for("anything").position_arg(), "skip");
}

#[test]
fn loads_from_json_with_defaults_for_missing_members() {
    let config = PaginationConfig::from_json_str(r#"{
        "max_page_size": 1000,
        "fields": {
            "tokens": {
                "kind": "cursor",
                "page_size_arg": "first",
                "cursor_arg": "after",
                "cursor_field": "id"
            }
        }
    }"#).unwrap();

    assert_eq!(config.max_page_size, 1000);
    assert_eq!(config.default_strategy, PaginationStrategy::default());
    let tokens = config.strategy_for("tokens");
    assert_eq!(tokens.page_size_arg(), "first");
    assert_eq!(tokens.position_arg(), "after");
    assert_eq!(config.strategy_for("pairs"), &PaginationStrategy::default());
}

#[test]
fn rejects_unknown_strategy_kinds() {
    let result = PaginationConfig::from_json_str(r#"{
        "default_strategy": { "kind": "keyset" }
    }"#);
    assert!(result.is_err());
}

#[test]
fn builder_methods_override() {
    let config = PaginationConfig::default()
        .with_max_page_size(50)
        .with_strategy("swaps", PaginationStrategy::Offset {
            page_size_arg: "limit".to_string(),
            offset_arg: "offset".to_string(),
        });
    assert_eq!(config.max_page_size, 50);
    assert_eq!(config.strategy_for("swaps").page_size_arg(), "limit");
    assert_eq!(config.fields.len(), 1);
}

mod paginates {
    use super::*;
    use crate::compiler::QueryCompiler;
    use crate::compiler::QueryDocument;
    use crate::field_path::FieldPath;
    use crate::schema::Schema;
    use crate::synthetic::SyntheticFieldRegistry;
    use crate::test::fixtures::dex_schema;

    fn compile<'schema>(
        schema: &'schema Schema,
        paths: &[FieldPath<'schema>],
    ) -> Vec<QueryDocument<'schema>> {
        let registry = SyntheticFieldRegistry::new(schema);
        QueryCompiler::new(schema, &registry).compile(paths).unwrap()
    }

    fn paginated_keys<'a>(
        config: &PaginationConfig,
        document: &'a QueryDocument<'_>,
    ) -> Vec<&'a str> {
        document.selections()
            .iter()
            .filter(|selection| config.paginates(selection, document).is_some())
            .map(|selection| selection.response_key())
            .collect()
    }

    #[test]
    fn only_lists_declaring_both_strategy_arguments() {
        let schema = dex_schema();
        let paths = vec![
            schema.query_root().path("pairs.id").unwrap(),
            schema.query_root().path("swaps_2.id").unwrap(),
            schema.query_root().path("market.name").unwrap(),
            schema.object("Subscription").unwrap().path("newSwaps.id").unwrap(),
        ];
        let documents = compile(&schema, &paths);
        let config = PaginationConfig::default();

        assert_eq!(documents.len(), 2);
        assert_eq!(paginated_keys(&config, &documents[0]), vec!["pairs"]);
        assert!(paginated_keys(&config, &documents[1]).is_empty());
    }

    #[test]
    fn a_bound_page_size_of_zero_is_fetched_once() {
        let schema = dex_schema();
        let paths = vec![
            schema.query_root().field("records").unwrap()
                .args([("first", 0)]).unwrap()
                .field("id").unwrap(),
            schema.query_root().field("pairs").unwrap()
                .args([("first", 5)]).unwrap()
                .field("id").unwrap(),
        ];
        let documents = compile(&schema, &paths);

        assert_eq!(paginated_keys(&PaginationConfig::default(), &documents[0]), vec!["pairs"]);
    }

    #[test]
    fn cursor_strategies_need_the_cursor_field() {
        let schema = dex_schema();
        let documents = compile(&schema, &[schema.query_root().path("tokens.symbol").unwrap()]);
        let cursor_by = |cursor_field: &str| PaginationConfig::default()
            .with_strategy("tokens", PaginationStrategy::Cursor {
                page_size_arg: "first".to_string(),
                cursor_arg: "after".to_string(),
                cursor_field: cursor_field.to_string(),
            });

        assert_eq!(paginated_keys(&cursor_by("id"), &documents[0]), vec!["tokens"]);
        assert!(paginated_keys(&cursor_by("createdAt"), &documents[0]).is_empty());
    }
}
