use crate::Subgraph;
use crate::SubgraphError;
use crate::pagination::JsonMap;
use crate::pagination::PaginationConfig;
use crate::pagination::PaginationStrategy;
use crate::pagination::TransportError;
use crate::synthetic::add;
use crate::test::fixtures::dex_schema;
use serde_json::Value as JsonValue;
use serde_json::json;

/// A service holding five records, paged by `records_first`/`records_skip`.
fn records_service(_document: &str, variables: &JsonMap) -> Result<JsonValue, TransportError> {
    let first = variables.get("records_first").and_then(JsonValue::as_u64).unwrap_or(100);
    let skip = variables.get("records_skip").and_then(JsonValue::as_u64).unwrap_or(0);
    let end = (skip + first).min(5);
    let records = (skip.min(end)..end)
        .map(|idx| json!({ "id": format!("r{idx}"), "a": idx, "b": 10 }))
        .collect::<Vec<_>>();
    Ok(json!({ "records": records }))
}

/// Serves `records` like [`records_service`], and fails every subscription.
fn query_only_service(document: &str, variables: &JsonMap) -> Result<JsonValue, TransportError> {
    if document.starts_with("subscription") {
        return Err(TransportError::new("subscriptions are not supported"));
    }
    records_service(document, variables)
}

/// Three tokens, paged by `tokens_first` and the `tokens_after` cursor.
fn tokens_service(_document: &str, variables: &JsonMap) -> Result<JsonValue, TransportError> {
    let first = variables.get("tokens_first").and_then(JsonValue::as_u64).unwrap_or(100) as usize;
    let start = match variables.get("tokens_after").and_then(JsonValue::as_str) {
        Some(after) => after.trim_start_matches('t').parse::<usize>().unwrap() + 1,
        None => 0,
    };
    let tokens = (start..(start + first).min(3))
        .map(|idx| json!({ "id": format!("t{idx}"), "symbol": format!("TK{idx}") }))
        .collect::<Vec<_>>();
    Ok(json!({ "tokens": tokens }))
}

fn failing_service(_document: &str, _variables: &JsonMap) -> Result<JsonValue, TransportError> {
    Err(TransportError::new("connection refused"))
}

#[test]
fn fetch_rows_pages_resolves_and_flattens() -> Result<(), SubgraphError> {
    let schema = dex_schema();
    let mut subgraph = Subgraph::new(&schema)
        .with_pagination_config(PaginationConfig::default().with_max_page_size(2));
    let record = subgraph.object("Record").unwrap();
    subgraph.register_synthetic(
        "Record",
        "total",
        add(record.path("a").unwrap(), record.path("b").unwrap()),
    ).unwrap();

    let records = subgraph.query_root().field("records").unwrap();
    let paths = vec![
        records.clone().field("id").unwrap(),
        records.synthetic(subgraph.registry(), "total").unwrap(),
    ];
    let rows = subgraph.fetch_rows(&paths, &records_service)?;

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["records.id"], json!("r0"));
    assert_eq!(rows[0]["records.total"], json!(10.0));
    assert_eq!(rows[4]["records.id"], json!("r4"));
    assert_eq!(rows[4]["records.total"], json!(14.0));
    Ok(())
}

#[test]
fn fetch_data_keeps_the_nested_shape() -> Result<(), SubgraphError> {
    let schema = dex_schema();
    let subgraph = Subgraph::new(&schema);
    let path = subgraph.query_root().path("records.id").unwrap();

    let data = subgraph.fetch_data(&[path], &records_service)?;
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["records"].as_array().unwrap().len(), 5);
    assert_eq!(subgraph.paginator().config().max_page_size, 900);
    Ok(())
}

#[test]
fn rows_hold_only_the_requested_fields() -> Result<(), SubgraphError> {
    let schema = dex_schema();
    let mut subgraph = Subgraph::new(&schema);
    let record = subgraph.object("Record").unwrap();
    subgraph.register_synthetic(
        "Record",
        "total",
        add(record.path("a").unwrap(), record.path("b").unwrap()),
    ).unwrap();

    let records = subgraph.query_root().field("records").unwrap();
    let paths = vec![
        records.clone().field("id").unwrap(),
        records.synthetic(subgraph.registry(), "total").unwrap(),
    ];
    let rows = subgraph.fetch_rows(&paths, &records_service)?;

    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["records.id", "records.total"]);
    }
    let data = subgraph.fetch_data(&paths, &records_service)?;
    assert_eq!(data[0]["records"][0], json!({ "id": "r0", "total": 10.0 }));
    Ok(())
}

#[test]
fn cursor_fields_added_for_pagination_are_dropped() -> Result<(), SubgraphError> {
    let schema = dex_schema();
    let config = PaginationConfig::default()
        .with_max_page_size(2)
        .with_strategy("tokens", PaginationStrategy::Cursor {
            page_size_arg: "first".to_string(),
            cursor_arg: "after".to_string(),
            cursor_field: "id".to_string(),
        });
    let subgraph = Subgraph::new(&schema).with_pagination_config(config);
    let path = subgraph.query_root().path("tokens.symbol").unwrap();

    let rows = subgraph.fetch_rows(&[path], &tokens_service)?;

    let symbols = rows.iter().map(|row| row["tokens.symbol"].clone()).collect::<Vec<_>>();
    assert_eq!(symbols, vec![json!("TK0"), json!("TK1"), json!("TK2")]);
    assert!(rows.iter().all(|row| row.len() == 1), "{rows:?}");
    Ok(())
}

#[test]
fn a_failing_document_keeps_the_data_of_the_others() {
    let schema = dex_schema();
    let subgraph = Subgraph::new(&schema);
    let paths = vec![
        subgraph.query_root().path("records.id").unwrap(),
        subgraph.object("Subscription").unwrap().path("newSwaps.id").unwrap(),
    ];

    let (data, failures) = match subgraph.fetch_data(&paths, &query_only_service) {
        Err(SubgraphError::PartialFetch { data, failures }) => (data, failures),
        other => panic!("expected a partial fetch, got {other:?}"),
    };
    assert_eq!(data.len(), 2);
    let records = data[0].as_ref().unwrap()["records"].as_array().unwrap();
    let ids = records.iter().map(|record| record["id"].as_str().unwrap()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["r0", "r1", "r2", "r3", "r4"]);
    assert!(data[1].is_none());
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], SubgraphError::Pagination(_)), "{:?}", failures[0]);
}

#[test]
fn transport_failures_surface_as_pagination_errors() {
    let schema = dex_schema();
    let subgraph = Subgraph::new(&schema);
    let path = subgraph.query_root().path("records.id").unwrap();

    let err = subgraph.fetch_rows(&[path], &failing_service).unwrap_err();
    assert!(matches!(err, SubgraphError::Pagination(_)), "{err:?}");
}

#[test]
fn compile_errors_are_reported_before_fetching() {
    let schema = dex_schema();
    let subgraph = Subgraph::new(&schema);
    // `pair` requires an `id` argument.
    let path = subgraph.query_root().path("pair.id").unwrap();
    let err = subgraph.fetch_data(&[path], &failing_service).unwrap_err();
    assert!(matches!(err, SubgraphError::Compile(_)), "{err:?}");
}
