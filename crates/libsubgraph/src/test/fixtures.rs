//! A small DEX-style subgraph schema, expressed as the introspection result a
//! service would return for it.

use crate::schema::Schema;
use serde_json::Value as JsonValue;
use serde_json::json;

fn named(kind: &str, name: &str) -> JsonValue {
    json!({ "kind": kind, "name": name, "ofType": null })
}

fn scalar(name: &str) -> JsonValue {
    named("SCALAR", name)
}

fn object_ref(name: &str) -> JsonValue {
    named("OBJECT", name)
}

fn non_null(inner: JsonValue) -> JsonValue {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

fn list(inner: JsonValue) -> JsonValue {
    json!({ "kind": "LIST", "name": null, "ofType": inner })
}

fn arg(name: &str, type_: JsonValue, default_value: Option<&str>) -> JsonValue {
    json!({
        "name": name,
        "description": null,
        "type": type_,
        "defaultValue": default_value,
    })
}

fn field(name: &str, args: Vec<JsonValue>, type_: JsonValue) -> JsonValue {
    json!({
        "name": name,
        "description": null,
        "args": args,
        "type": type_,
        "isDeprecated": false,
        "deprecationReason": null,
    })
}

fn object(name: &str, fields: Vec<JsonValue>, interfaces: Vec<&str>) -> JsonValue {
    json!({
        "kind": "OBJECT",
        "name": name,
        "description": null,
        "fields": fields,
        "inputFields": null,
        "interfaces": interfaces.into_iter()
            .map(|iface| named("INTERFACE", iface))
            .collect::<Vec<_>>(),
        "enumValues": null,
        "possibleTypes": null,
    })
}

fn enum_type(name: &str, values: &[&str]) -> JsonValue {
    json!({
        "kind": "ENUM",
        "name": name,
        "description": null,
        "fields": null,
        "inputFields": null,
        "interfaces": null,
        "enumValues": values.iter()
            .map(|value| json!({ "name": value, "isDeprecated": false }))
            .collect::<Vec<_>>(),
        "possibleTypes": null,
    })
}

fn input_object(name: &str, fields: Vec<JsonValue>) -> JsonValue {
    json!({
        "kind": "INPUT_OBJECT",
        "name": name,
        "description": null,
        "fields": null,
        "inputFields": fields,
        "interfaces": null,
        "enumValues": null,
        "possibleTypes": null,
    })
}

fn scalar_type(name: &str) -> JsonValue {
    json!({
        "kind": "SCALAR",
        "name": name,
        "description": null,
        "fields": null,
        "inputFields": null,
        "interfaces": null,
        "enumValues": null,
        "possibleTypes": null,
    })
}

fn page_args() -> Vec<JsonValue> {
    vec![
        arg("first", scalar("Int"), Some("100")),
        arg("skip", scalar("Int"), Some("0")),
    ]
}

/// The `__schema` object of the test subgraph.
///
/// `Query` exposes offset-paginated lists (`pairs`, `swaps`, `records`), a
/// cursor-paginatable list (`tokens`, via `after`), single-entity lookups
/// with required arguments, an interface (`node`), a union (`search`) and a
/// plain object (`market`). `swaps_2` is named the way the compiler names
/// the second aliased `swaps` selection. `Subscription` is declared;
/// `Mutation` is not.
pub(crate) fn dex_schema_json() -> JsonValue {
    let mut pairs_args = page_args();
    pairs_args.extend([
        arg("where", named("INPUT_OBJECT", "Pair_filter"), None),
        arg("orderBy", named("ENUM", "Pair_orderBy"), None),
        arg("orderDirection", named("ENUM", "OrderDirection"), None),
    ]);
    let mut swaps_args = page_args();
    swaps_args.push(arg("where", named("INPUT_OBJECT", "Swap_filter"), None));
    let mut records_args = page_args();
    records_args.push(arg("range", named("INPUT_OBJECT", "RangeInput"), None));
    let mut tokens_args = page_args();
    tokens_args.push(arg("after", scalar("String"), None));

    json!({
        "queryType": { "name": "Query" },
        "mutationType": null,
        "subscriptionType": { "name": "Subscription" },
        "types": [
            object("Query", vec![
                field("pairs", pairs_args, non_null(list(non_null(object_ref("Pair"))))),
                field(
                    "pair",
                    vec![arg("id", non_null(scalar("ID")), None)],
                    object_ref("Pair"),
                ),
                field("tokens", tokens_args, non_null(list(non_null(object_ref("Token"))))),
                field("swaps", swaps_args, non_null(list(non_null(object_ref("Swap"))))),
                field("swaps_2", vec![], non_null(list(non_null(object_ref("Swap"))))),
                field("records", records_args, non_null(list(non_null(object_ref("Record"))))),
                field("market", vec![], object_ref("Market")),
                field(
                    "node",
                    vec![arg("id", non_null(scalar("ID")), None)],
                    named("INTERFACE", "Node"),
                ),
                field(
                    "search",
                    vec![arg("text", non_null(scalar("String")), None)],
                    non_null(list(non_null(named("UNION", "SearchResult")))),
                ),
                field("tokenSymbols", vec![], list(scalar("String"))),
            ], vec![]),
            object("Subscription", vec![
                field(
                    "newSwaps",
                    vec![arg("first", scalar("Int"), None)],
                    non_null(list(non_null(object_ref("Swap")))),
                ),
            ], vec![]),
            object("Pair", vec![
                field("id", vec![], non_null(scalar("ID"))),
                field("token0", vec![], non_null(object_ref("Token"))),
                field("token1", vec![], non_null(object_ref("Token"))),
                field("reserve0", vec![], non_null(scalar("BigDecimal"))),
                field("reserve1", vec![], non_null(scalar("BigDecimal"))),
                field("volumeUSD", vec![], non_null(scalar("BigDecimal"))),
                field("createdAtTimestamp", vec![], non_null(scalar("BigInt"))),
                field("swaps", page_args(), non_null(list(non_null(object_ref("Swap"))))),
            ], vec!["Node"]),
            object("Token", vec![
                field("id", vec![], non_null(scalar("ID"))),
                field("symbol", vec![], non_null(scalar("String"))),
                field("name", vec![], non_null(scalar("String"))),
                field("decimals", vec![], non_null(scalar("Int"))),
                field("derivedETH", vec![], non_null(scalar("BigDecimal"))),
            ], vec!["Node"]),
            object("Swap", vec![
                field("id", vec![], non_null(scalar("ID"))),
                field("pair", vec![], non_null(object_ref("Pair"))),
                field("amountUSD", vec![], non_null(scalar("BigDecimal"))),
                field("timestamp", vec![], non_null(scalar("BigInt"))),
            ], vec![]),
            object("Record", vec![
                field("id", vec![], non_null(scalar("ID"))),
                field("a", vec![], non_null(scalar("Int"))),
                field("b", vec![], non_null(scalar("Int"))),
                field("label", vec![], scalar("String")),
                field("category", vec![], named("ENUM", "Category")),
            ], vec![]),
            object("Market", vec![
                field("name", vec![], non_null(scalar("String"))),
                field("tvl", vec![], non_null(scalar("Float"))),
            ], vec![]),
            json!({
                "kind": "INTERFACE",
                "name": "Node",
                "description": null,
                "fields": [field("id", vec![], non_null(scalar("ID")))],
                "inputFields": null,
                "interfaces": [],
                "enumValues": null,
                "possibleTypes": [object_ref("Pair"), object_ref("Token")],
            }),
            json!({
                "kind": "UNION",
                "name": "SearchResult",
                "description": null,
                "fields": null,
                "inputFields": null,
                "interfaces": null,
                "enumValues": null,
                "possibleTypes": [object_ref("Pair"), object_ref("Token")],
            }),
            input_object("Pair_filter", vec![
                arg("id", scalar("ID"), None),
                arg("id_in", list(non_null(scalar("ID"))), None),
                arg("token0", scalar("String"), None),
                arg("volumeUSD_gt", scalar("BigDecimal"), None),
                arg("volumeUSD_lt", scalar("BigDecimal"), None),
                arg("createdAtTimestamp_gte", scalar("BigInt"), None),
            ]),
            input_object("Swap_filter", vec![
                arg("pair", scalar("String"), None),
                arg("timestamp_gt", scalar("BigInt"), None),
            ]),
            input_object("RangeInput", vec![
                arg("lo", non_null(scalar("Int")), None),
                arg("hi", scalar("Int"), None),
            ]),
            enum_type("Pair_orderBy", &["id", "reserve0", "volumeUSD", "createdAtTimestamp"]),
            enum_type("OrderDirection", &["asc", "desc"]),
            enum_type("Category", &["SPOT", "PERP"]),
            scalar_type("BigDecimal"),
            scalar_type("BigInt"),
            scalar_type("ID"),
            scalar_type("Int"),
            scalar_type("Float"),
            scalar_type("String"),
            scalar_type("Boolean"),
            object("__Schema", vec![
                field("description", vec![], scalar("String")),
            ], vec![]),
        ],
    })
}

/// [`dex_schema_json()`] wrapped the way a service responds to the
/// introspection query.
pub(crate) fn dex_introspection_response() -> JsonValue {
    json!({ "data": { "__schema": dex_schema_json() } })
}

pub(crate) fn dex_schema() -> Schema {
    Schema::load(&dex_introspection_response())
        .expect("the fixture schema is valid")
}
