use crate::schema::LookupError;
use crate::test::fixtures::dex_schema;
use crate::types::ScalarKind;
use crate::types::TypeKind;

#[test]
fn field_definitions_carry_arguments_in_declaration_order() {
    let schema = dex_schema();
    let pairs = schema.field_on("Query", "pairs").unwrap();

    assert_eq!(pairs.parent_type_name(), "Query");
    assert_eq!(
        pairs.arguments().keys().collect::<Vec<_>>(),
        vec!["first", "skip", "where", "orderBy", "orderDirection"],
    );
    assert_eq!(pairs.argument("first").unwrap().default_value(), Some("100"));
    assert_eq!(pairs.required_arguments().count(), 0);
    assert_eq!(pairs.type_annotation().to_graphql_string(), "[Pair!]!");
}

#[test]
fn non_null_argument_without_default_is_required() {
    let schema = dex_schema();
    let pair = schema.field_on("Query", "pair").unwrap();
    let required = pair.required_arguments().map(|arg| arg.name()).collect::<Vec<_>>();
    assert_eq!(required, vec!["id"]);
    assert!(!pair.returns_list());
}

#[test]
fn input_object_fields_are_modelled() {
    let schema = dex_schema();
    let range = schema.resolve_type("RangeInput").unwrap();
    assert_eq!(range.kind(), TypeKind::InputObject);
    assert!(range.input_fields()["lo"].is_required());
    assert!(!range.input_fields()["hi"].is_required());
    assert!(range.fields().is_empty());
}

#[test]
fn abstract_types_list_their_members() {
    let schema = dex_schema();
    let node = schema.resolve_type("Node").unwrap();
    assert_eq!(node.kind(), TypeKind::Interface);
    assert_eq!(node.possible_type_names(), vec!["Pair", "Token"]);
    assert_eq!(schema.resolve_type("Pair").unwrap().interface_names(), vec!["Node"]);

    let search_result = schema.resolve_type("SearchResult").unwrap();
    assert_eq!(search_result.kind(), TypeKind::Union);
    assert!(search_result.fields().is_empty());
}

#[test]
fn field_types_resolve_to_scalar_kinds() {
    let schema = dex_schema();
    let reserve = schema.field_on("Pair", "reserve0").unwrap();
    let reserve_type = reserve.type_annotation().innermost_schema_type(&schema).unwrap();
    assert_eq!(reserve_type.scalar_kind(), Some(ScalarKind::Custom("BigDecimal".to_string())));
}

#[test]
fn lookup_errors_name_what_was_missing() {
    let schema = dex_schema();

    assert_eq!(schema.resolve_type("Nope").unwrap_err(), LookupError::UnknownType {
        type_name: "Nope".to_string(),
    });
    assert_eq!(schema.field_on("Pair", "nope").unwrap_err(), LookupError::UnknownField {
        field_name: "nope".to_string(),
        type_name: "Pair".to_string(),
    });
    assert_eq!(schema.object("Category").unwrap_err(), LookupError::NotAnObjectType {
        kind: TypeKind::Enum,
        type_name: "Category".to_string(),
    });
    assert!(schema.object("Node").is_ok());
}
