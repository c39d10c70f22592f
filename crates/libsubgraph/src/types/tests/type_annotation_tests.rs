use crate::test::fixtures::dex_schema;
use crate::types::TypeAnnotation;
use crate::types::TypeKind;

#[test]
fn renders_nested_annotations_in_graphql_syntax() {
    let annot = TypeAnnotation::list(
        TypeAnnotation::named("Pair", false),
        false,
    );
    assert_eq!(annot.to_graphql_string(), "[Pair!]!");

    let nullable_list = TypeAnnotation::list(
        TypeAnnotation::list(TypeAnnotation::named("Int", true), false),
        true,
    );
    assert_eq!(nullable_list.to_string(), "[[Int]!]");
}

#[test]
fn innermost_type_name_unwraps_every_list_layer() {
    let annot = TypeAnnotation::list(
        TypeAnnotation::list(TypeAnnotation::named("Token", false), true),
        false,
    );
    assert_eq!(annot.innermost_type_name(), "Token");
    assert!(annot.is_list());
    assert!(!annot.nullable());
    assert!(annot.as_named_annotation().is_none());
    assert!(annot.as_list_annotation().is_some());
}

#[test]
fn innermost_schema_type_resolves_against_schema() {
    let schema = dex_schema();
    let pairs = schema.field_on("Query", "pairs").unwrap();
    let pair_type = pairs.type_annotation().innermost_schema_type(&schema).unwrap();
    assert_eq!(pair_type.name(), "Pair");
    assert_eq!(pair_type.kind(), TypeKind::Object);
    assert!(pairs.returns_list());
}

#[test]
fn innermost_schema_type_reports_dangling_names() {
    let schema = dex_schema();
    let annot = TypeAnnotation::named("Nope", true);
    assert!(annot.innermost_schema_type(&schema).is_err());
}

#[test]
fn equality_accounts_for_nullability() {
    assert_eq!(
        TypeAnnotation::named("Int", true),
        TypeAnnotation::named("Int", true),
    );
    assert_ne!(
        TypeAnnotation::named("Int", true),
        TypeAnnotation::named("Int", false),
    );
}
