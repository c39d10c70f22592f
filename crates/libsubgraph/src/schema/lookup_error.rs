use crate::types::TypeKind;
use thiserror::Error;

/// Failure to find a schema element named by a caller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LookupError {
    #[error(
        "The `{type_name}` type is a {} type; only object and interface types \
        have selectable fields", kind.name()
    )]
    NotAnObjectType {
        kind: TypeKind,
        type_name: String,
    },

    #[error("No field named `{field_name}` is defined on the `{type_name}` type")]
    UnknownField {
        field_name: String,
        type_name: String,
    },

    #[error("No type named `{type_name}` is defined in the schema")]
    UnknownType {
        type_name: String,
    },
}
