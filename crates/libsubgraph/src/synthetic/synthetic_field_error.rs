use crate::schema::LookupError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntheticFieldError {
    #[error(
        "Registering `{field_name}` would create a dependency cycle: {}",
        .cycle.join(" -> ")
    )]
    CyclicSyntheticField {
        cycle: Vec<String>,
        field_name: String,
    },

    #[error(
        "The expression for `{field_name}` reads `{path}`, which is not rooted \
        at the `{owner_type_name}` type"
    )]
    ForeignDependency {
        field_name: String,
        owner_type_name: String,
        path: String,
    },

    #[error(
        "The expression for `{field_name}` reads `{path}`, which selects \
        through a list; synthetic fields can only read single values"
    )]
    ListDependency {
        field_name: String,
        path: String,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(
        "The expression for `{field_name}` reads `{path}`, which ends at the \
        `{type_name}` object type rather than a scalar or enum value"
    )]
    NonScalarDependency {
        field_name: String,
        path: String,
        type_name: String,
    },

    #[error(
        "Cannot register a synthetic field named `{field_name}` on \
        `{owner_type_name}`: the schema already defines a field with that name"
    )]
    ShadowsSchemaField {
        field_name: String,
        owner_type_name: String,
    },
}
