use crate::schema::LookupError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CompileError {
    #[error(
        "`{path}` selects `{type_name}`, which has no scalar or enum fields \
        that can be selected without arguments"
    )]
    EmptySelection {
        path: String,
        type_name: String,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(
        "`{path}` does not bind the `{argument_name}` argument, which the \
        `{field_name}` field requires"
    )]
    MissingRequiredArgument {
        argument_name: String,
        field_name: String,
        path: String,
    },

    #[error("`{path}` reads the synthetic field `{name}`, which isn't registered")]
    UnknownSyntheticField {
        name: String,
        path: String,
    },

    #[error(
        "Field paths rooted at `{type_name}` cannot be compiled: only the \
        schema's query and subscription types are reachable roots"
    )]
    UnreachableRootType {
        type_name: String,
    },
}
