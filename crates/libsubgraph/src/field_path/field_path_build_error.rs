use crate::schema::LookupError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FieldPathBuildError {
    #[error("Cannot bind arguments to `{path}`: synthetic fields take no arguments")]
    ArgumentsOnSyntheticField {
        path: String,
    },

    #[error(transparent)]
    ArgumentType(#[from] ArgumentTypeError),

    #[error(
        "Cannot extend `{path}` with a path rooted at `{found_type}`: `{path}` \
        ends at the `{expected_type}` type"
    )]
    ExtendTypeMismatch {
        expected_type: String,
        found_type: String,
        path: String,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("`{path}` does not end in a schema field, so it can't be used as `{usage}`")]
    NotASchemaField {
        path: String,
        usage: &'static str,
    },

    #[error(
        "Cannot select `{field_name}` below `{path}`: it ends at a leaf (scalar, \
        enum or synthetic) value"
    )]
    TerminalField {
        field_name: String,
        path: String,
    },

    #[error("The `{field_name}` field of `{path}` has no `{argument_name}` argument")]
    UnknownArgument {
        argument_name: String,
        field_name: String,
        path: String,
    },

    #[error("No synthetic field named `{field_name}` is registered on the `{type_name}` type")]
    UnknownSyntheticField {
        field_name: String,
        type_name: String,
    },

    #[error(
        "Cannot select fields of `{path}`: the `{type_name}` type is a union; \
        select a member type's fields instead"
    )]
    UnionSelection {
        path: String,
        type_name: String,
    },
}

/// An argument value could not be coerced to the argument's declared type.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Invalid value for `{location}` (expected `{expected}`): {reason}")]
pub struct ArgumentTypeError {
    pub(crate) expected: String,
    pub(crate) location: String,
    pub(crate) reason: String,
}
impl ArgumentTypeError {
    /// The declared type, in GraphQL syntax.
    pub fn expected(&self) -> &str {
        self.expected.as_str()
    }

    /// Where in the argument the mismatch was found, e.g.
    /// `pairs(where).token0_in[1]`.
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }
}
