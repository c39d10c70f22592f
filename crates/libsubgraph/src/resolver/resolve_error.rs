use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("Synthetic fields depend on each other cyclically: {}", .fields.join(", "))]
    CyclicSyntheticField {
        fields: Vec<String>,
    },

    /// A value a synthetic field reads is absent from the response. This
    /// points at a response that doesn't match the compiled document.
    #[error("The response has no value at `{path}`")]
    MissingField {
        path: String,
    },

    #[error("Cannot compute `{field_name}`: {reason}")]
    SyntheticFieldType {
        field_name: String,
        reason: String,
    },

    #[error("`{name}` is not registered as a synthetic field")]
    UnknownSyntheticField {
        name: String,
    },
}
