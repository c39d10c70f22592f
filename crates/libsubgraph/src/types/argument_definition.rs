use crate::types::TypeAnnotation;

/// An argument declared by a
/// [`FieldDefinition`](crate::types::FieldDefinition), or an input field
/// declared by an input object [`SchemaType`](crate::types::SchemaType).
/// Introspection describes both as an `__InputValue`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentDefinition {
    /// The default value as the raw GraphQL literal reported by
    /// introspection (e.g. `"100"` or `"asc"`).
    pub(crate) default_value: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl ArgumentDefinition {
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// An argument is required when it is non-nullable and declares no default.
    pub fn is_required(&self) -> bool {
        !self.type_annotation.nullable() && self.default_value.is_none()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
