use crate::types::SchemaType;

/// The kind of a named [`SchemaType`], as reported by the `kind` field of an
/// introspection `__Type`.
///
/// The wrapping kinds `LIST` and `NON_NULL` never name a type and are
/// represented by [`TypeAnnotation`](crate::types::TypeAnnotation) instead.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Union,
}
impl TypeKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Enum => "Enum",
            Self::InputObject => "InputObject",
            Self::Interface => "Interface",
            Self::Object => "Object",
            Self::Scalar => "Scalar",
            Self::Union => "Union",
        }
    }

    /// Object and interface types are the only kinds whose fields can be
    /// selected.
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Interface | Self::Object)
    }

    /// Scalar and enum types terminate a selection.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum | Self::Scalar)
    }
}
impl std::convert::From<&SchemaType> for TypeKind {
    fn from(value: &SchemaType) -> Self {
        value.kind()
    }
}
