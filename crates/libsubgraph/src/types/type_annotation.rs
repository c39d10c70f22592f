use crate::named_ref::DerefByNameError;
use crate::schema::Schema;
use crate::types::ListTypeAnnotation;
use crate::types::NamedTypeAnnotation;
use crate::types::NamedTypeRef;
use crate::types::SchemaType;

/// Represents the annotated type of a
/// [`FieldDefinition`](crate::types::FieldDefinition),
/// [`ArgumentDefinition`](crate::types::ArgumentDefinition) or a compiled
/// [`VariableBinding`](crate::compiler::VariableBinding).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}
impl TypeAnnotation {
    pub fn list(inner: TypeAnnotation, nullable: bool) -> Self {
        Self::List(ListTypeAnnotation {
            inner_type_ref: Box::new(inner),
            nullable,
        })
    }

    pub fn named(type_name: impl AsRef<str>, nullable: bool) -> Self {
        Self::Named(NamedTypeAnnotation {
            nullable,
            type_ref: NamedTypeRef::new(type_name),
        })
    }

    /// Unwrap the [`ListTypeAnnotation`] if this annotation is one.
    pub fn as_list_annotation(&self) -> Option<&ListTypeAnnotation> {
        if let Self::List(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Unwrap the [`NamedTypeAnnotation`] if this annotation is one.
    pub fn as_named_annotation(&self) -> Option<&NamedTypeAnnotation> {
        if let Self::Named(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Recursively unwrap this [`TypeAnnotation`] and return the inner-most
    /// [`NamedTypeAnnotation`] from it.
    pub fn innermost_named_type_annotation(&self) -> &NamedTypeAnnotation {
        match self {
            TypeAnnotation::List(ListTypeAnnotation { inner_type_ref, .. })
                => inner_type_ref.innermost_named_type_annotation(),
            TypeAnnotation::Named(named_annot)
                => named_annot,
        }
    }

    /// The name of the inner-most named type (e.g. `Pair` for `[Pair!]!`).
    pub fn innermost_type_name(&self) -> &str {
        self.innermost_named_type_annotation().type_name()
    }

    pub fn innermost_schema_type<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Result<&'schema SchemaType, DerefByNameError> {
        self.innermost_named_type_annotation().schema_type(schema)
    }

    /// Indicates if the outer-most layer of this annotation is a list, i.e.
    /// whether a response value for it arrives as a JSON array.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Indicates if this [`TypeAnnotation`] is [nullable or
    /// non-nullable](https://spec.graphql.org/October2021/#sec-Non-Null).
    pub fn nullable(&self) -> bool {
        match self {
            TypeAnnotation::List(ListTypeAnnotation { nullable, .. }) => *nullable,
            TypeAnnotation::Named(NamedTypeAnnotation { nullable, .. }) => *nullable,
        }
    }

    pub fn to_graphql_string(&self) -> String {
        match self {
            Self::Named(named_annot) => named_annot.to_graphql_string(),
            Self::List(list_annot) => list_annot.to_graphql_string(),
        }
    }
}
impl std::convert::From<ListTypeAnnotation> for TypeAnnotation {
    fn from(value: ListTypeAnnotation) -> Self {
        Self::List(value)
    }
}
impl std::convert::From<NamedTypeAnnotation> for TypeAnnotation {
    fn from(value: NamedTypeAnnotation) -> Self {
        Self::Named(value)
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_graphql_string())
    }
}
