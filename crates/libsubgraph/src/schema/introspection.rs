//! Serde mirror of the standard GraphQL introspection result shape.
//!
//! Only the members needed to build a [`Schema`](crate::schema::Schema) are
//! declared; everything else in the payload (directives, `specifiedByURL`,
//! etc) is ignored during deserialization.

use crate::types::TypeAnnotation;
use serde::Deserialize;

/// The query sent to a service to discover its schema. Three levels of
/// `ofType` nesting beyond the first cover annotations as deep as
/// `[[T!]!]!`.
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      kind
      name
      description
      fields(includeDeprecated: true) {
        name
        description
        args { name description type { ...TypeRef } defaultValue }
        type { ...TypeRef }
        isDeprecated
        deprecationReason
      }
      inputFields { name description type { ...TypeRef } defaultValue }
      interfaces { ...TypeRef }
      enumValues(includeDeprecated: true) { name }
      possibleTypes { ...TypeRef }
    }
  }
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType { kind name }
      }
    }
  }
}"#;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntrospectionSchema {
    pub(crate) query_type: Option<IntrospectionNamedRef>,
    #[serde(default)]
    pub(crate) mutation_type: Option<IntrospectionNamedRef>,
    #[serde(default)]
    pub(crate) subscription_type: Option<IntrospectionNamedRef>,
    pub(crate) types: Vec<IntrospectionType>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct IntrospectionNamedRef {
    pub(crate) name: String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum IntrospectionTypeKind {
    Enum,
    InputObject,
    Interface,
    List,
    NonNull,
    Object,
    Scalar,
    Union,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntrospectionType {
    pub(crate) kind: IntrospectionTypeKind,
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    pub(crate) input_fields: Option<Vec<IntrospectionInputValue>>,
    #[serde(default)]
    pub(crate) interfaces: Option<Vec<IntrospectionTypeRef>>,
    #[serde(default)]
    pub(crate) enum_values: Option<Vec<IntrospectionNamedRef>>,
    #[serde(default)]
    pub(crate) possible_types: Option<Vec<IntrospectionTypeRef>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntrospectionField {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    pub(crate) type_: IntrospectionTypeRef,
    #[serde(default)]
    pub(crate) is_deprecated: bool,
    #[serde(default)]
    pub(crate) deprecation_reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntrospectionInputValue {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(rename = "type")]
    pub(crate) type_: IntrospectionTypeRef,
    #[serde(default)]
    pub(crate) default_value: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntrospectionTypeRef {
    pub(crate) kind: IntrospectionTypeKind,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) of_type: Option<Box<IntrospectionTypeRef>>,
}
impl IntrospectionTypeRef {
    /// Converts the `ofType` chain into a [`TypeAnnotation`]. Returns a
    /// description of the problem if the chain is malformed.
    pub(crate) fn to_type_annotation(&self) -> Result<TypeAnnotation, String> {
        self.to_type_annotation_impl(/* nullable = */ true)
    }

    fn to_type_annotation_impl(
        &self,
        nullable: bool,
    ) -> Result<TypeAnnotation, String> {
        match self.kind {
            IntrospectionTypeKind::NonNull => {
                let inner = self.of_type.as_ref().ok_or_else(
                    || "NON_NULL type reference without `ofType`".to_string(),
                )?;
                if inner.kind == IntrospectionTypeKind::NonNull {
                    return Err("NON_NULL type reference wraps another NON_NULL".to_string());
                }
                inner.to_type_annotation_impl(false)
            },

            IntrospectionTypeKind::List => {
                let inner = self.of_type.as_ref().ok_or_else(
                    || "LIST type reference without `ofType`".to_string(),
                )?;
                Ok(TypeAnnotation::list(
                    inner.to_type_annotation_impl(true)?,
                    nullable,
                ))
            },

            _ => {
                let name = self.name.as_ref().ok_or_else(
                    || format!("{:?} type reference without a `name`", self.kind),
                )?;
                Ok(TypeAnnotation::named(name, nullable))
            },
        }
    }
}
