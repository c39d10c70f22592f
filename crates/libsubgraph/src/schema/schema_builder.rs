use crate::schema::Schema;
use crate::schema::introspection::IntrospectionInputValue;
use crate::schema::introspection::IntrospectionSchema;
use crate::schema::introspection::IntrospectionType;
use crate::schema::introspection::IntrospectionTypeKind;
use crate::schema::introspection::IntrospectionTypeRef;
use crate::types::ArgumentDefinition;
use crate::types::FieldDefinition;
use crate::types::NamedTypeRef;
use crate::types::SchemaType;
use crate::types::TypeAnnotation;
use crate::types::TypeKind;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GraphQLOperationType {
    Query,
    Mutation,
    Subscription,
}
impl std::fmt::Display for GraphQLOperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

/// Utility for building a [`Schema`] from a service's introspection result.
///
/// ```ignore
/// let schema = SchemaBuilder::from_introspection_str(json_text)?.build()?;
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    mutation_type: Option<String>,
    query_type: Option<String>,
    subscription_type: Option<String>,
    types: IndexMap<String, SchemaType>,
}
impl SchemaBuilder {
    /// Validate all cross-type references and produce an immutable [`Schema`].
    pub fn build(mut self) -> Result<Schema> {
        for name in BUILTIN_SCALAR_NAMES {
            if !self.types.contains_key(name) {
                self.types.insert(
                    name.to_string(),
                    SchemaType::builtin_scalar(name),
                );
            }
        }

        let query_type_name = match self.query_type.take() {
            Some(name) => name,
            None => match self.types.get("Query") {
                Some(type_) if type_.kind() == TypeKind::Object => "Query".to_string(),
                _ => return Err(SchemaBuildError::NoQueryOperationTypeDefined),
            },
        };
        self.check_root_type(GraphQLOperationType::Query, &query_type_name)?;
        if let Some(name) = &self.mutation_type {
            self.check_root_type(GraphQLOperationType::Mutation, name)?;
        }
        if let Some(name) = &self.subscription_type {
            self.check_root_type(GraphQLOperationType::Subscription, name)?;
        }

        self.check_type_references()?;

        log::debug!(
            "Built schema with {} types (query root: `{query_type_name}`).",
            self.types.len(),
        );

        Ok(Schema {
            mutation_type: self.mutation_type.map(NamedTypeRef::new),
            query_type: NamedTypeRef::new(query_type_name),
            subscription_type: self.subscription_type.map(NamedTypeRef::new),
            types: self.types,
        })
    }

    /// Produce a [`SchemaBuilder`] from the text of an introspection result.
    /// See [`SchemaBuilder::from_introspection_value()`] for accepted shapes.
    pub fn from_introspection_str(content: &str) -> Result<Self> {
        let json: JsonValue = serde_json::from_str(content).map_err(
            |err| SchemaBuildError::MalformedIntrospection {
                reason: err.to_string(),
            },
        )?;
        Self::from_introspection_value(&json)
    }

    /// Produce a [`SchemaBuilder`] from a decoded introspection result.
    ///
    /// Accepts a full response envelope (`{"data": {"__schema": ...}}`), the
    /// bare data payload (`{"__schema": ...}`) or the `__schema` object
    /// itself.
    pub fn from_introspection_value(json: &JsonValue) -> Result<Self> {
        let payload = json.get("data").unwrap_or(json);
        let schema_json = payload.get("__schema").unwrap_or(payload);
        if !schema_json.is_object() || schema_json.get("types").is_none() {
            return Err(SchemaBuildError::MalformedIntrospection {
                reason: "payload has no `__schema.types` member".to_string(),
            });
        }

        let introspection: IntrospectionSchema =
            serde_json::from_value(schema_json.clone()).map_err(
                |err| SchemaBuildError::MalformedIntrospection {
                    reason: err.to_string(),
                },
            )?;

        let mut builder = Self::new();
        builder.query_type = introspection.query_type.map(|r| r.name);
        builder.mutation_type = introspection.mutation_type.map(|r| r.name);
        builder.subscription_type = introspection.subscription_type.map(|r| r.name);
        for introspected_type in &introspection.types {
            builder.add_introspected_type(introspected_type)?;
        }
        Ok(builder)
    }

    pub fn new() -> Self {
        Self {
            mutation_type: None,
            query_type: None,
            subscription_type: None,
            types: IndexMap::new(),
        }
    }

    fn add_introspected_type(
        &mut self,
        introspected: &IntrospectionType,
    ) -> Result<()> {
        let type_name = introspected.name.as_ref().ok_or_else(
            || SchemaBuildError::MalformedIntrospection {
                reason: format!("a {:?} type has no name", introspected.kind),
            },
        )?;

        // Introspection's own meta-types are never selectable by field paths.
        if type_name.starts_with("__") {
            return Ok(());
        }

        let kind = match introspected.kind {
            IntrospectionTypeKind::Enum => TypeKind::Enum,
            IntrospectionTypeKind::InputObject => TypeKind::InputObject,
            IntrospectionTypeKind::Interface => TypeKind::Interface,
            IntrospectionTypeKind::Object => TypeKind::Object,
            IntrospectionTypeKind::Scalar => TypeKind::Scalar,
            IntrospectionTypeKind::Union => TypeKind::Union,
            IntrospectionTypeKind::List | IntrospectionTypeKind::NonNull =>
                return Err(SchemaBuildError::MalformedIntrospection {
                    reason: format!(
                        "type `{type_name}` is declared with wrapping kind {:?}",
                        introspected.kind,
                    ),
                }),
        };

        if self.types.contains_key(type_name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: type_name.to_string(),
            });
        }

        let mut fields = IndexMap::new();
        for introspected_field in introspected.fields.iter().flatten() {
            let mut arguments = IndexMap::new();
            for arg in &introspected_field.args {
                let arg_def = Self::argument_definition(type_name, arg)?;
                if arguments.insert(arg.name.to_string(), arg_def).is_some() {
                    return Err(SchemaBuildError::DuplicateArgumentDefinition {
                        argument_name: arg.name.to_string(),
                        field_name: introspected_field.name.to_string(),
                        type_name: type_name.to_string(),
                    });
                }
            }

            let field_def = FieldDefinition {
                arguments,
                deprecation_reason: introspected_field.deprecation_reason.clone(),
                description: introspected_field.description.clone(),
                is_deprecated: introspected_field.is_deprecated,
                name: introspected_field.name.to_string(),
                parent_type_name: type_name.to_string(),
                type_annotation: Self::type_annotation(
                    type_name,
                    &introspected_field.type_,
                )?,
            };
            if fields.insert(introspected_field.name.to_string(), field_def).is_some() {
                return Err(SchemaBuildError::DuplicateFieldDefinition {
                    field_name: introspected_field.name.to_string(),
                    type_name: type_name.to_string(),
                });
            }
        }

        let mut input_fields = IndexMap::new();
        for input_field in introspected.input_fields.iter().flatten() {
            let input_def = Self::argument_definition(type_name, input_field)?;
            if input_fields.insert(input_field.name.to_string(), input_def).is_some() {
                return Err(SchemaBuildError::DuplicateFieldDefinition {
                    field_name: input_field.name.to_string(),
                    type_name: type_name.to_string(),
                });
            }
        }

        let named_refs = |refs: &Option<Vec<IntrospectionTypeRef>>| -> Vec<String> {
            refs.iter()
                .flatten()
                .filter_map(|type_ref| type_ref.name.clone())
                .collect()
        };

        self.types.insert(type_name.to_string(), SchemaType {
            description: introspected.description.clone(),
            enum_values: introspected.enum_values.iter()
                .flatten()
                .map(|value| value.name.to_string())
                .collect(),
            fields,
            input_fields,
            interfaces: named_refs(&introspected.interfaces),
            kind,
            name: type_name.to_string(),
            possible_types: named_refs(&introspected.possible_types),
        });

        Ok(())
    }

    fn argument_definition(
        type_name: &str,
        input_value: &IntrospectionInputValue,
    ) -> Result<ArgumentDefinition> {
        Ok(ArgumentDefinition {
            default_value: input_value.default_value.clone(),
            description: input_value.description.clone(),
            name: input_value.name.to_string(),
            type_annotation: Self::type_annotation(type_name, &input_value.type_)?,
        })
    }

    fn type_annotation(
        type_name: &str,
        type_ref: &IntrospectionTypeRef,
    ) -> Result<TypeAnnotation> {
        type_ref.to_type_annotation().map_err(
            |reason| SchemaBuildError::MalformedIntrospection {
                reason: format!("in type `{type_name}`: {reason}"),
            },
        )
    }

    fn check_root_type(
        &self,
        operation: GraphQLOperationType,
        type_name: &str,
    ) -> Result<()> {
        match self.types.get(type_name) {
            Some(type_) if type_.kind() == TypeKind::Object => Ok(()),
            Some(type_) => Err(SchemaBuildError::InvalidRootOperationType {
                kind: type_.kind(),
                operation,
                type_name: type_name.to_string(),
            }),
            None => Err(SchemaBuildError::UndefinedRootOperationType {
                operation,
                type_name: type_name.to_string(),
            }),
        }
    }

    fn check_type_references(&self) -> Result<()> {
        let check = |referencing_type: &str, member: &str, referenced: &str| -> Result<()> {
            if self.types.contains_key(referenced) {
                Ok(())
            } else {
                Err(SchemaBuildError::DanglingTypeReference {
                    member: member.to_string(),
                    referenced_type_name: referenced.to_string(),
                    type_name: referencing_type.to_string(),
                })
            }
        };

        for type_ in self.types.values() {
            for field in type_.fields().values() {
                check(type_.name(), field.name(), field.type_annotation().innermost_type_name())?;
                for arg in field.arguments().values() {
                    check(
                        type_.name(),
                        format!("{}({}:)", field.name(), arg.name()).as_str(),
                        arg.type_annotation().innermost_type_name(),
                    )?;
                }
            }
            for input_field in type_.input_fields().values() {
                check(
                    type_.name(),
                    input_field.name(),
                    input_field.type_annotation().innermost_type_name(),
                )?;
            }
            for iface_name in type_.interface_names() {
                check(type_.name(), "implements", iface_name)?;
            }
            for possible_type in type_.possible_type_names() {
                check(type_.name(), "possibleTypes", possible_type)?;
            }
        }

        Ok(())
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error(
        "The `{type_name}.{member}` member references a type named \
        `{referenced_type_name}` that is not defined in the schema"
    )]
    DanglingTypeReference {
        member: String,
        referenced_type_name: String,
        type_name: String,
    },

    #[error(
        "The `{type_name}.{field_name}` field declares the \
        `{argument_name}` argument more than once"
    )]
    DuplicateArgumentDefinition {
        argument_name: String,
        field_name: String,
        type_name: String,
    },

    #[error("The `{type_name}` type declares the `{field_name}` field more than once")]
    DuplicateFieldDefinition {
        field_name: String,
        type_name: String,
    },

    #[error("Multiple GraphQL types named `{type_name}` were defined")]
    DuplicateTypeDefinition {
        type_name: String,
    },

    #[error(
        "The {operation} root operation type `{type_name}` must be an object \
        type, but it is a {} type", kind.name()
    )]
    InvalidRootOperationType {
        kind: TypeKind,
        operation: GraphQLOperationType,
        type_name: String,
    },

    #[error("Malformed introspection payload: {reason}")]
    MalformedIntrospection {
        reason: String,
    },

    #[error("Attempted to build a schema that has no Query operation type defined")]
    NoQueryOperationTypeDefined,

    #[error(
        "The {operation} root operation type `{type_name}` is not defined in \
        the schema"
    )]
    UndefinedRootOperationType {
        operation: GraphQLOperationType,
        type_name: String,
    },
}
