use crate::field_path::ObjectSelector;
use crate::pagination::Transport;
use crate::schema::LookupError;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaLoadError;
use crate::schema::introspection::INTROSPECTION_QUERY;
use crate::types::FieldDefinition;
use crate::types::NamedTypeRef;
use crate::types::SchemaType;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// An immutable, in-memory model of a single service's schema, built once
/// from its introspection result.
///
/// A [`Schema`] is never mutated after construction, so it can be shared
/// freely (including across threads) by every
/// [`FieldPath`](crate::field_path::FieldPath),
/// [`QueryCompiler`](crate::compiler::QueryCompiler) and
/// [`Paginator`](crate::pagination::Paginator) that needs it.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) mutation_type: Option<NamedTypeRef>,
    pub(crate) query_type: NamedTypeRef,
    pub(crate) subscription_type: Option<NamedTypeRef>,
    pub(crate) types: IndexMap<String, SchemaType>,
}
impl Schema {
    /// Returns all types defined within this [`Schema`] (including the
    /// built-in scalars), in the order introspection reported them.
    pub fn all_types(&self) -> &IndexMap<String, SchemaType> {
        &self.types
    }

    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Look up the [`FieldDefinition`] named `field_name` on the type named
    /// `type_name`.
    pub fn field_on(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Result<&FieldDefinition, LookupError> {
        self.resolve_type(type_name)?
            .field(field_name)
            .ok_or_else(|| LookupError::UnknownField {
                field_name: field_name.to_string(),
                type_name: type_name.to_string(),
            })
    }

    /// Send the standard introspection query through `transport` and build a
    /// [`Schema`] from the result.
    pub fn introspect(transport: &dyn Transport) -> Result<Schema, SchemaLoadError> {
        log::debug!("Issuing introspection query.");
        let response = transport.execute(INTROSPECTION_QUERY, &serde_json::Map::new())?;
        Ok(Self::load(&response)?)
    }

    /// Indicates whether `type_name` names a root type that field paths may
    /// be compiled against (the Query or Subscription type).
    pub fn is_compilable_root(&self, type_name: &str) -> bool {
        self.query_type.name() == type_name
            || self.subscription_type.as_ref().is_some_and(|t| t.name() == type_name)
    }

    /// Build a [`Schema`] from a decoded introspection result. See
    /// [`SchemaBuilder::from_introspection_value()`] for accepted shapes.
    pub fn load(introspection: &JsonValue) -> Result<Schema, SchemaBuildError> {
        SchemaBuilder::from_introspection_value(introspection)?.build()
    }

    /// Build a [`Schema`] from the text of an introspection result.
    pub fn load_str(introspection: &str) -> Result<Schema, SchemaBuildError> {
        SchemaBuilder::from_introspection_str(introspection)?.build()
    }

    /// Returns this [`Schema`]'s Mutation root operation type (if one was
    /// defined).
    pub fn mutation_type(&self) -> Option<&SchemaType> {
        self.mutation_type.as_ref().and_then(|named_ref| named_ref.deref(self).ok())
    }

    /// Start a field path at the object or interface type named `type_name`.
    pub fn object(&self, type_name: &str) -> Result<ObjectSelector<'_>, LookupError> {
        let schema_type = self.resolve_type(type_name)?;
        if !schema_type.kind().is_selectable() {
            return Err(LookupError::NotAnObjectType {
                kind: schema_type.kind(),
                type_name: type_name.to_string(),
            });
        }
        Ok(ObjectSelector::new(self, schema_type))
    }

    /// Start a field path at the Query root type.
    pub fn query_root(&self) -> ObjectSelector<'_> {
        ObjectSelector::new(self, self.query_type())
    }

    /// Returns this [`Schema`]'s Query root operation type.
    ///
    /// Introspection names the Query type explicitly, so this factors in
    /// services whose root type isn't literally named `"Query"`.
    pub fn query_type(&self) -> &SchemaType {
        self.query_type.deref(self)
            .expect("type is present in schema")
    }

    /// Look up the type named `name`.
    pub fn resolve_type(&self, name: &str) -> Result<&SchemaType, LookupError> {
        self.types.get(name).ok_or_else(|| LookupError::UnknownType {
            type_name: name.to_string(),
        })
    }

    /// Returns this [`Schema`]'s Subscription root operation type (if one was
    /// defined).
    pub fn subscription_type(&self) -> Option<&SchemaType> {
        self.subscription_type.as_ref().and_then(|named_ref| named_ref.deref(self).ok())
    }
}
