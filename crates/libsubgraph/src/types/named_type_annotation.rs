use crate::named_ref::DerefByNameError;
use crate::schema::Schema;
use crate::types::NamedTypeRef;
use crate::types::SchemaType;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NamedTypeAnnotation {
    pub(crate) nullable: bool,
    pub(crate) type_ref: NamedTypeRef,
}
impl NamedTypeAnnotation {
    /// Resolve the referenced [`SchemaType`].
    ///
    /// The [`SchemaBuilder`](crate::schema::SchemaBuilder) rejects dangling
    /// type references, so this only fails when an annotation is dereferenced
    /// against a different [`Schema`] than the one that produced it.
    pub fn schema_type<'schema>(
        &self,
        schema: &'schema Schema,
    ) -> Result<&'schema SchemaType, DerefByNameError> {
        self.type_ref.deref(schema)
    }

    pub fn type_name(&self) -> &str {
        self.type_ref.name()
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn to_graphql_string(&self) -> String {
        format!(
            "{}{}",
            self.type_ref.name(),
            if self.nullable { "" } else { "!" },
        )
    }
}
