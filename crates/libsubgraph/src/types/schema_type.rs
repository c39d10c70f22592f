use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::ArgumentDefinition;
use crate::types::FieldDefinition;
use crate::types::ScalarKind;
use crate::types::TypeKind;
use indexmap::IndexMap;

/// A named type defined by a [`Schema`].
///
/// One struct covers every [`TypeKind`]; members that don't apply to a given
/// kind are simply empty (e.g. an enum type has no
/// [`fields()`](SchemaType::fields) and an object type has no
/// [`enum_values()`](SchemaType::enum_values)).
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaType {
    pub(crate) description: Option<String>,
    pub(crate) enum_values: Vec<String>,
    pub(crate) fields: IndexMap<String, FieldDefinition>,
    pub(crate) input_fields: IndexMap<String, ArgumentDefinition>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) kind: TypeKind,
    pub(crate) name: String,
    pub(crate) possible_types: Vec<String>,
}
impl SchemaType {
    pub(crate) fn builtin_scalar(name: &str) -> Self {
        Self {
            description: None,
            enum_values: vec![],
            fields: IndexMap::new(),
            input_fields: IndexMap::new(),
            interfaces: vec![],
            kind: TypeKind::Scalar,
            name: name.to_string(),
            possible_types: vec![],
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn enum_values(&self) -> &[String] {
        self.enum_values.as_slice()
    }

    pub fn has_enum_value(&self, name: &str) -> bool {
        self.enum_values.iter().any(|value| value == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// The output fields of an object or interface type, in declaration order.
    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        &self.fields
    }

    /// The fields of an input object type, in declaration order.
    pub fn input_fields(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.input_fields
    }

    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(|name| name.as_str()).collect()
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn possible_type_names(&self) -> Vec<&str> {
        self.possible_types.iter().map(|name| name.as_str()).collect()
    }

    /// The [`ScalarKind`] of this type if it is a scalar type.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.kind {
            TypeKind::Scalar => Some(ScalarKind::from_type_name(&self.name)),
            _ => None,
        }
    }
}
impl DerefByName for SchemaType {
    type Source = Schema;

    fn deref_name<'a>(
        schema: &'a Self::Source,
        name: &str,
    ) -> Result<&'a SchemaType, DerefByNameError> {
        schema.types.get(name).ok_or_else(
            || DerefByNameError::DanglingReference(name.to_string()),
        )
    }
}

pub type NamedTypeRef = NamedRef<
    /* TSource = */ Schema,
    /* TResource = */ SchemaType,
>;
