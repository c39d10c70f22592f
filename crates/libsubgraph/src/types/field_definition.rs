use crate::types::ArgumentDefinition;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

/// Represents a defined field on an object or interface
/// [`SchemaType`](crate::types::SchemaType).
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub(crate) arguments: IndexMap<String, ArgumentDefinition>,
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) is_deprecated: bool,
    pub(crate) name: String,
    pub(crate) parent_type_name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl FieldDefinition {
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.arguments
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.is_deprecated
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The name of the object or interface type that declares this field.
    pub fn parent_type_name(&self) -> &str {
        self.parent_type_name.as_str()
    }

    /// Arguments that must be bound before this field can be selected.
    pub fn required_arguments(&self) -> impl Iterator<Item = &ArgumentDefinition> {
        self.arguments.values().filter(|arg| arg.is_required())
    }

    /// Indicates if a response value for this field arrives as a JSON array.
    pub fn returns_list(&self) -> bool {
        self.type_annotation.is_list()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
