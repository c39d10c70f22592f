use crate::types::TypeAnnotation;
use crate::value::Value;

/// A variable declared by a [`QueryDocument`](crate::compiler::QueryDocument)
/// together with the value it is bound to.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableBinding {
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
    pub(crate) value: Value,
}
impl VariableBinding {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The declared type of the variable (the type of the argument it is
    /// passed to).
    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}
