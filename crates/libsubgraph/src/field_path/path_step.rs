use crate::synthetic::SyntheticFieldRef;
use crate::types::FieldDefinition;
use crate::value::Value;
use indexmap::IndexMap;
use std::hash::Hash;
use std::hash::Hasher;

/// One step of a [`FieldPath`](crate::field_path::FieldPath).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathStep<'schema> {
    /// Selection of a field that exists on the remote schema.
    Field(FieldStep<'schema>),

    /// A client-side synthetic field. Always the last step of a path.
    Synthetic(SyntheticFieldRef<'schema>),
}
impl<'schema> PathStep<'schema> {
    pub fn as_field_step(&self) -> Option<&FieldStep<'schema>> {
        if let Self::Field(step) = self {
            Some(step)
        } else {
            None
        }
    }

    pub fn as_synthetic_ref(&self) -> Option<&SyntheticFieldRef<'schema>> {
        if let Self::Synthetic(synthetic_ref) = self {
            Some(synthetic_ref)
        } else {
            None
        }
    }

    /// The name this step contributes to a dotted path key.
    pub fn name(&self) -> &str {
        match self {
            Self::Field(step) => step.field.name(),
            Self::Synthetic(synthetic_ref) => crate::synthetic::field_name_of(synthetic_ref),
        }
    }
}
impl std::fmt::Display for PathStep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(step) => write!(f, "{step}"),
            Self::Synthetic(_) => write!(f, "{}", self.name()),
        }
    }
}

/// Selection of a schema field with its bound (already coerced) arguments.
///
/// Arguments are kept in the order the field declares them so that two steps
/// binding the same values compare and hash identically regardless of the
/// order in which the caller supplied them.
#[derive(Clone, Debug)]
pub struct FieldStep<'schema> {
    pub(crate) arguments: IndexMap<String, Value>,
    pub(crate) field: &'schema FieldDefinition,
}
impl<'schema> FieldStep<'schema> {
    pub fn arguments(&self) -> &IndexMap<String, Value> {
        &self.arguments
    }

    pub fn field(&self) -> &'schema FieldDefinition {
        self.field
    }
}
impl PartialEq for FieldStep<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.field.parent_type_name() == other.field.parent_type_name()
            && self.field.name() == other.field.name()
            && self.arguments.len() == other.arguments.len()
            && self.arguments.iter().zip(other.arguments.iter()).all(|(a, b)| a == b)
    }
}
impl Eq for FieldStep<'_> {}
impl Hash for FieldStep<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.parent_type_name().hash(state);
        self.field.name().hash(state);
        for (name, value) in &self.arguments {
            name.hash(state);
            value.hash(state);
        }
    }
}
impl std::fmt::Display for FieldStep<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field.name())?;
        if !self.arguments.is_empty() {
            write!(f, "(")?;
            for (idx, (name, value)) in self.arguments.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{name}: {value}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
