use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::synthetic::Expr;
use crate::synthetic::SyntheticFieldRegistry;
use crate::types::ScalarKind;

/// A field computed client-side from other fields of its owner type.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticField<'schema> {
    pub(crate) expr: Expr<'schema>,
    pub(crate) name: String,
    pub(crate) output_kind: ScalarKind,
    pub(crate) owner_type_name: String,
}
impl<'schema> SyntheticField<'schema> {
    pub fn expr(&self) -> &Expr<'schema> {
        &self.expr
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The scalar kind computed values will have.
    pub fn output_kind(&self) -> &ScalarKind {
        &self.output_kind
    }

    pub fn owner_type_name(&self) -> &str {
        self.owner_type_name.as_str()
    }

    /// `Owner.name`, the identity of this field within its registry.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.owner_type_name, &self.name)
    }
}
impl<'schema> DerefByName for SyntheticField<'schema> {
    type Source = SyntheticFieldRegistry<'schema>;

    fn deref_name<'a>(
        registry: &'a Self::Source,
        name: &str,
    ) -> Result<&'a SyntheticField<'schema>, DerefByNameError> {
        registry.fields.get(name).ok_or_else(
            || DerefByNameError::DanglingReference(name.to_string()),
        )
    }
}

/// A reference to a [`SyntheticField`] by its qualified (`Owner.name`) name.
pub type SyntheticFieldRef<'schema> =
    NamedRef<SyntheticFieldRegistry<'schema>, SyntheticField<'schema>>;

pub(crate) fn qualified_name(owner_type_name: &str, field_name: &str) -> String {
    format!("{owner_type_name}.{field_name}")
}

/// The unqualified field name of a [`SyntheticFieldRef`].
pub fn field_name_of<'a>(synthetic_ref: &'a SyntheticFieldRef<'_>) -> &'a str {
    split_qualified(synthetic_ref.name()).1
}

/// The owner type name of a [`SyntheticFieldRef`].
pub fn owner_type_name_of<'a>(synthetic_ref: &'a SyntheticFieldRef<'_>) -> &'a str {
    split_qualified(synthetic_ref.name()).0
}

fn split_qualified(qualified: &str) -> (&str, &str) {
    qualified.split_once('.').unwrap_or(("", qualified))
}
