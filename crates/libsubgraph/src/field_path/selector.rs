use crate::field_path::FieldPath;
use crate::field_path::FieldPathBuildError;
use crate::synthetic::SyntheticFieldRegistry;

type Result<T> = std::result::Result<T, FieldPathBuildError>;

/// Anything a field can be selected from: an [`ObjectSelector`] at the start
/// of a path, or a [`FieldPath`] that ends at an object or interface type.
///
/// [`ObjectSelector`]: crate::field_path::ObjectSelector
pub trait Selector<'schema>: Sized {
    /// Select the schema field named `name`.
    fn field(self, name: &str) -> Result<FieldPath<'schema>>;

    /// Select the synthetic field `name` registered in `registry` on the
    /// current type.
    fn synthetic(
        self,
        registry: &SyntheticFieldRegistry<'schema>,
        name: &str,
    ) -> Result<FieldPath<'schema>>;
}
