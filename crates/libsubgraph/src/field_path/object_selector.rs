use crate::field_path::FieldPath;
use crate::field_path::FieldPathBuildError;
use crate::field_path::Selector;
use crate::schema::Schema;
use crate::synthetic::SyntheticFieldRegistry;
use crate::types::SchemaType;
use inherent::inherent;

type Result<T> = std::result::Result<T, FieldPathBuildError>;

/// The starting point of every [`FieldPath`]: an object or interface type of
/// a [`Schema`]. Obtained from [`Schema::query_root()`] or
/// [`Schema::object()`].
#[derive(Clone, Copy, Debug)]
pub struct ObjectSelector<'schema> {
    object_type: &'schema SchemaType,
    schema: &'schema Schema,
}
impl<'schema> ObjectSelector<'schema> {
    pub(crate) fn new(
        schema: &'schema Schema,
        object_type: &'schema SchemaType,
    ) -> Self {
        Self {
            object_type,
            schema,
        }
    }

    /// Select a chain of schema fields given as a dotted path, e.g.
    /// `"pairs.token0.symbol"`. Arguments can be bound afterwards with
    /// [`FieldPath::args()`] on the returned path's last step only; bind
    /// arguments on inner steps by building the path one step at a time.
    pub fn path(self, dotted_path: &str) -> Result<FieldPath<'schema>> {
        let mut path = FieldPath::new(self.schema, self.object_type);
        for name in dotted_path.split('.') {
            path = path.field(name)?;
        }
        Ok(path)
    }

    pub fn schema_type(&self) -> &'schema SchemaType {
        self.object_type
    }
}
#[inherent]
impl<'schema> Selector<'schema> for ObjectSelector<'schema> {
    pub fn field(self, name: &str) -> Result<FieldPath<'schema>> {
        FieldPath::new(self.schema, self.object_type).field(name)
    }

    pub fn synthetic(
        self,
        registry: &SyntheticFieldRegistry<'schema>,
        name: &str,
    ) -> Result<FieldPath<'schema>> {
        FieldPath::new(self.schema, self.object_type).synthetic(registry, name)
    }
}
