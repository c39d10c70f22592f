use crate::field_path::FieldPathBuildError;
use crate::field_path::FieldStep;
use crate::field_path::Filter;
use crate::field_path::FilterOperator;
use crate::field_path::PathStep;
use crate::field_path::Selector;
use crate::field_path::argument_coercion::coerce_value;
use crate::schema::LookupError;
use crate::schema::Schema;
use crate::synthetic::SyntheticFieldRegistry;
use crate::types::FieldDefinition;
use crate::types::SchemaType;
use crate::types::TypeKind;
use crate::value::Value;
use indexmap::IndexMap;
use inherent::inherent;
use std::hash::Hash;
use std::hash::Hasher;

type Result<T> = std::result::Result<T, FieldPathBuildError>;

/// A typed, immutable reference to a selectable field: a root type plus an
/// ordered sequence of [`PathStep`]s.
///
/// Every builder method consumes the path and returns a new one, so a path
/// can be cloned and extended in several directions without the branches
/// affecting each other:
///
/// ```ignore
/// let pairs = schema.query_root().field("pairs")?.args([("first", 10)])?;
/// let ids = pairs.clone().field("id")?;
/// let symbols = pairs.field("token0")?.field("symbol")?;
/// ```
///
/// Two paths are equal when their root types, step sequences and bound
/// arguments are structurally equal. This equality is what the
/// [`QueryCompiler`](crate::compiler::QueryCompiler) uses to merge shared
/// sub-selections.
#[derive(Clone, Debug)]
pub struct FieldPath<'schema> {
    pub(crate) root_type: &'schema SchemaType,
    pub(crate) schema: &'schema Schema,
    pub(crate) steps: Vec<PathStep<'schema>>,
}
impl<'schema> FieldPath<'schema> {
    pub(crate) fn new(
        schema: &'schema Schema,
        root_type: &'schema SchemaType,
    ) -> Self {
        Self {
            root_type,
            schema,
            steps: vec![],
        }
    }

    /// Bind arguments on the last step of this path.
    ///
    /// Arguments bound by an earlier call are kept unless re-bound here.
    /// Each value is coerced against the argument's declared type; see
    /// [`ArgumentTypeError`](crate::field_path::ArgumentTypeError).
    pub fn args<I, K, V>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let path_str = self.to_string();
        let step = match self.steps.last_mut() {
            Some(PathStep::Field(step)) => step,
            Some(PathStep::Synthetic(_)) | None =>
                return Err(FieldPathBuildError::ArgumentsOnSyntheticField {
                    path: path_str,
                }),
        };

        let field = step.field;
        let mut bound = std::mem::take(&mut step.arguments);
        for (name, value) in args {
            let name = name.as_ref();
            let arg_def = field.argument(name).ok_or_else(
                || FieldPathBuildError::UnknownArgument {
                    argument_name: name.to_string(),
                    field_name: field.name().to_string(),
                    path: path_str.to_owned(),
                },
            )?;
            let coerced = coerce_value(
                self.schema,
                arg_def.type_annotation(),
                value.into(),
                &format!("{}({name})", field.name()),
            )?;
            bound.insert(name.to_string(), coerced);
        }

        // Kept in declaration order; see `FieldStep`.
        step.arguments = field.arguments()
            .keys()
            .filter_map(|name| bound.shift_remove(name).map(|v| (name.to_string(), v)))
            .collect();

        Ok(self)
    }

    /// Append the steps of `other` to this path. `other` must be rooted at the
    /// object or interface type where this path ends.
    pub fn extend(mut self, other: FieldPath<'schema>) -> Result<Self> {
        let end_type = self.current_type(other.root_type.name())?;
        if end_type.name() != other.root_type.name() {
            return Err(FieldPathBuildError::ExtendTypeMismatch {
                expected_type: end_type.name().to_string(),
                found_type: other.root_type.name().to_string(),
                path: self.to_string(),
            });
        }
        self.steps.extend(other.steps);
        Ok(self)
    }

    /// Build a `where` filter clause comparing the last field of this path to
    /// `value`.
    pub fn filter(
        &self,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Result<Filter> {
        let field = self.leaf_field().ok_or_else(
            || FieldPathBuildError::NotASchemaField {
                path: self.to_string(),
                usage: "a filter",
            },
        )?;
        Ok(Filter {
            field_name: field.name().to_string(),
            operator,
            value: value.into(),
        })
    }

    /// Indicates whether this path ends in a synthetic field.
    pub fn is_synthetic(&self) -> bool {
        matches!(self.steps.last(), Some(PathStep::Synthetic(_)))
    }

    /// The dotted path of step names below the root type
    /// (e.g. `pairs.token0.symbol`). Response records use these as keys.
    pub fn key(&self) -> String {
        self.steps
            .iter()
            .map(|step| step.name())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn leaf(&self) -> Option<&PathStep<'schema>> {
        self.steps.last()
    }

    /// The schema field selected by the last step, if it isn't synthetic.
    pub fn leaf_field(&self) -> Option<&'schema FieldDefinition> {
        self.steps.last()
            .and_then(|step| step.as_field_step())
            .map(|step| step.field)
    }

    /// The schema type of the value this path selects, if it ends in a schema
    /// field.
    pub fn leaf_type(&self) -> Option<&'schema SchemaType> {
        self.leaf_field()
            .and_then(|field| field.type_annotation().innermost_schema_type(self.schema).ok())
    }

    /// The enum value that orders a collection by the last field of this path
    /// (for `orderBy` arguments).
    pub fn order_by(&self) -> Result<Value> {
        let field = self.leaf_field().ok_or_else(
            || FieldPathBuildError::NotASchemaField {
                path: self.to_string(),
                usage: "an `orderBy` value",
            },
        )?;
        Ok(Value::Enum(field.name().to_string()))
    }

    pub fn root_type(&self) -> &'schema SchemaType {
        self.root_type
    }

    pub fn schema(&self) -> &'schema Schema {
        self.schema
    }

    pub fn steps(&self) -> &[PathStep<'schema>] {
        self.steps.as_slice()
    }

    /// This path's steps followed by `tail`'s steps, without re-validating.
    /// Used to re-root a synthetic field's dependency (which is relative to
    /// the synthetic field's owner type) under the path that selected it.
    pub(crate) fn concat(&self, tail: &FieldPath<'schema>) -> FieldPath<'schema> {
        let mut steps = self.steps.clone();
        steps.extend(tail.steps.iter().cloned());
        FieldPath {
            root_type: self.root_type,
            schema: self.schema,
            steps,
        }
    }

    /// This path without its last step.
    pub(crate) fn parent(&self) -> FieldPath<'schema> {
        self.truncated(self.steps.len().saturating_sub(1))
    }

    /// This path cut down to its first `len` steps.
    pub(crate) fn truncated(&self, len: usize) -> FieldPath<'schema> {
        FieldPath {
            root_type: self.root_type,
            schema: self.schema,
            steps: self.steps.iter().take(len).cloned().collect(),
        }
    }

    /// The object or interface type at the end of this path, i.e. the type
    /// `next_field_name` would be selected on.
    fn current_type(&self, next_field_name: &str) -> Result<&'schema SchemaType> {
        let current_type = match self.steps.last() {
            None => self.root_type,
            Some(PathStep::Synthetic(_)) => return Err(FieldPathBuildError::TerminalField {
                field_name: next_field_name.to_string(),
                path: self.to_string(),
            }),
            Some(PathStep::Field(step)) => {
                let type_name = step.field.type_annotation().innermost_type_name();
                self.schema.resolve_type(type_name)?
            },
        };

        match current_type.kind() {
            TypeKind::Interface | TypeKind::Object => Ok(current_type),
            TypeKind::Union => Err(FieldPathBuildError::UnionSelection {
                path: self.to_string(),
                type_name: current_type.name().to_string(),
            }),
            TypeKind::Enum | TypeKind::InputObject | TypeKind::Scalar =>
                Err(FieldPathBuildError::TerminalField {
                    field_name: next_field_name.to_string(),
                    path: self.to_string(),
                }),
        }
    }
}
#[inherent]
impl<'schema> Selector<'schema> for FieldPath<'schema> {
    /// Select the schema field named `name` on the type where this path
    /// currently ends.
    pub fn field(mut self, name: &str) -> Result<Self> {
        let current_type = self.current_type(name)?;
        let field = current_type.field(name).ok_or_else(
            || LookupError::UnknownField {
                field_name: name.to_string(),
                type_name: current_type.name().to_string(),
            },
        )?;
        self.steps.push(PathStep::Field(FieldStep {
            arguments: IndexMap::new(),
            field,
        }));
        Ok(self)
    }

    /// Append a terminal step selecting the synthetic field `name` registered
    /// on the type where this path currently ends.
    pub fn synthetic(
        mut self,
        registry: &SyntheticFieldRegistry<'schema>,
        name: &str,
    ) -> Result<Self> {
        let current_type = self.current_type(name)?;
        let synthetic_ref = registry.lookup(current_type.name(), name).ok_or_else(
            || FieldPathBuildError::UnknownSyntheticField {
                field_name: name.to_string(),
                type_name: current_type.name().to_string(),
            },
        )?;
        self.steps.push(PathStep::Synthetic(synthetic_ref));
        Ok(self)
    }
}
impl PartialEq for FieldPath<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.root_type.name() == other.root_type.name() && self.steps == other.steps
    }
}
impl Eq for FieldPath<'_> {}
impl Hash for FieldPath<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root_type.name().hash(state);
        self.steps.hash(state);
    }
}
impl std::fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root_type.name())?;
        for step in &self.steps {
            write!(f, ".{step}")?;
        }
        Ok(())
    }
}
