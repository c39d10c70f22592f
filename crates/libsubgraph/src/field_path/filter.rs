use crate::value::Value;
use indexmap::IndexMap;

/// Comparison operators supported by subgraph `where` filter inputs. Each
/// operator maps to a suffixed input-field name (e.g. `volumeUSD_gt`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterOperator {
    Eq,
    Gt,
    Gte,
    In,
    Lt,
    Lte,
    Neq,
    NotIn,
}
impl FilterOperator {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Eq => "",
            Self::Gt => "_gt",
            Self::Gte => "_gte",
            Self::In => "_in",
            Self::Lt => "_lt",
            Self::Lte => "_lte",
            Self::Neq => "_not",
            Self::NotIn => "_not_in",
        }
    }
}

/// A single `where` filter clause built from a
/// [`FieldPath`](crate::field_path::FieldPath) via
/// [`FieldPath::filter()`](crate::field_path::FieldPath::filter).
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub(crate) field_name: String,
    pub(crate) operator: FilterOperator,
    pub(crate) value: Value,
}
impl Filter {
    /// The input-field name this clause sets on the filter input object.
    pub fn argument_name(&self) -> String {
        format!("{}{}", self.field_name, self.operator.suffix())
    }

    pub fn field_name(&self) -> &str {
        self.field_name.as_str()
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Combine clauses into the input object expected by a `where` argument.
    /// A later clause for the same input field replaces an earlier one.
    pub fn to_value(filters: &[Filter]) -> Value {
        Value::Object(
            filters.iter()
                .map(|filter| (filter.argument_name(), filter.value.clone()))
                .collect::<IndexMap<_, _>>(),
        )
    }
}
