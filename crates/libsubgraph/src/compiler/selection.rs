use crate::field_path::FieldStep;
use crate::types::FieldDefinition;
use crate::value::Value;
use indexmap::IndexMap;

/// One node of a compiled selection tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection<'schema> {
    pub(crate) alias: Option<String>,
    pub(crate) arguments: IndexMap<String, String>,
    pub(crate) bound_values: IndexMap<String, Value>,
    pub(crate) field: &'schema FieldDefinition,
    pub(crate) selections: Vec<Selection<'schema>>,
}
impl<'schema> Selection<'schema> {
    pub(crate) fn new(step: &FieldStep<'schema>, alias: Option<String>) -> Self {
        Self {
            alias,
            arguments: IndexMap::new(),
            bound_values: step.arguments().clone(),
            field: step.field(),
            selections: vec![],
        }
    }

    pub(crate) fn leaf(field: &'schema FieldDefinition) -> Self {
        Self {
            alias: None,
            arguments: IndexMap::new(),
            bound_values: IndexMap::new(),
            field,
            selections: vec![],
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Argument name to the name of the variable passed for it.
    pub fn arguments(&self) -> &IndexMap<String, String> {
        &self.arguments
    }

    pub fn field(&self) -> &'schema FieldDefinition {
        self.field
    }

    pub fn is_leaf(&self) -> bool {
        self.selections.is_empty()
    }

    /// Whether `step` selects exactly this node (same field, same bound
    /// arguments).
    pub(crate) fn matches(&self, step: &FieldStep<'_>) -> bool {
        self.field.name() == step.field().name()
            && self.bound_values.len() == step.arguments().len()
            && self.bound_values.iter().zip(step.arguments().iter()).all(|(a, b)| a == b)
    }

    /// The key this selection's value appears under in a response: the alias
    /// if one was assigned, otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.field.name())
    }

    pub fn selections(&self) -> &[Selection<'schema>] {
        self.selections.as_slice()
    }

    pub(crate) fn write_graphql(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push_str(": ");
        }
        out.push_str(self.field.name());
        if !self.arguments.is_empty() {
            let args = self.arguments.iter()
                .map(|(arg_name, var_name)| format!("{arg_name}: ${var_name}"))
                .collect::<Vec<_>>()
                .join(", ");
            out.push('(');
            out.push_str(&args);
            out.push(')');
        }
        if self.selections.is_empty() {
            out.push('\n');
            return;
        }
        out.push_str(" {\n");
        for child in &self.selections {
            child.write_graphql(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }
}
