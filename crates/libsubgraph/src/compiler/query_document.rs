use crate::compiler::Selection;
use crate::compiler::VariableBinding;
use crate::field_path::FieldPath;
use crate::schema::GraphQLOperationType;
use crate::schema::Schema;
use crate::types::SchemaType;
use crate::value::Value;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;

/// A compiled query over one root type: a selection tree plus the variables
/// its arguments are bound to.
///
/// A document is immutable once compiled. The
/// [`Paginator`](crate::pagination::Paginator) derives a fresh copy with new
/// variable values for every pagination round rather than changing the
/// compiled one.
#[derive(Clone, PartialEq)]
pub struct QueryDocument<'schema> {
    pub(crate) aliases: IndexMap<FieldPath<'schema>, String>,
    pub(crate) operation: GraphQLOperationType,
    pub(crate) requested_paths: Vec<FieldPath<'schema>>,
    pub(crate) root_type: &'schema SchemaType,
    pub(crate) schema: &'schema Schema,
    pub(crate) selections: Vec<Selection<'schema>>,
    pub(crate) variables: IndexMap<String, VariableBinding>,
}
impl<'schema> QueryDocument<'schema> {
    /// Aliases assigned to selections of a field that is selected more than
    /// once with different arguments, keyed by the path (up to and including
    /// the aliased step) that produced them.
    pub fn aliases(&self) -> &IndexMap<FieldPath<'schema>, String> {
        &self.aliases
    }

    /// The value the caller bound to `arg_name` on `selection`, if any.
    pub fn bound_value(&self, selection: &Selection<'_>, arg_name: &str) -> Option<&Value> {
        selection.arguments.get(arg_name)
            .and_then(|var_name| self.variables.get(var_name))
            .map(|binding| &binding.value)
    }

    pub fn operation(&self) -> GraphQLOperationType {
        self.operation
    }

    /// The field paths (synthetic ones included) this document was compiled
    /// from, in input order.
    pub fn requested_paths(&self) -> &[FieldPath<'schema>] {
        self.requested_paths.as_slice()
    }

    /// The response keys under which the value selected by `path` will appear
    /// in this document's response, one per real (non-synthetic) step.
    pub fn response_keys(&self, path: &FieldPath<'schema>) -> Vec<String> {
        response_keys(&self.aliases, path)
    }

    pub fn root_type(&self) -> &'schema SchemaType {
        self.root_type
    }

    /// The object type whose fields `selection`'s children are drawn from.
    pub fn selected_type(&self, selection: &Selection<'_>) -> Option<&'schema SchemaType> {
        let type_name = selection.field.type_annotation().innermost_type_name();
        self.schema.resolve_type(type_name).ok()
    }

    pub fn selections(&self) -> &[Selection<'schema>] {
        self.selections.as_slice()
    }

    /// Render this document as GraphQL text. Only variables referenced by the
    /// selection tree are declared.
    pub fn to_graphql_string(&self) -> String {
        let used = self.used_variable_names();
        let mut out = self.operation.to_string();
        if !used.is_empty() {
            let declarations = self.variables.values()
                .filter(|binding| used.contains(binding.name.as_str()))
                .map(|binding| format!(
                    "${}: {}",
                    binding.name,
                    binding.type_annotation.to_graphql_string(),
                ))
                .collect::<Vec<_>>()
                .join(", ");
            out.push('(');
            out.push_str(&declarations);
            out.push(')');
        }
        out.push_str(" {\n");
        for selection in &self.selections {
            selection.write_graphql(&mut out, 1);
        }
        out.push_str("}\n");
        out
    }

    pub fn variables(&self) -> &IndexMap<String, VariableBinding> {
        &self.variables
    }

    /// The variables referenced by the selection tree, as the JSON object
    /// sent alongside the document.
    pub fn variables_json(&self) -> JsonMap<String, JsonValue> {
        let used = self.used_variable_names();
        self.variables.values()
            .filter(|binding| used.contains(binding.name.as_str()))
            .map(|binding| (binding.name.to_owned(), binding.value.to_json()))
            .collect()
    }

    /// Make the top-level selection at `index` pass `value` for `arg_name`,
    /// re-binding its variable if one exists and declaring a new one
    /// otherwise. Does nothing if the field declares no such argument.
    pub(crate) fn bind_top_level_argument(
        &mut self,
        index: usize,
        arg_name: &str,
        value: Value,
    ) {
        let Some(selection) = self.selections.get_mut(index) else {
            return;
        };
        if let Some(var_name) = selection.arguments.get(arg_name) {
            if let Some(binding) = self.variables.get_mut(var_name) {
                binding.value = value;
            }
            return;
        }
        let Some(arg_def) = selection.field.argument(arg_name) else {
            return;
        };

        let var_name = unique_variable_name(
            &format!("{}_{arg_name}", selection.response_key()),
            &self.variables,
        );
        selection.arguments.insert(arg_name.to_string(), var_name.to_owned());
        self.variables.insert(var_name.to_owned(), VariableBinding {
            name: var_name,
            type_annotation: arg_def.type_annotation().clone(),
            value,
        });
    }

    /// Make sure the top-level selection at `index` selects the leaf field
    /// `field_name` directly, adding it if needed. Returns the response key
    /// it will appear under, or `None` if the selection's type has no such
    /// field.
    pub(crate) fn ensure_top_level_child(
        &mut self,
        index: usize,
        field_name: &str,
    ) -> Option<String> {
        let schema_type = self.selection_type(index)?;
        let selection = self.selections.get_mut(index)?;
        if let Some(existing) = selection.selections.iter()
            .find(|child| child.field.name() == field_name && child.bound_values.is_empty()) {
            return Some(existing.response_key().to_string());
        }
        let field = schema_type.field(field_name)?;
        selection.selections.push(Selection::leaf(field));
        Some(field_name.to_string())
    }

    /// Remove every top-level selection for which `keep(index)` is false.
    pub(crate) fn retain_top_level(&mut self, keep: impl Fn(usize) -> bool) {
        let mut index = 0;
        self.selections.retain(|_| {
            let kept = keep(index);
            index += 1;
            kept
        });
    }

    fn selection_type(&self, index: usize) -> Option<&'schema SchemaType> {
        self.selected_type(self.selections.get(index)?)
    }

    fn used_variable_names(&self) -> IndexSet<&str> {
        fn collect<'a>(selections: &'a [Selection<'_>], used: &mut IndexSet<&'a str>) {
            for selection in selections {
                used.extend(selection.arguments.values().map(|name| name.as_str()));
                collect(&selection.selections, used);
            }
        }
        let mut used = IndexSet::new();
        collect(&self.selections, &mut used);
        used
    }
}
impl std::fmt::Debug for QueryDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryDocument")
            .field("operation", &self.operation)
            .field("root_type", &self.root_type.name())
            .field("selections", &self.selections)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}
impl std::fmt::Display for QueryDocument<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_graphql_string())
    }
}

pub(crate) fn response_keys<'schema>(
    aliases: &IndexMap<FieldPath<'schema>, String>,
    path: &FieldPath<'schema>,
) -> Vec<String> {
    path.steps()
        .iter()
        .enumerate()
        .filter_map(|(idx, step)| {
            let field_step = step.as_field_step()?;
            if aliases.is_empty() {
                return Some(field_step.field().name().to_string());
            }
            Some(
                aliases.get(&path.truncated(idx + 1))
                    .cloned()
                    .unwrap_or_else(|| field_step.field().name().to_string()),
            )
        })
        .collect()
}

pub(crate) fn unique_variable_name(
    base: &str,
    variables: &IndexMap<String, VariableBinding>,
) -> String {
    if !variables.contains_key(base) {
        return base.to_string();
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !variables.contains_key(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
