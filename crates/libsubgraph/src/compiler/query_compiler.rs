use crate::compiler::CompileError;
use crate::compiler::QueryDocument;
use crate::compiler::Selection;
use crate::compiler::VariableBinding;
use crate::compiler::query_document::unique_variable_name;
use crate::field_path::FieldPath;
use crate::field_path::FieldStep;
use crate::field_path::PathStep;
use crate::schema::GraphQLOperationType;
use crate::schema::Schema;
use crate::synthetic::SyntheticFieldRegistry;
use crate::types::SchemaType;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, CompileError>;

/// Turns [`FieldPath`]s into [`QueryDocument`]s.
///
/// Paths are grouped by root type (one document per root, in first-seen
/// order). Within a document, steps with equal fields and bound arguments
/// share a single selection node, so every logical selection is sent once no
/// matter how many paths (or synthetic field expressions) reach it.
/// Synthetic fields never appear on the wire: each is replaced by the real
/// fields its expression reads.
///
/// Compilation is deterministic. Compiling the same paths in the same order
/// always yields byte-identical documents and variables.
#[derive(Clone, Copy, Debug)]
pub struct QueryCompiler<'schema, 'reg> {
    registry: &'reg SyntheticFieldRegistry<'schema>,
    schema: &'schema Schema,
}
impl<'schema, 'reg> QueryCompiler<'schema, 'reg> {
    pub fn new(
        schema: &'schema Schema,
        registry: &'reg SyntheticFieldRegistry<'schema>,
    ) -> Self {
        Self {
            registry,
            schema,
        }
    }

    pub fn compile(&self, paths: &[FieldPath<'schema>]) -> Result<Vec<QueryDocument<'schema>>> {
        let mut builders: IndexMap<&str, DocumentBuilder<'schema>> = IndexMap::new();
        for path in paths {
            let root_type = path.root_type();
            let operation = self.root_operation(root_type)?;
            let builder = builders.entry(root_type.name()).or_insert_with(|| DocumentBuilder {
                aliases: IndexMap::new(),
                operation,
                requested_paths: vec![],
                root_type,
                selections: vec![],
            });
            builder.requested_paths.push(path.clone());

            let mut real_paths = vec![];
            self.expand(path, path, &mut real_paths)?;
            for real_path in &real_paths {
                builder.insert(real_path)?;
            }
        }

        let documents = builders.into_values()
            .map(|builder| builder.build(self.schema))
            .collect::<Vec<_>>();
        for document in &documents {
            log::debug!(
                "Compiled {} document on `{}` with {} top-level selections and \
                {} variables.",
                document.operation,
                document.root_type.name(),
                document.selections.len(),
                document.variables.len(),
            );
            log::trace!("Compiled document:\n{document}");
        }
        Ok(documents)
    }

    /// Replace `path` by the real paths that must be selected to produce it.
    fn expand(
        &self,
        requested: &FieldPath<'schema>,
        path: &FieldPath<'schema>,
        out: &mut Vec<FieldPath<'schema>>,
    ) -> Result<()> {
        match path.leaf() {
            Some(PathStep::Synthetic(synthetic_ref)) => {
                let field = self.registry.get(synthetic_ref).ok_or_else(
                    || CompileError::UnknownSyntheticField {
                        name: synthetic_ref.name().to_string(),
                        path: requested.to_string(),
                    },
                )?;
                let prefix = path.parent();
                for dependency in field.expr().field_paths() {
                    self.expand(requested, &prefix.concat(dependency), out)?;
                }
                Ok(())
            },

            Some(PathStep::Field(_)) => match path.leaf_type() {
                Some(leaf_type) if leaf_type.kind().is_leaf() => {
                    out.push(path.clone());
                    Ok(())
                },
                Some(leaf_type) => {
                    let before = out.len();
                    for field in leaf_type.fields().values() {
                        let is_leaf = field.type_annotation()
                            .innermost_schema_type(self.schema)
                            .is_ok_and(|field_type| field_type.kind().is_leaf());
                        if is_leaf && field.required_arguments().next().is_none() {
                            let mut expanded = path.clone();
                            expanded.steps.push(PathStep::Field(FieldStep {
                                arguments: IndexMap::new(),
                                field,
                            }));
                            out.push(expanded);
                        }
                    }
                    if out.len() == before {
                        return Err(CompileError::EmptySelection {
                            path: requested.to_string(),
                            type_name: leaf_type.name().to_string(),
                        });
                    }
                    Ok(())
                },
                None => {
                    out.push(path.clone());
                    Ok(())
                },
            },

            None => Err(CompileError::EmptySelection {
                path: requested.to_string(),
                type_name: path.root_type().name().to_string(),
            }),
        }
    }

    fn root_operation(&self, root_type: &SchemaType) -> Result<GraphQLOperationType> {
        if self.schema.query_type().name() == root_type.name() {
            Ok(GraphQLOperationType::Query)
        } else if self.schema.subscription_type().is_some_and(|t| t.name() == root_type.name()) {
            Ok(GraphQLOperationType::Subscription)
        } else {
            Err(CompileError::UnreachableRootType {
                type_name: root_type.name().to_string(),
            })
        }
    }
}

struct DocumentBuilder<'schema> {
    aliases: IndexMap<FieldPath<'schema>, String>,
    operation: GraphQLOperationType,
    requested_paths: Vec<FieldPath<'schema>>,
    root_type: &'schema SchemaType,
    selections: Vec<Selection<'schema>>,
}
impl<'schema> DocumentBuilder<'schema> {
    fn build(mut self, schema: &'schema Schema) -> QueryDocument<'schema> {
        let mut variables = IndexMap::new();
        assign_variables(&mut self.selections, "", &mut variables);
        QueryDocument {
            aliases: self.aliases,
            operation: self.operation,
            requested_paths: self.requested_paths,
            root_type: self.root_type,
            schema,
            selections: self.selections,
            variables,
        }
    }

    /// Merge the real (synthetic-free) `path` into the selection tree.
    fn insert(&mut self, path: &FieldPath<'schema>) -> Result<()> {
        let mut level = &mut self.selections;
        for (idx, step) in path.steps().iter().enumerate() {
            let Some(field_step) = step.as_field_step() else {
                break;
            };

            if let Some(missing) = field_step.field()
                .required_arguments()
                .find(|arg| !field_step.arguments().contains_key(arg.name())) {
                return Err(CompileError::MissingRequiredArgument {
                    argument_name: missing.name().to_string(),
                    field_name: field_step.field().name().to_string(),
                    path: path.truncated(idx + 1).to_string(),
                });
            }

            let position = match level.iter().position(|sel| sel.matches(field_step)) {
                Some(position) => position,
                None => {
                    let alias = if level.iter().any(|sel| sel.field.name() == field_step.field().name()) {
                        let parent_type = path.schema()
                            .resolve_type(field_step.field().parent_type_name())?;
                        let alias = unique_alias(level, parent_type, field_step.field().name());
                        self.aliases.insert(path.truncated(idx + 1), alias.to_owned());
                        Some(alias)
                    } else {
                        None
                    };
                    level.push(Selection::new(field_step, alias));
                    level.len() - 1
                },
            };
            level = &mut level[position].selections;
        }
        Ok(())
    }
}

/// Give every bound argument in the tree its own variable, named after the
/// response-key path of its selection (`pairs_token0_first`).
fn assign_variables(
    selections: &mut [Selection<'_>],
    key_prefix: &str,
    variables: &mut IndexMap<String, VariableBinding>,
) {
    for selection in selections {
        let key_path = if key_prefix.is_empty() {
            selection.response_key().to_string()
        } else {
            format!("{key_prefix}_{}", selection.response_key())
        };

        for (arg_name, value) in &selection.bound_values {
            let Some(arg_def) = selection.field.argument(arg_name) else {
                continue;
            };
            let var_name = unique_variable_name(&format!("{key_path}_{arg_name}"), variables);
            log::trace!("Binding `{var_name}` = {value}.");
            variables.insert(var_name.to_owned(), VariableBinding {
                name: var_name.to_owned(),
                type_annotation: arg_def.type_annotation().clone(),
                value: value.clone(),
            });
            selection.arguments.insert(arg_name.to_owned(), var_name);
        }

        assign_variables(&mut selection.selections, &key_path, variables);
    }
}

/// The first `{field_name}_{n}` that is neither a sibling's response key nor
/// the name of a field declared on `parent_type`.
fn unique_alias(
    siblings: &[Selection<'_>],
    parent_type: &SchemaType,
    field_name: &str,
) -> String {
    let mut suffix = 2;
    loop {
        let candidate = format!("{field_name}_{suffix}");
        if parent_type.field(&candidate).is_none()
            && !siblings.iter().any(|sel| sel.response_key() == candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
