use crate::compiler::QueryDocument;
use crate::compiler::response_keys;
use crate::field_path::FieldPath;
use crate::resolver::ResolutionPlan;
use crate::resolver::ResolveError;
use crate::resolver::evaluator;
use crate::synthetic::BinaryOperator;
use crate::synthetic::Expr;
use crate::synthetic::SyntheticField;
use crate::synthetic::SyntheticFieldRef;
use crate::synthetic::SyntheticFieldRegistry;
use crate::types::ScalarKind;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, ResolveError>;
type JsonMap = Map<String, JsonValue>;

/// Computes requested synthetic fields on response data and stores each
/// result on the object the synthetic field belongs to, under the synthetic
/// field's name.
///
/// Lists along a path are resolved element by element. Each object is
/// computed independently; values a synthetic field reads from other
/// synthetic fields on the same object are computed once per object.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticFieldResolver<'schema, 'reg> {
    registry: &'reg SyntheticFieldRegistry<'schema>,
}
impl<'schema, 'reg> SyntheticFieldResolver<'schema, 'reg> {
    pub fn new(registry: &'reg SyntheticFieldRegistry<'schema>) -> Self {
        Self {
            registry,
        }
    }

    /// Resolve the synthetic paths among `requested` on `data`, reading each
    /// field under its own name.
    pub fn resolve(
        &self,
        data: &mut JsonValue,
        requested: &[FieldPath<'schema>],
    ) -> Result<()> {
        self.resolve_with_aliases(data, requested, &IndexMap::new())
    }

    /// Resolve every synthetic path `document` was compiled from on the
    /// `data` fetched for it, honoring the aliases the compiler assigned.
    pub fn resolve_document(
        &self,
        data: &mut JsonValue,
        document: &QueryDocument<'schema>,
    ) -> Result<()> {
        self.resolve_with_aliases(data, document.requested_paths(), document.aliases())
    }

    fn resolve_with_aliases(
        &self,
        data: &mut JsonValue,
        requested: &[FieldPath<'schema>],
        aliases: &IndexMap<FieldPath<'schema>, String>,
    ) -> Result<()> {
        let mut groups: IndexMap<FieldPath<'schema>, Vec<SyntheticFieldRef<'schema>>> =
            IndexMap::new();
        for path in requested {
            if let Some(synthetic_ref) = path.leaf().and_then(|step| step.as_synthetic_ref()) {
                let refs = groups.entry(path.parent()).or_default();
                if !refs.contains(synthetic_ref) {
                    refs.push(synthetic_ref.clone());
                }
            }
        }
        if groups.is_empty() {
            return Ok(());
        }

        let all_refs = groups.values().flatten().cloned().collect::<Vec<_>>();
        let plan = ResolutionPlan::build(self.registry, &all_refs)?;
        let position = |synthetic_ref: &SyntheticFieldRef<'schema>| {
            plan.position(synthetic_ref).unwrap_or(usize::MAX)
        };
        for refs in groups.values_mut() {
            refs.sort_by_key(|synthetic_ref| position(synthetic_ref));
        }
        groups.sort_by(|_, a, _, b| {
            let first_position = |refs: &Vec<SyntheticFieldRef<'schema>>| {
                refs.first().map(position).unwrap_or(usize::MAX)
            };
            first_position(a).cmp(&first_position(b))
        });

        for (prefix, refs) in &groups {
            let keys = response_keys(aliases, prefix);
            let mut targets = vec![];
            collect_objects(data, &keys, 0, &mut targets)?;
            log::trace!(
                "Resolving {} synthetic fields on {} objects at `{prefix}`.",
                refs.len(),
                targets.len(),
            );

            for object in targets {
                let mut cache = HashMap::new();
                for synthetic_ref in refs {
                    let ctx = EvalContext {
                        aliases,
                        base: prefix,
                        cache_prefix: "",
                    };
                    let value = self.compute(synthetic_ref, object, &ctx, &mut cache)?;
                    object.insert(crate::synthetic::field_name_of(synthetic_ref).to_string(), value);
                }
            }
        }
        Ok(())
    }

    fn compute(
        &self,
        synthetic_ref: &SyntheticFieldRef<'schema>,
        object: &JsonMap,
        ctx: &EvalContext<'_, 'schema>,
        cache: &mut HashMap<String, JsonValue>,
    ) -> Result<JsonValue> {
        let cache_key = format!("{}{}", ctx.cache_prefix, synthetic_ref.name());
        if let Some(value) = cache.get(&cache_key) {
            return Ok(value.clone());
        }

        let field = self.registry.get(synthetic_ref).ok_or_else(
            || ResolveError::UnknownSyntheticField {
                name: synthetic_ref.name().to_string(),
            },
        )?;
        let value = self.eval(field, field.expr(), object, ctx, cache)?;
        cache.insert(cache_key, value.clone());
        Ok(value)
    }

    fn eval(
        &self,
        field: &SyntheticField<'schema>,
        expr: &Expr<'schema>,
        object: &JsonMap,
        ctx: &EvalContext<'_, 'schema>,
        cache: &mut HashMap<String, JsonValue>,
    ) -> Result<JsonValue> {
        let type_error = |reason: String| ResolveError::SyntheticFieldType {
            field_name: field.qualified_name(),
            reason,
        };

        match expr {
            Expr::Literal(value) => Ok(value.to_json()),

            Expr::Path(path) => {
                let full_path = ctx.base.concat(path);
                let keys = response_keys(ctx.aliases, &full_path);
                let relative_keys = &keys[ctx.base.steps().len()..];

                match path.leaf().and_then(|step| step.as_synthetic_ref()) {
                    None => match lookup(object, relative_keys) {
                        Lookup::Found(value) => Ok(value.clone()),
                        Lookup::Null => Ok(JsonValue::Null),
                        Lookup::Missing => Err(ResolveError::MissingField {
                            path: full_path.to_string(),
                        }),
                    },

                    Some(synthetic_ref) => {
                        let nested_base = full_path.parent();
                        let nested_prefix = format!("{}{}.", ctx.cache_prefix, relative_keys.join("."));
                        let nested_ctx = EvalContext {
                            aliases: ctx.aliases,
                            base: &nested_base,
                            cache_prefix: nested_prefix.as_str(),
                        };
                        if relative_keys.is_empty() {
                            return self.compute(synthetic_ref, object, &nested_ctx, cache);
                        }
                        match lookup(object, relative_keys) {
                            Lookup::Found(JsonValue::Object(nested)) =>
                                self.compute(synthetic_ref, nested, &nested_ctx, cache),
                            Lookup::Found(JsonValue::Null) | Lookup::Null => Ok(JsonValue::Null),
                            Lookup::Found(_) | Lookup::Missing => Err(ResolveError::MissingField {
                                path: full_path.parent().to_string(),
                            }),
                        }
                    },
                }
            },

            Expr::Unary { op, operand } => {
                let operand = self.eval(field, operand, object, ctx, cache)?;
                evaluator::apply_unary(*op, operand).map_err(type_error)
            },

            Expr::Binary { lhs, op, rhs } => {
                let concat_strings = *op == BinaryOperator::Add
                    && lhs.output_kind(self.registry) == ScalarKind::String
                    && rhs.output_kind(self.registry) == ScalarKind::String;
                let lhs = self.eval(field, lhs, object, ctx, cache)?;
                let rhs = self.eval(field, rhs, object, ctx, cache)?;
                evaluator::apply_binary(*op, lhs, rhs, concat_strings).map_err(type_error)
            },

            Expr::Cast { operand, target } => {
                let operand = self.eval(field, operand, object, ctx, cache)?;
                evaluator::apply_cast(target, operand).map_err(type_error)
            },
        }
    }
}

/// Where the object being evaluated sits in the response.
struct EvalContext<'a, 'schema> {
    aliases: &'a IndexMap<FieldPath<'schema>, String>,
    base: &'a FieldPath<'schema>,
    cache_prefix: &'a str,
}

enum Lookup<'v> {
    Found(&'v JsonValue),
    Missing,
    Null,
}

fn lookup<'v>(object: &'v JsonMap, keys: &[String]) -> Lookup<'v> {
    let Some((first, rest)) = keys.split_first() else {
        return Lookup::Missing;
    };
    let Some(mut current) = object.get(first) else {
        return Lookup::Missing;
    };
    for key in rest {
        current = match current {
            JsonValue::Null => return Lookup::Null,
            JsonValue::Object(map) => match map.get(key) {
                Some(value) => value,
                None => return Lookup::Missing,
            },
            _ => return Lookup::Missing,
        };
    }
    Lookup::Found(current)
}

/// Collect every object reached by following `keys` from `value`, stepping
/// into list elements along the way. Nulls end a branch.
fn collect_objects<'v>(
    value: &'v mut JsonValue,
    keys: &[String],
    depth: usize,
    out: &mut Vec<&'v mut JsonMap>,
) -> Result<()> {
    match value {
        JsonValue::Null => Ok(()),
        JsonValue::Array(items) => {
            for item in items {
                collect_objects(item, keys, depth, out)?;
            }
            Ok(())
        },
        JsonValue::Object(map) => match keys.get(depth) {
            None => {
                out.push(map);
                Ok(())
            },
            Some(key) => match map.get_mut(key) {
                Some(child) => collect_objects(child, keys, depth + 1, out),
                None => Err(ResolveError::MissingField {
                    path: keys[..=depth].join("."),
                }),
            },
        },
        _ => Err(ResolveError::MissingField {
            path: keys[..depth].join("."),
        }),
    }
}
