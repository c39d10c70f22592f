use crate::field_path::PathStep;
use crate::named_ref::DerefByName;
use crate::schema::Schema;
use crate::synthetic::Expr;
use crate::synthetic::SyntheticField;
use crate::synthetic::SyntheticFieldError;
use crate::synthetic::SyntheticFieldRef;
use crate::synthetic::synthetic_field::qualified_name;
use crate::types::TypeKind;
use indexmap::IndexMap;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, SyntheticFieldError>;

/// The set of synthetic fields declared against one [`Schema`].
///
/// A registry is an explicit value: nothing is registered globally, and
/// different callers may hold different registries over the same schema.
/// Every [`register()`](Self::register) call validates the new field
/// (including a transitive cycle check) before it becomes visible, so a
/// registry never contains an unresolvable field.
#[derive(Clone, Debug)]
pub struct SyntheticFieldRegistry<'schema> {
    pub(crate) fields: IndexMap<String, SyntheticField<'schema>>,
    schema: &'schema Schema,
}
impl<'schema> SyntheticFieldRegistry<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            fields: IndexMap::new(),
            schema,
        }
    }

    /// The synthetic fields read directly by the expression of
    /// `synthetic_ref`.
    pub fn dependencies(
        &self,
        synthetic_ref: &SyntheticFieldRef<'schema>,
    ) -> Vec<SyntheticFieldRef<'schema>> {
        self.get(synthetic_ref)
            .map(|field| field.expr.synthetic_dependencies().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &SyntheticField<'schema>> {
        self.fields.values()
    }

    pub fn get(
        &self,
        synthetic_ref: &SyntheticFieldRef<'schema>,
    ) -> Option<&SyntheticField<'schema>> {
        synthetic_ref.deref(self).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// A reference to the synthetic field `field_name` on `owner_type_name`,
    /// if one is registered.
    pub fn lookup(
        &self,
        owner_type_name: &str,
        field_name: &str,
    ) -> Option<SyntheticFieldRef<'schema>> {
        let qualified = qualified_name(owner_type_name, field_name);
        self.fields
            .contains_key(&qualified)
            .then(|| SyntheticField::named_ref(&qualified))
    }

    /// Declare (or redefine) the synthetic field `field_name` on the object
    /// or interface type `owner_type_name`, computed by `expr`.
    ///
    /// Every [`FieldPath`](crate::field_path::FieldPath) in `expr` must be
    /// rooted at the owner type and must select a single scalar or enum
    /// value (or another synthetic field). On error the registry is left
    /// unchanged.
    pub fn register(
        &mut self,
        owner_type_name: &str,
        field_name: &str,
        expr: Expr<'schema>,
    ) -> Result<SyntheticFieldRef<'schema>> {
        let owner_type = self.schema.object(owner_type_name)?.schema_type();
        if owner_type.field(field_name).is_some() {
            return Err(SyntheticFieldError::ShadowsSchemaField {
                field_name: field_name.to_string(),
                owner_type_name: owner_type_name.to_string(),
            });
        }

        let qualified = qualified_name(owner_type_name, field_name);
        for path in expr.field_paths() {
            if path.root_type().name() != owner_type_name {
                return Err(SyntheticFieldError::ForeignDependency {
                    field_name: qualified,
                    owner_type_name: owner_type_name.to_string(),
                    path: path.to_string(),
                });
            }

            for step in path.steps() {
                if let PathStep::Field(field_step) = step
                    && field_step.field().returns_list() {
                    return Err(SyntheticFieldError::ListDependency {
                        field_name: qualified,
                        path: path.to_string(),
                    });
                }
            }

            if let Some(leaf_type) = path.leaf_type()
                && leaf_type.kind().is_selectable() {
                return Err(SyntheticFieldError::NonScalarDependency {
                    field_name: qualified,
                    path: path.to_string(),
                    type_name: leaf_type.name().to_string(),
                });
            }
        }

        if let Some(cycle) = self.find_cycle(&qualified, &expr) {
            return Err(SyntheticFieldError::CyclicSyntheticField {
                cycle,
                field_name: qualified,
            });
        }

        log::debug!("Registering synthetic field `{qualified}` = {expr}.");
        let output_kind = expr.output_kind(self);
        let replaced = self.fields.insert(qualified.to_owned(), SyntheticField {
            expr,
            name: field_name.to_string(),
            output_kind,
            owner_type_name: owner_type_name.to_string(),
        });

        // A redefinition can change what dependent fields produce.
        if replaced.is_some() {
            let kinds = self.fields.values()
                .map(|field| field.expr.output_kind(self))
                .collect::<Vec<_>>();
            for (field, kind) in self.fields.values_mut().zip(kinds) {
                field.output_kind = kind;
            }
        }

        Ok(SyntheticField::named_ref(&qualified))
    }

    pub fn schema(&self) -> &'schema Schema {
        self.schema
    }

    /// Walk the synthetic dependencies of `expr` depth-first. Returns the
    /// chain of qualified names leading back to `identity`, if any.
    fn find_cycle(&self, identity: &str, expr: &Expr<'schema>) -> Option<Vec<String>> {
        let mut chain = vec![identity.to_string()];
        let mut visited = HashSet::new();
        for dep in expr.synthetic_dependencies() {
            if self.visit_for_cycle(identity, dep.name(), &mut chain, &mut visited) {
                return Some(chain);
            }
        }
        None
    }

    fn visit_for_cycle(
        &self,
        identity: &str,
        current: &str,
        chain: &mut Vec<String>,
        visited: &mut HashSet<String>,
    ) -> bool {
        chain.push(current.to_string());
        if current == identity {
            return true;
        }

        if visited.insert(current.to_string())
            && let Some(field) = self.fields.get(current) {
            for dep in field.expr.synthetic_dependencies() {
                if self.visit_for_cycle(identity, dep.name(), chain, visited) {
                    return true;
                }
            }
        }

        chain.pop();
        false
    }
}
