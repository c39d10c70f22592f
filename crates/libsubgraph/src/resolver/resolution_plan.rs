use crate::resolver::ResolveError;
use crate::synthetic::SyntheticFieldRef;
use crate::synthetic::SyntheticFieldRegistry;
use indexmap::IndexMap;
use std::collections::VecDeque;

type Result<T> = std::result::Result<T, ResolveError>;

/// The order in which a set of synthetic fields (and every synthetic field
/// they transitively read) must be computed: dependencies first.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionPlan<'schema> {
    order: Vec<SyntheticFieldRef<'schema>>,
}
impl<'schema> ResolutionPlan<'schema> {
    pub fn build(
        registry: &SyntheticFieldRegistry<'schema>,
        requested: &[SyntheticFieldRef<'schema>],
    ) -> Result<Self> {
        // Transitive closure, with each node's direct (deduplicated)
        // dependencies.
        let mut deps: IndexMap<SyntheticFieldRef<'schema>, Vec<SyntheticFieldRef<'schema>>> =
            IndexMap::new();
        let mut pending: VecDeque<SyntheticFieldRef<'schema>> =
            requested.iter().cloned().collect();
        while let Some(synthetic_ref) = pending.pop_front() {
            if deps.contains_key(&synthetic_ref) {
                continue;
            }
            if registry.get(&synthetic_ref).is_none() {
                return Err(ResolveError::UnknownSyntheticField {
                    name: synthetic_ref.name().to_string(),
                });
            }
            let direct = registry.dependencies(&synthetic_ref);
            pending.extend(direct.iter().cloned());
            deps.insert(synthetic_ref, direct);
        }

        // Kahn's algorithm; ties are broken by first-seen order.
        let mut in_degree: IndexMap<&SyntheticFieldRef<'schema>, usize> = deps.iter()
            .map(|(node, node_deps)| (node, node_deps.len()))
            .collect();
        let mut ready: VecDeque<&SyntheticFieldRef<'schema>> = in_degree.iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| *node)
            .collect();
        let mut order = vec![];
        while let Some(node) = ready.pop_front() {
            order.push(node.clone());
            for (dependent, dependent_deps) in &deps {
                if dependent_deps.contains(node)
                    && let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(dependent);
                    }
                }
            }
        }

        if order.len() < deps.len() {
            let fields = deps.keys()
                .filter(|node| !order.contains(*node))
                .map(|node| node.name().to_string())
                .collect();
            return Err(ResolveError::CyclicSyntheticField { fields });
        }

        log::trace!(
            "Synthetic field resolution order: {}",
            order.iter().map(|node| node.name()).collect::<Vec<_>>().join(", "),
        );
        Ok(Self { order })
    }

    pub fn order(&self) -> &[SyntheticFieldRef<'schema>] {
        self.order.as_slice()
    }

    /// Where `synthetic_ref` falls in the order, if it is part of the plan.
    pub fn position(&self, synthetic_ref: &SyntheticFieldRef<'schema>) -> Option<usize> {
        self.order.iter().position(|node| node == synthetic_ref)
    }
}
