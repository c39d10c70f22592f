mod evaluator;
mod resolution_plan;
mod resolve_error;
mod synthetic_field_resolver;

pub use resolution_plan::ResolutionPlan;
pub use resolve_error::ResolveError;
pub use synthetic_field_resolver::SyntheticFieldResolver;

#[cfg(test)]
mod tests;
