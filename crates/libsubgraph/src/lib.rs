pub mod compiler;
pub mod field_path;
mod named_ref;
pub mod normalize;
pub mod pagination;
pub mod resolver;
pub mod schema;
mod subgraph;
pub mod synthetic;
pub mod types;
mod value;

pub use named_ref::DerefByName;
pub use named_ref::DerefByNameError;
pub use named_ref::NamedRef;
pub use subgraph::Subgraph;
pub use subgraph::SubgraphError;
pub use value::Value;

#[cfg(test)]
mod test;
