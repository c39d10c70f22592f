pub(crate) mod fixtures;
mod subgraph_tests;
