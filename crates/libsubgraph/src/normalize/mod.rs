//! Flattening of nested response data into records keyed by dotted response
//! paths, for handing to tabular consumers.

mod flatten;

pub use flatten::ResultRecord;
pub use flatten::flatten;
pub use flatten::rows;

#[cfg(test)]
mod tests;
