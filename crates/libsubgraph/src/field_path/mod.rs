mod argument_coercion;
#[allow(clippy::module_inception)]
mod field_path;
mod field_path_build_error;
mod filter;
mod object_selector;
mod path_step;
mod selector;

pub use field_path::FieldPath;
pub use field_path_build_error::ArgumentTypeError;
pub use field_path_build_error::FieldPathBuildError;
pub use filter::Filter;
pub use filter::FilterOperator;
pub use object_selector::ObjectSelector;
pub use path_step::FieldStep;
pub use path_step::PathStep;
pub use selector::Selector;
