mod compile_error;
mod query_compiler;
mod query_document;
mod selection;
mod variable_binding;

pub use compile_error::CompileError;
pub use query_compiler::QueryCompiler;
pub use query_document::QueryDocument;
pub use selection::Selection;
pub use variable_binding::VariableBinding;

pub(crate) use query_document::response_keys;
