mod argument_definition;
mod field_definition;
mod list_type_annotation;
mod named_type_annotation;
mod scalar_kind;
mod schema_type;
mod type_annotation;
mod type_kind;

pub use argument_definition::ArgumentDefinition;
pub use field_definition::FieldDefinition;
pub use list_type_annotation::ListTypeAnnotation;
pub use named_type_annotation::NamedTypeAnnotation;
pub use scalar_kind::ScalarKind;
pub use schema_type::NamedTypeRef;
pub use schema_type::SchemaType;
pub use type_annotation::TypeAnnotation;
pub use type_kind::TypeKind;

#[cfg(test)]
mod tests;
