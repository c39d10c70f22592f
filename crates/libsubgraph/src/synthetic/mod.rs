mod expr;
mod synthetic_field;
mod synthetic_field_error;
mod synthetic_field_registry;

pub use expr::BinaryOperator;
pub use expr::Expr;
pub use expr::UnaryOperator;
pub use expr::abs;
pub use expr::add;
pub use expr::and;
pub use expr::cast;
pub use expr::div;
pub use expr::eq;
pub use expr::gt;
pub use expr::gte;
pub use expr::lit;
pub use expr::lt;
pub use expr::lte;
pub use expr::mul;
pub use expr::neg;
pub use expr::neq;
pub use expr::not;
pub use expr::or;
pub use expr::path;
pub use expr::pow;
pub use expr::rem;
pub use expr::sub;
pub use synthetic_field::SyntheticField;
pub use synthetic_field::SyntheticFieldRef;
pub use synthetic_field::field_name_of;
pub use synthetic_field::owner_type_name_of;
pub use synthetic_field_error::SyntheticFieldError;
pub use synthetic_field_registry::SyntheticFieldRegistry;

#[cfg(test)]
mod tests;
