/// The scalar categories that argument coercion and synthetic-field casts
/// know how to reason about.
///
/// Any scalar that isn't one of GraphQL's five built-ins is represented as
/// [`ScalarKind::Custom`]. Subgraphs commonly declare `BigInt`, `BigDecimal`
/// and `Bytes` this way and transport their values as JSON strings.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum ScalarKind {
    Boolean,
    Custom(String),
    Float,
    ID,
    Int,
    String,
}
impl ScalarKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "Boolean" => Self::Boolean,
            "Float" => Self::Float,
            "ID" => Self::ID,
            "Int" => Self::Int,
            "String" => Self::String,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Boolean => "Boolean",
            Self::Custom(name) => name.as_str(),
            Self::Float => "Float",
            Self::ID => "ID",
            Self::Int => "Int",
            Self::String => "String",
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Float | Self::Int)
    }
}
impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
