use crate::field_path::FieldPath;
use crate::field_path::PathStep;
use crate::synthetic::SyntheticFieldRef;
use crate::synthetic::SyntheticFieldRegistry;
use crate::types::ScalarKind;
use crate::types::TypeKind;
use crate::value::Value;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UnaryOperator {
    Abs,
    Neg,
    Not,
}
impl UnaryOperator {
    fn symbol(&self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOperator {
    Add,
    And,
    Div,
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Mul,
    Neq,
    Or,
    Pow,
    Rem,
    Sub,
}
impl BinaryOperator {
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Div | Self::Mul | Self::Pow | Self::Rem | Self::Sub,
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Gt | Self::Gte | Self::Lt | Self::Lte | Self::Neq,
        )
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::And => "&&",
            Self::Div => "/",
            Self::Eq => "==",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Mul => "*",
            Self::Neq => "!=",
            Self::Or => "||",
            Self::Pow => "^",
            Self::Rem => "%",
            Self::Sub => "-",
        }
    }
}

/// An expression tree defining a synthetic field.
///
/// Leaves are [`FieldPath`]s (relative to the type that owns the synthetic
/// field) or literal [`Value`]s. Trees are built with the combinator
/// functions in this module ([`add()`], [`gt()`], [`cast()`], ...), each of
/// which returns a new node and leaves its operands untouched:
///
/// ```ignore
/// let pair = schema.object("Pair")?;
/// let tvl = add(
///     mul(pair.path("reserve0")?, pair.path("token0.derivedETH")?),
///     mul(pair.path("reserve1")?, pair.path("token1.derivedETH")?),
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<'schema> {
    Binary {
        lhs: Box<Expr<'schema>>,
        op: BinaryOperator,
        rhs: Box<Expr<'schema>>,
    },
    Cast {
        operand: Box<Expr<'schema>>,
        target: ScalarKind,
    },
    Literal(Value),
    Path(FieldPath<'schema>),
    Unary {
        op: UnaryOperator,
        operand: Box<Expr<'schema>>,
    },
}
impl<'schema> Expr<'schema> {
    /// Every [`FieldPath`] leaf of this expression, left to right.
    pub fn field_paths(&self) -> Vec<&FieldPath<'schema>> {
        let mut paths = vec![];
        self.collect_field_paths(&mut paths);
        paths
    }

    /// The synthetic fields this expression reads directly (not
    /// transitively), in first-seen order.
    pub fn synthetic_dependencies(&self) -> Vec<&SyntheticFieldRef<'schema>> {
        let mut deps: Vec<&SyntheticFieldRef<'schema>> = vec![];
        for path in self.field_paths() {
            for step in path.steps() {
                if let PathStep::Synthetic(synthetic_ref) = step
                    && !deps.contains(&synthetic_ref) {
                    deps.push(synthetic_ref);
                }
            }
        }
        deps
    }

    /// The scalar kind this expression evaluates to.
    ///
    /// Arithmetic always produces a `Float` except `add` over two `String`
    /// operands, which concatenates. Comparisons and logical operators
    /// produce a `Boolean`. Enum-typed fields are read as `String`s.
    pub fn output_kind(&self, registry: &SyntheticFieldRegistry<'schema>) -> ScalarKind {
        match self {
            Self::Binary { lhs, op: BinaryOperator::Add, rhs } => {
                let lhs_kind = lhs.output_kind(registry);
                let rhs_kind = rhs.output_kind(registry);
                if lhs_kind == ScalarKind::String && rhs_kind == ScalarKind::String {
                    ScalarKind::String
                } else {
                    ScalarKind::Float
                }
            },
            Self::Binary { op, .. } if op.is_arithmetic() => ScalarKind::Float,
            Self::Binary { .. } => ScalarKind::Boolean,
            Self::Cast { target, .. } => target.clone(),
            Self::Literal(value) => match value {
                Value::Boolean(_) => ScalarKind::Boolean,
                Value::Float(_) => ScalarKind::Float,
                Value::Int(_) => ScalarKind::Int,
                _ => ScalarKind::String,
            },
            Self::Path(path) => path_output_kind(path, registry),
            Self::Unary { op: UnaryOperator::Not, .. } => ScalarKind::Boolean,
            Self::Unary { .. } => ScalarKind::Float,
        }
    }

    fn collect_field_paths<'a>(&'a self, paths: &mut Vec<&'a FieldPath<'schema>>) {
        match self {
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_field_paths(paths);
                rhs.collect_field_paths(paths);
            },
            Self::Cast { operand, .. } | Self::Unary { operand, .. } =>
                operand.collect_field_paths(paths),
            Self::Literal(_) => (),
            Self::Path(path) => paths.push(path),
        }
    }
}
impl<'schema> std::convert::From<FieldPath<'schema>> for Expr<'schema> {
    fn from(path: FieldPath<'schema>) -> Self {
        Self::Path(path)
    }
}
impl std::convert::From<Value> for Expr<'_> {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}
impl std::convert::From<bool> for Expr<'_> {
    fn from(value: bool) -> Self {
        Self::Literal(value.into())
    }
}
impl std::convert::From<f64> for Expr<'_> {
    fn from(value: f64) -> Self {
        Self::Literal(value.into())
    }
}
impl std::convert::From<i32> for Expr<'_> {
    fn from(value: i32) -> Self {
        Self::Literal(value.into())
    }
}
impl std::convert::From<i64> for Expr<'_> {
    fn from(value: i64) -> Self {
        Self::Literal(value.into())
    }
}
impl std::convert::From<&str> for Expr<'_> {
    fn from(value: &str) -> Self {
        Self::Literal(value.into())
    }
}
impl std::fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary { lhs, op, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Self::Cast { operand, target } => write!(f, "{target}({operand})"),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Path(path) => write!(f, "{}", path.key()),
            Self::Unary { op: UnaryOperator::Abs, operand } => write!(f, "abs({operand})"),
            Self::Unary { op, operand } => write!(f, "{}{operand}", op.symbol()),
        }
    }
}

fn path_output_kind<'schema>(
    path: &FieldPath<'schema>,
    registry: &SyntheticFieldRegistry<'schema>,
) -> ScalarKind {
    match path.leaf() {
        Some(PathStep::Synthetic(synthetic_ref)) => registry.get(synthetic_ref)
            .map(|field| field.expr().output_kind(registry))
            .unwrap_or(ScalarKind::Float),
        _ => match path.leaf_type() {
            Some(leaf_type) if leaf_type.kind() == TypeKind::Enum => ScalarKind::String,
            Some(leaf_type) => leaf_type.scalar_kind().unwrap_or(ScalarKind::String),
            None => ScalarKind::String,
        },
    }
}

fn binary<'schema>(
    lhs: impl Into<Expr<'schema>>,
    op: BinaryOperator,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    Expr::Binary {
        lhs: Box::new(lhs.into()),
        op,
        rhs: Box::new(rhs.into()),
    }
}

fn unary<'schema>(op: UnaryOperator, operand: impl Into<Expr<'schema>>) -> Expr<'schema> {
    Expr::Unary {
        op,
        operand: Box::new(operand.into()),
    }
}

pub fn abs<'schema>(operand: impl Into<Expr<'schema>>) -> Expr<'schema> {
    unary(UnaryOperator::Abs, operand)
}

pub fn add<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Add, rhs)
}

pub fn and<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::And, rhs)
}

/// Convert `operand` to `target`. Evaluation fails when the input can't be
/// represented as `target` (e.g. a non-numeric string cast to `Float`).
pub fn cast<'schema>(operand: impl Into<Expr<'schema>>, target: ScalarKind) -> Expr<'schema> {
    Expr::Cast {
        operand: Box::new(operand.into()),
        target,
    }
}

pub fn div<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Div, rhs)
}

pub fn eq<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Eq, rhs)
}

pub fn gt<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Gt, rhs)
}

pub fn gte<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Gte, rhs)
}

pub fn lit<'schema>(value: impl Into<Value>) -> Expr<'schema> {
    Expr::Literal(value.into())
}

pub fn lt<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Lt, rhs)
}

pub fn lte<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Lte, rhs)
}

pub fn mul<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Mul, rhs)
}

pub fn neg<'schema>(operand: impl Into<Expr<'schema>>) -> Expr<'schema> {
    unary(UnaryOperator::Neg, operand)
}

pub fn neq<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Neq, rhs)
}

pub fn not<'schema>(operand: impl Into<Expr<'schema>>) -> Expr<'schema> {
    unary(UnaryOperator::Not, operand)
}

pub fn or<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Or, rhs)
}

pub fn path(path: FieldPath<'_>) -> Expr<'_> {
    Expr::Path(path)
}

pub fn pow<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Pow, rhs)
}

pub fn rem<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Rem, rhs)
}

pub fn sub<'schema>(
    lhs: impl Into<Expr<'schema>>,
    rhs: impl Into<Expr<'schema>>,
) -> Expr<'schema> {
    binary(lhs, BinaryOperator::Sub, rhs)
}
