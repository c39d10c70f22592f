use crate::field_path::FieldPathBuildError;
use crate::field_path::Selector;
use crate::synthetic::BinaryOperator;
use crate::synthetic::Expr;
use crate::synthetic::SyntheticFieldRegistry;
use crate::synthetic::abs;
use crate::synthetic::add;
use crate::synthetic::and;
use crate::synthetic::cast;
use crate::synthetic::div;
use crate::synthetic::gt;
use crate::synthetic::lit;
use crate::synthetic::mul;
use crate::synthetic::neg;
use crate::synthetic::not;
use crate::synthetic::sub;
use crate::test::fixtures::dex_schema;
use crate::types::ScalarKind;

type Result<T> = std::result::Result<T, FieldPathBuildError>;

#[test]
fn combinators_build_trees_without_touching_operands() -> Result<()> {
    let schema = dex_schema();
    let record = schema.object("Record")?;
    let sum = add(record.path("a")?, record.path("b")?);
    let doubled = mul(sum.clone(), 2);

    assert_eq!(sum.to_string(), "(a + b)");
    assert_eq!(doubled.to_string(), "((a + b) * 2)");
    let Expr::Binary { lhs, op, .. } = &doubled else {
        panic!("mul builds a binary node");
    };
    assert_eq!(op, &BinaryOperator::Mul);
    assert_eq!(**lhs, sum);

    Ok(())
}

#[test]
fn display_covers_unary_and_cast_nodes() -> Result<()> {
    let schema = dex_schema();
    let pair = schema.object("Pair")?;
    let expr = abs(sub(
        cast(pair.path("reserve0")?, ScalarKind::Float),
        neg(pair.path("reserve1")?),
    ));
    assert_eq!(expr.to_string(), "abs((Float(reserve0) - -reserve1))");
    assert_eq!(not(lit(true)).to_string(), "!true");
    Ok(())
}

#[test]
fn field_paths_are_listed_left_to_right() -> Result<()> {
    let schema = dex_schema();
    let pair = schema.object("Pair")?;
    let expr = div(
        mul(pair.path("reserve0")?, pair.path("token0.derivedETH")?),
        pair.path("reserve1")?,
    );
    let keys = expr.field_paths().iter().map(|path| path.key()).collect::<Vec<_>>();
    assert_eq!(keys, vec!["reserve0", "token0.derivedETH", "reserve1"]);
    assert!(expr.synthetic_dependencies().is_empty());
    Ok(())
}

#[test]
fn synthetic_dependencies_are_deduplicated() -> Result<()> {
    let schema = dex_schema();
    let mut registry = SyntheticFieldRegistry::new(&schema);
    let record = schema.object("Record")?;
    registry.register("Record", "total", add(record.path("a")?, record.path("b")?))
        .expect("valid synthetic field");
    let total = record.synthetic(&registry, "total")?;

    let expr = add(mul(total.clone(), total.clone()), total);
    let deps = expr.synthetic_dependencies();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].name(), "Record.total");

    Ok(())
}

#[test]
fn output_kinds() -> Result<()> {
    let schema = dex_schema();
    let registry = SyntheticFieldRegistry::new(&schema);
    let record = schema.object("Record")?;
    let pair = schema.object("Pair")?;

    assert_eq!(add(record.path("a")?, record.path("b")?).output_kind(&registry), ScalarKind::Float);
    assert_eq!(
        add(pair.path("token0.symbol")?, "/").output_kind(&registry),
        ScalarKind::String,
    );
    assert_eq!(add(record.path("label")?, 1).output_kind(&registry), ScalarKind::Float);
    assert_eq!(gt(record.path("a")?, 0).output_kind(&registry), ScalarKind::Boolean);
    assert_eq!(and(true, false).output_kind(&registry), ScalarKind::Boolean);
    assert_eq!(
        cast(record.path("a")?, ScalarKind::String).output_kind(&registry),
        ScalarKind::String,
    );
    assert_eq!(Expr::from(record.path("a")?).output_kind(&registry), ScalarKind::Int);
    assert_eq!(Expr::from(record.path("category")?).output_kind(&registry), ScalarKind::String);
    assert_eq!(
        Expr::from(pair.path("reserve0")?).output_kind(&registry),
        ScalarKind::Custom("BigDecimal".to_string()),
    );

    Ok(())
}
