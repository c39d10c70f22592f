use crate::resolver::evaluator::apply_binary;
use crate::resolver::evaluator::apply_cast;
use crate::resolver::evaluator::apply_unary;
use crate::synthetic::BinaryOperator;
use crate::synthetic::UnaryOperator;
use crate::types::ScalarKind;
use serde_json::json;

mod arithmetic {
    use super::*;

    #[test]
    fn numbers_and_numeric_strings() {
        assert_eq!(apply_binary(BinaryOperator::Add, json!(3), json!(4), false), Ok(json!(7.0)));
        assert_eq!(apply_binary(BinaryOperator::Mul, json!("1.5"), json!(2), false), Ok(json!(3.0)));
        assert_eq!(apply_binary(BinaryOperator::Sub, json!("10"), json!("0.5"), false), Ok(json!(9.5)));
        assert_eq!(apply_binary(BinaryOperator::Rem, json!(7), json!(4), false), Ok(json!(3.0)));
        assert_eq!(apply_binary(BinaryOperator::Pow, json!(2), json!(10), false), Ok(json!(1024.0)));
        assert_eq!(apply_unary(UnaryOperator::Abs, json!(-2.5)), Ok(json!(2.5)));
        assert_eq!(apply_unary(UnaryOperator::Neg, json!("4")), Ok(json!(-4.0)));
    }

    #[test]
    fn non_finite_results_are_errors() {
        let err = apply_binary(BinaryOperator::Div, json!(1), json!(0), false).unwrap_err();
        assert!(err.contains("not a finite number"), "{err}");
    }

    #[test]
    fn non_numeric_operands_are_errors() {
        assert!(apply_binary(BinaryOperator::Mul, json!("abc"), json!(2), false).is_err());
        assert!(apply_binary(BinaryOperator::Add, json!(true), json!(2), false).is_err());
    }

    #[test]
    fn add_concatenates_only_when_asked() {
        assert_eq!(
            apply_binary(BinaryOperator::Add, json!("WETH"), json!("/"), true),
            Ok(json!("WETH/")),
        );
        assert_eq!(apply_binary(BinaryOperator::Add, json!("1"), json!("2"), false), Ok(json!(3.0)));
    }

    #[test]
    fn null_operands_propagate() {
        assert_eq!(apply_binary(BinaryOperator::Add, json!(null), json!(1), false), Ok(json!(null)));
        assert_eq!(apply_binary(BinaryOperator::Gt, json!(1), json!(null), false), Ok(json!(null)));
        assert_eq!(apply_unary(UnaryOperator::Not, json!(null)), Ok(json!(null)));
        assert_eq!(apply_cast(&ScalarKind::Int, json!(null)), Ok(json!(null)));
    }
}

mod logic {
    use super::*;

    #[test]
    fn comparisons() {
        assert_eq!(apply_binary(BinaryOperator::Gt, json!(3), json!("2.5"), false), Ok(json!(true)));
        assert_eq!(apply_binary(BinaryOperator::Lte, json!(2), json!(2), false), Ok(json!(true)));
        assert_eq!(apply_binary(BinaryOperator::Lt, json!("abc"), json!("abd"), false), Ok(json!(true)));
        assert_eq!(apply_binary(BinaryOperator::Gte, json!("10"), json!("9"), false), Ok(json!(true)));
        assert!(apply_binary(BinaryOperator::Gt, json!(true), json!(1), false).is_err());
    }

    #[test]
    fn equality_compares_numbers_by_value() {
        assert_eq!(apply_binary(BinaryOperator::Eq, json!(1), json!(1.0), false), Ok(json!(true)));
        assert_eq!(apply_binary(BinaryOperator::Eq, json!("1.0"), json!(1), false), Ok(json!(true)));
        assert_eq!(apply_binary(BinaryOperator::Neq, json!("a"), json!("b"), false), Ok(json!(true)));
        assert_eq!(apply_binary(BinaryOperator::Eq, json!("SPOT"), json!("SPOT"), false), Ok(json!(true)));
    }

    #[test]
    fn boolean_operators_need_booleans() {
        assert_eq!(apply_binary(BinaryOperator::And, json!(true), json!(false), false), Ok(json!(false)));
        assert_eq!(apply_binary(BinaryOperator::Or, json!(true), json!(false), false), Ok(json!(true)));
        assert_eq!(apply_unary(UnaryOperator::Not, json!(false)), Ok(json!(true)));
        assert!(apply_binary(BinaryOperator::And, json!(1), json!(true), false).is_err());
    }
}

mod casts {
    use super::*;

    #[test]
    fn to_int_truncates() {
        assert_eq!(apply_cast(&ScalarKind::Int, json!(2.9)), Ok(json!(2)));
        assert_eq!(apply_cast(&ScalarKind::Int, json!("-7.5")), Ok(json!(-7)));
        assert_eq!(apply_cast(&ScalarKind::Int, json!("123")), Ok(json!(123)));
        assert_eq!(apply_cast(&ScalarKind::Int, json!(true)), Ok(json!(1)));
        assert!(apply_cast(&ScalarKind::Int, json!("abc")).is_err());
        assert!(apply_cast(&ScalarKind::Int, json!(1e300)).is_err());
    }

    #[test]
    fn to_float() {
        assert_eq!(apply_cast(&ScalarKind::Float, json!("0.25")), Ok(json!(0.25)));
        assert_eq!(apply_cast(&ScalarKind::Float, json!(3)), Ok(json!(3.0)));
        assert!(apply_cast(&ScalarKind::Float, json!("inf")).is_err());
    }

    #[test]
    fn to_boolean() {
        assert_eq!(apply_cast(&ScalarKind::Boolean, json!(0)), Ok(json!(false)));
        assert_eq!(apply_cast(&ScalarKind::Boolean, json!(0.5)), Ok(json!(true)));
        assert_eq!(apply_cast(&ScalarKind::Boolean, json!("true")), Ok(json!(true)));
        assert!(apply_cast(&ScalarKind::Boolean, json!("yes")).is_err());
    }

    #[test]
    fn to_string_and_custom() {
        assert_eq!(apply_cast(&ScalarKind::String, json!(42)), Ok(json!("42")));
        assert_eq!(apply_cast(&ScalarKind::ID, json!(false)), Ok(json!("false")));
        assert_eq!(
            apply_cast(&ScalarKind::Custom("BigInt".to_string()), json!("99")),
            Ok(json!("99")),
        );
        assert!(apply_cast(&ScalarKind::String, json!({ "a": 1 })).is_err());
    }
}
