use crate::synthetic::BinaryOperator;
use crate::synthetic::UnaryOperator;
use crate::types::ScalarKind;
use serde_json::Number;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

/// Why an operator couldn't be applied. The resolver attaches the name of the
/// field being computed.
pub(crate) type EvalResult = std::result::Result<JsonValue, String>;

pub(crate) fn apply_unary(op: UnaryOperator, operand: JsonValue) -> EvalResult {
    if operand.is_null() {
        return Ok(JsonValue::Null);
    }
    match op {
        UnaryOperator::Abs => number_value(as_number(&operand, "abs")?.abs()),
        UnaryOperator::Neg => number_value(-as_number(&operand, "negation")?),
        UnaryOperator::Not => Ok(JsonValue::Bool(!as_bool(&operand, "`not`")?)),
    }
}

/// `concat_strings` is set when both operands are statically `String`s, in
/// which case `add` concatenates instead of summing.
pub(crate) fn apply_binary(
    op: BinaryOperator,
    lhs: JsonValue,
    rhs: JsonValue,
    concat_strings: bool,
) -> EvalResult {
    if lhs.is_null() || rhs.is_null() {
        return Ok(JsonValue::Null);
    }

    let symbol = format!("{op:?}").to_lowercase();
    match op {
        BinaryOperator::Add if concat_strings =>
            Ok(JsonValue::String(format!("{}{}", as_text(&lhs)?, as_text(&rhs)?))),
        BinaryOperator::Add => number_value(as_number(&lhs, &symbol)? + as_number(&rhs, &symbol)?),
        BinaryOperator::Sub => number_value(as_number(&lhs, &symbol)? - as_number(&rhs, &symbol)?),
        BinaryOperator::Mul => number_value(as_number(&lhs, &symbol)? * as_number(&rhs, &symbol)?),
        BinaryOperator::Div => number_value(as_number(&lhs, &symbol)? / as_number(&rhs, &symbol)?),
        BinaryOperator::Rem => number_value(as_number(&lhs, &symbol)? % as_number(&rhs, &symbol)?),
        BinaryOperator::Pow =>
            number_value(as_number(&lhs, &symbol)?.powf(as_number(&rhs, &symbol)?)),

        BinaryOperator::And =>
            Ok(JsonValue::Bool(as_bool(&lhs, "`and`")? && as_bool(&rhs, "`and`")?)),
        BinaryOperator::Or =>
            Ok(JsonValue::Bool(as_bool(&lhs, "`or`")? || as_bool(&rhs, "`or`")?)),

        BinaryOperator::Eq => Ok(JsonValue::Bool(values_equal(&lhs, &rhs))),
        BinaryOperator::Neq => Ok(JsonValue::Bool(!values_equal(&lhs, &rhs))),
        BinaryOperator::Gt => Ok(JsonValue::Bool(compare(&lhs, &rhs)? == Ordering::Greater)),
        BinaryOperator::Gte => Ok(JsonValue::Bool(compare(&lhs, &rhs)? != Ordering::Less)),
        BinaryOperator::Lt => Ok(JsonValue::Bool(compare(&lhs, &rhs)? == Ordering::Less)),
        BinaryOperator::Lte => Ok(JsonValue::Bool(compare(&lhs, &rhs)? != Ordering::Greater)),
    }
}

pub(crate) fn apply_cast(target: &ScalarKind, operand: JsonValue) -> EvalResult {
    if operand.is_null() {
        return Ok(JsonValue::Null);
    }
    if operand.is_array() || operand.is_object() {
        return Err(format!("cannot cast a non-scalar value to {target}"));
    }

    match target {
        ScalarKind::Int => match &operand {
            JsonValue::Number(n) if n.is_i64() => Ok(operand),
            JsonValue::Bool(b) => Ok(JsonValue::from(i64::from(*b))),
            _ => {
                let float = match &operand {
                    JsonValue::String(s) => match s.trim().parse::<i64>() {
                        Ok(int) => return Ok(JsonValue::from(int)),
                        Err(_) => parse_float(s)?,
                    },
                    other => as_number(other, "Int cast")?,
                };
                let truncated = float.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated <= i64::MAX as f64 {
                    Ok(JsonValue::from(truncated as i64))
                } else {
                    Err(format!("{float} does not fit in an Int"))
                }
            },
        },

        ScalarKind::Float => match &operand {
            JsonValue::Bool(b) => number_value(if *b { 1.0 } else { 0.0 }),
            JsonValue::String(s) => number_value(parse_float(s)?),
            other => number_value(as_number(other, "Float cast")?),
        },

        ScalarKind::ID | ScalarKind::String => Ok(JsonValue::String(as_text(&operand)?)),

        ScalarKind::Boolean => match &operand {
            JsonValue::Bool(_) => Ok(operand),
            JsonValue::Number(n) => Ok(JsonValue::Bool(n.as_f64().is_some_and(|f| f != 0.0))),
            JsonValue::String(s) => match s.trim() {
                "true" => Ok(JsonValue::Bool(true)),
                "false" => Ok(JsonValue::Bool(false)),
                other => Err(format!("cannot cast the string `{other}` to Boolean")),
            },
            _ => Err(format!("cannot cast {operand} to Boolean")),
        },

        ScalarKind::Custom(_) => Ok(operand),
    }
}

fn as_bool(value: &JsonValue, usage: &str) -> Result<bool, String> {
    value.as_bool().ok_or_else(|| format!("{usage} needs Boolean operands, found {value}"))
}

/// Numbers are read as `f64`. Strings holding a number are accepted too,
/// since subgraphs send `BigInt`/`BigDecimal` values as strings.
fn as_number(value: &JsonValue, usage: &str) -> Result<f64, String> {
    match value {
        JsonValue::Number(n) => n.as_f64()
            .ok_or_else(|| format!("{n} cannot be represented as a Float")),
        JsonValue::String(s) => s.trim().parse::<f64>()
            .map_err(|_| format!("{usage} needs numeric operands, found the string `{s}`")),
        other => Err(format!("{usage} needs numeric operands, found {other}")),
    }
}

fn as_text(value: &JsonValue) -> Result<String, String> {
    match value {
        JsonValue::String(s) => Ok(s.to_owned()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(format!("cannot use {other} as a String")),
    }
}

fn compare(lhs: &JsonValue, rhs: &JsonValue) -> Result<Ordering, String> {
    if let (JsonValue::String(l), JsonValue::String(r)) = (lhs, rhs)
        && (l.trim().parse::<f64>().is_err() || r.trim().parse::<f64>().is_err()) {
        return Ok(l.cmp(r));
    }
    let l = as_number(lhs, "comparison")?;
    let r = as_number(rhs, "comparison")?;
    l.partial_cmp(&r).ok_or_else(|| format!("cannot order {l} and {r}"))
}

fn number_value(value: f64) -> EvalResult {
    Number::from_f64(value)
        .map(JsonValue::Number)
        .ok_or_else(|| format!("the result ({value}) is not a finite number"))
}

fn parse_float(text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| format!("cannot cast the string `{text}` to a number"))
}

fn values_equal(lhs: &JsonValue, rhs: &JsonValue) -> bool {
    match (lhs, rhs) {
        (JsonValue::Number(_), JsonValue::Number(_))
        | (JsonValue::Number(_), JsonValue::String(_))
        | (JsonValue::String(_), JsonValue::Number(_)) =>
            match (as_number(lhs, "=="), as_number(rhs, "==")) {
                (Ok(l), Ok(r)) => l == r,
                _ => false,
            },
        _ => lhs == rhs,
    }
}
