use crate::field_path::ArgumentTypeError;
use crate::schema::Schema;
use crate::types::ScalarKind;
use crate::types::TypeAnnotation;
use crate::types::TypeKind;
use crate::value::Value;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, ArgumentTypeError>;

/// Check `value` against `annotation` and produce the typed value that will
/// be sent as a variable.
///
/// Only two implicit conversions are performed: an `Int` is widened to a
/// `Float` where a `Float` (or a custom scalar) is expected, and a `String`
/// naming one of an enum type's values becomes that [`Value::Enum`].
/// Everything else must already match the declared type. In particular a
/// single value is never wrapped into a list and strings are never parsed as
/// numbers.
pub(crate) fn coerce_value(
    schema: &Schema,
    annotation: &TypeAnnotation,
    value: Value,
    location: &str,
) -> Result<Value> {
    if value.is_null() {
        return if annotation.nullable() {
            Ok(Value::Null)
        } else {
            Err(mismatch(location, annotation, &value, "null given for a non-null type"))
        };
    }

    match annotation {
        TypeAnnotation::List(list_annot) => match value {
            Value::List(items) => {
                let inner = list_annot.inner_type_annotation();
                let mut coerced = Vec::with_capacity(items.len());
                for (idx, item) in items.into_iter().enumerate() {
                    coerced.push(coerce_value(
                        schema,
                        inner,
                        item,
                        &format!("{location}[{idx}]"),
                    )?);
                }
                Ok(Value::List(coerced))
            },
            other => Err(mismatch(location, annotation, &other, "expected a list")),
        },

        TypeAnnotation::Named(named_annot) => {
            let schema_type = named_annot.schema_type(schema).map_err(|_| {
                mismatch(location, annotation, &value, "the declared type is not defined")
            })?;

            match schema_type.kind() {
                TypeKind::Scalar => coerce_scalar(
                    &ScalarKind::from_type_name(schema_type.name()),
                    annotation,
                    value,
                    location,
                ),

                TypeKind::Enum => {
                    let name = match &value {
                        Value::Enum(name) | Value::String(name) => name.as_str(),
                        _ => return Err(mismatch(
                            location,
                            annotation,
                            &value,
                            "expected an enum value",
                        )),
                    };
                    if schema_type.has_enum_value(name) {
                        Ok(Value::Enum(name.to_string()))
                    } else {
                        Err(mismatch(
                            location,
                            annotation,
                            &value,
                            &format!(
                                "`{name}` is not a value of the `{}` enum",
                                schema_type.name(),
                            ),
                        ))
                    }
                },

                TypeKind::InputObject => {
                    let mut entries = match value {
                        Value::Object(entries) => entries,
                        other => return Err(mismatch(
                            location,
                            annotation,
                            &other,
                            "expected an input object",
                        )),
                    };

                    if let Some(unknown) = entries.keys()
                        .find(|key| !schema_type.input_fields().contains_key(key.as_str())) {
                        return Err(ArgumentTypeError {
                            expected: annotation.to_graphql_string(),
                            location: location.to_string(),
                            reason: format!(
                                "`{unknown}` is not a field of the `{}` input type",
                                schema_type.name(),
                            ),
                        });
                    }

                    // Rebuilt in declaration order so that equal inputs hash
                    // equally.
                    let mut coerced = IndexMap::new();
                    for (field_name, input_field) in schema_type.input_fields() {
                        match entries.shift_remove(field_name) {
                            Some(field_value) => {
                                coerced.insert(field_name.to_string(), coerce_value(
                                    schema,
                                    input_field.type_annotation(),
                                    field_value,
                                    &format!("{location}.{field_name}"),
                                )?);
                            },
                            None if input_field.is_required() => {
                                return Err(ArgumentTypeError {
                                    expected: annotation.to_graphql_string(),
                                    location: location.to_string(),
                                    reason: format!(
                                        "the required input field `{field_name}` is missing",
                                    ),
                                });
                            },
                            None => (),
                        }
                    }
                    Ok(Value::Object(coerced))
                },

                TypeKind::Interface | TypeKind::Object | TypeKind::Union => Err(mismatch(
                    location,
                    annotation,
                    &value,
                    "the declared type is an output type",
                )),
            }
        },
    }
}

fn coerce_scalar(
    scalar_kind: &ScalarKind,
    annotation: &TypeAnnotation,
    value: Value,
    location: &str,
) -> Result<Value> {
    match (scalar_kind, value) {
        (ScalarKind::Int, Value::Int(i)) => {
            if i32::try_from(i).is_ok() {
                Ok(Value::Int(i))
            } else {
                Err(mismatch(
                    location,
                    annotation,
                    &Value::Int(i),
                    "value does not fit in a 32-bit Int",
                ))
            }
        },

        (ScalarKind::Float, Value::Float(f)) => Ok(Value::Float(f)),
        (ScalarKind::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
        (ScalarKind::String, Value::String(s)) => Ok(Value::String(s)),
        (ScalarKind::Boolean, Value::Boolean(b)) => Ok(Value::Boolean(b)),

        // GraphQL's `ID` accepts both string and integer input as-is.
        (ScalarKind::ID, value @ (Value::String(_) | Value::Int(_))) => Ok(value),

        // Custom scalars are opaque to the client: any scalar-shaped input is
        // passed through for the service to interpret.
        (
            ScalarKind::Custom(_),
            value @ (Value::Boolean(_) | Value::Float(_) | Value::Int(_) | Value::String(_)),
        ) => Ok(value),

        (scalar_kind, other) => Err(mismatch(
            location,
            annotation,
            &other,
            &format!("a {} value cannot be used as {scalar_kind}", other.kind_name()),
        )),
    }
}

fn mismatch(
    location: &str,
    annotation: &TypeAnnotation,
    value: &Value,
    reason: &str,
) -> ArgumentTypeError {
    ArgumentTypeError {
        expected: annotation.to_graphql_string(),
        location: location.to_string(),
        reason: format!("{reason} (found {})", value.kind_name()),
    }
}
