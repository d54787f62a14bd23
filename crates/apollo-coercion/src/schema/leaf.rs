//! Coercion of leaf values: scalars and enums.
//!
//! Each named leaf type has a [`LeafCoercer`].
//! The coercion engine invokes it as an opaque capability
//! and propagates its error message verbatim, adding location and path.

use crate::ast::Value;
use crate::schema::EnumType;
use crate::JsonValue;
use serde_json_bytes::serde_json::Number;
use std::fmt;

/// Coerces the values of one scalar or enum type.
///
/// Implementations must be pure: the same input always gives the same result,
/// as coercion may run concurrently for many requests sharing one schema.
pub trait LeafCoercer: Send + Sync + fmt::Debug {
    /// Coerce a value written in a document.
    ///
    /// Never called with [`Value::Null`] or [`Value::Variable`],
    /// which the engine handles before reaching a leaf.
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String>;

    /// Coerce a runtime value, such as one supplied as a request variable.
    ///
    /// Never called with JSON `null`.
    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String>;
}

/// `Int`: a signed 32-bit integer
///
/// <https://spec.graphql.org/October2021/#sec-Int.Input-Coercion>
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCoercer;

/// `Float`: a double-precision number
///
/// <https://spec.graphql.org/October2021/#sec-Float.Input-Coercion>
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCoercer;

/// <https://spec.graphql.org/October2021/#sec-String.Input-Coercion>
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCoercer;

/// <https://spec.graphql.org/October2021/#sec-Boolean.Input-Coercion>
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCoercer;

/// `ID`: a string, or an integer which is coerced to a string
///
/// <https://spec.graphql.org/October2021/#sec-ID.Input-Coercion>
#[derive(Debug, Clone, Copy, Default)]
pub struct IdCoercer;

/// Accepts any value unchanged, for custom scalars without dedicated rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyCoercer;

/// Prints a runtime value in error messages, as compact JSON.
pub(crate) fn print_json(value: &JsonValue) -> String {
    serde_json_bytes::serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_owned())
}

impl LeafCoercer for IntCoercer {
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String> {
        match value {
            Value::Int(int) => match int.try_to_i32() {
                Ok(int) => Ok(JsonValue::Number(int.into())),
                Err(_) => Err(format!(
                    "Int cannot represent non 32-bit signed integer value: {value}"
                )),
            },
            _ => Err(format!("Int cannot represent non-integer value: {value}")),
        }
    }

    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String> {
        let JsonValue::Number(number) = value else {
            return Err(format!(
                "Int cannot represent non-integer value: {}",
                print_json(value)
            ));
        };
        let int = if let Some(int) = number.as_i64() {
            Some(int)
        } else {
            // Accept floats with no fractional part, such as `4.0`
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.is_finite())
                .map(|float| float as i64)
        };
        match int {
            Some(int) => match i32::try_from(int) {
                Ok(int) => Ok(JsonValue::Number(int.into())),
                Err(_) => Err(format!(
                    "Int cannot represent non 32-bit signed integer value: {}",
                    print_json(value)
                )),
            },
            None => Err(format!(
                "Int cannot represent non-integer value: {}",
                print_json(value)
            )),
        }
    }
}

impl LeafCoercer for FloatCoercer {
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String> {
        let text = match value {
            Value::Int(int) => int.as_str(),
            Value::Float(float) => float.as_str(),
            _ => return Err(format!("Float cannot represent non numeric value: {value}")),
        };
        // Rely on `serde_json::Number`’s own parser to use whatever precision it supports
        match text.parse::<Number>() {
            Ok(number) => Ok(JsonValue::Number(number)),
            Err(_) => Err(format!("Float cannot represent non numeric value: {value}")),
        }
    }

    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String> {
        if matches!(value, JsonValue::Number(_)) {
            Ok(value.clone())
        } else {
            Err(format!(
                "Float cannot represent non numeric value: {}",
                print_json(value)
            ))
        }
    }
}

impl LeafCoercer for StringCoercer {
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String> {
        match value {
            Value::String(str) => Ok(str.as_str().into()),
            _ => Err(format!("String cannot represent a non string value: {value}")),
        }
    }

    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String> {
        if value.is_string() {
            Ok(value.clone())
        } else {
            Err(format!(
                "String cannot represent a non string value: {}",
                print_json(value)
            ))
        }
    }
}

impl LeafCoercer for BooleanCoercer {
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String> {
        match value {
            Value::Boolean(bool) => Ok((*bool).into()),
            _ => Err(format!(
                "Boolean cannot represent a non boolean value: {value}"
            )),
        }
    }

    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String> {
        if value.is_boolean() {
            Ok(value.clone())
        } else {
            Err(format!(
                "Boolean cannot represent a non boolean value: {}",
                print_json(value)
            ))
        }
    }
}

impl LeafCoercer for IdCoercer {
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String> {
        match value {
            Value::String(str) => Ok(str.as_str().into()),
            Value::Int(int) => Ok(int.as_str().into()),
            _ => Err(format!(
                "ID cannot represent a non-string and non-integer value: {value}"
            )),
        }
    }

    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String> {
        match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Number(number) if number.is_i64() || number.is_u64() => {
                Ok(number.to_string().as_str().into())
            }
            _ => Err(format!("ID cannot represent value: {}", print_json(value))),
        }
    }
}

impl LeafCoercer for AnyCoercer {
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String> {
        literal_to_json(value)
    }

    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String> {
        Ok(value.clone())
    }
}

/// Converts a literal to JSON without any type information.
fn literal_to_json(value: &Value) -> Result<JsonValue, String> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Variable(name) => Err(format!("Unexpected variable ${name} in constant value")),
        Value::Enum(value) => Ok(value.as_str().into()),
        Value::String(value) => Ok(value.as_str().into()),
        Value::Boolean(value) => Ok((*value).into()),
        Value::Int(int) => int
            .as_str()
            .parse()
            .map(JsonValue::Number)
            .map_err(|_| format!("Int value overflow: {int}")),
        Value::Float(float) => float
            .as_str()
            .parse()
            .map(JsonValue::Number)
            .map_err(|_| format!("Float value overflow: {float}")),
        Value::List(values) => values.iter().map(|value| literal_to_json(value)).collect(),
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| Ok((key.as_str(), literal_to_json(value)?)))
            .collect(),
    }
}

/// <https://spec.graphql.org/October2021/#sec-Enums.Input-Coercion>
impl LeafCoercer for EnumType {
    fn coerce_literal(&self, value: &Value) -> Result<JsonValue, String> {
        let Value::Enum(value_name) = value else {
            return Err(format!(
                "Enum \"{}\" cannot represent non-enum value: {value}.",
                self.name
            ));
        };
        self.internal_value(value_name)
    }

    fn coerce_input(&self, value: &JsonValue) -> Result<JsonValue, String> {
        let Some(value_name) = value.as_str() else {
            return Err(format!(
                "Enum \"{}\" cannot represent non-string value: {}.",
                self.name,
                print_json(value)
            ));
        };
        self.internal_value(value_name)
    }
}

impl EnumType {
    fn internal_value(&self, value_name: &str) -> Result<JsonValue, String> {
        match self.values.get(value_name) {
            Some(def) => Ok(def.internal_value.clone()),
            None => Err(format!(
                "Value \"{value_name}\" does not exist in \"{}\" enum.",
                self.name
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::IntValue;
    use crate::name;
    use serde_json_bytes::json;

    #[test]
    fn int() {
        let int = IntCoercer;
        assert_eq!(int.coerce_literal(&Value::from(7)), Ok(json!(7)));
        assert_eq!(
            int.coerce_literal(&Value::Int(IntValue::new_parsed("2147483648"))),
            Err("Int cannot represent non 32-bit signed integer value: 2147483648".to_owned())
        );
        assert_eq!(
            int.coerce_literal(&Value::from("7")),
            Err(r#"Int cannot represent non-integer value: "7""#.to_owned())
        );
        assert_eq!(int.coerce_input(&json!(4.0)), Ok(json!(4)));
        assert_eq!(
            int.coerce_input(&json!(4.5)),
            Err("Int cannot represent non-integer value: 4.5".to_owned())
        );
        assert_eq!(
            int.coerce_input(&json!(-3_000_000_000_i64)),
            Err("Int cannot represent non 32-bit signed integer value: -3000000000".to_owned())
        );
        assert_eq!(
            int.coerce_input(&json!(true)),
            Err("Int cannot represent non-integer value: true".to_owned())
        );
    }

    #[test]
    fn float_string_boolean() {
        assert_eq!(FloatCoercer.coerce_literal(&Value::from(1)), Ok(json!(1)));
        assert_eq!(FloatCoercer.coerce_literal(&Value::from(1.5)), Ok(json!(1.5)));
        assert_eq!(
            FloatCoercer.coerce_input(&json!("1.5")),
            Err(r#"Float cannot represent non numeric value: "1.5""#.to_owned())
        );
        assert_eq!(
            StringCoercer.coerce_literal(&Value::Enum(name!(RED))),
            Err("String cannot represent a non string value: RED".to_owned())
        );
        assert_eq!(
            BooleanCoercer.coerce_input(&json!(0)),
            Err("Boolean cannot represent a non boolean value: 0".to_owned())
        );
    }

    #[test]
    fn id() {
        assert_eq!(IdCoercer.coerce_literal(&Value::from(42)), Ok(json!("42")));
        assert_eq!(IdCoercer.coerce_input(&json!(42)), Ok(json!("42")));
        assert_eq!(
            IdCoercer.coerce_literal(&Value::from(1.5)),
            Err("ID cannot represent a non-string and non-integer value: 1.5".to_owned())
        );
        assert_eq!(
            IdCoercer.coerce_input(&json!(1.5)),
            Err("ID cannot represent value: 1.5".to_owned())
        );
    }
}
