use crate::ast::Value;
use crate::coercion::VariableBindings;
use crate::JsonValue;
use crate::Node;

/// Whether an input position was given a value, given an explicit null, or left out.
///
/// The distinction is load-bearing: a default value only replaces an omitted value,
/// never an explicit null, and the two are reported with different messages
/// at non-null positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputValue<T> {
    Provided(T),
    ExplicitNull,
    Omitted,
}

/// An [`InputValue`] after considering the default value of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolved<'a, T> {
    Provided(T),
    /// Omitted, with this default value to be coerced in its place
    Default(&'a Node<Value>),
    ExplicitNull,
    /// Omitted, with no default value
    Omitted,
}

impl<T> InputValue<T> {
    /// Substitutes `default` if the value was omitted.
    ///
    /// <https://spec.graphql.org/October2021/#sec-Coercing-Field-Arguments>
    pub fn resolve_default<'a>(self, default: Option<&'a Node<Value>>) -> Resolved<'a, T> {
        match (self, default) {
            (InputValue::Provided(value), _) => Resolved::Provided(value),
            (InputValue::ExplicitNull, _) => Resolved::ExplicitNull,
            (InputValue::Omitted, Some(default)) => Resolved::Default(default),
            (InputValue::Omitted, None) => Resolved::Omitted,
        }
    }
}

impl<'a> InputValue<&'a JsonValue> {
    /// Classifies an entry of a runtime map, such as request variables
    pub fn from_json(value: Option<&'a JsonValue>) -> Self {
        match value {
            None => Self::Omitted,
            Some(value) if value.is_null() => Self::ExplicitNull,
            Some(value) => Self::Provided(value),
        }
    }
}

impl<'a> InputValue<&'a Node<Value>> {
    /// Classifies an argument or input object field written in a document.
    ///
    /// A variable with no runtime value and no default counts as omitted,
    /// so that the position’s own default applies.
    /// A variable declared non-null always counts as provided:
    /// binding it reports the missing value.
    pub(crate) fn from_literal(
        value: Option<&'a Node<Value>>,
        bindings: Option<&VariableBindings<'_>>,
    ) -> Self {
        let Some(value) = value else {
            return Self::Omitted;
        };
        match (&**value, bindings) {
            (Value::Null, _) => Self::ExplicitNull,
            (Value::Variable(name), Some(bindings)) if bindings.is_omitted(name) => Self::Omitted,
            _ => Self::Provided(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_only_replace_omitted_values() {
        let default = Node::new(Value::from(5));
        let one = JsonValue::Number(1.into());
        let null = JsonValue::Null;

        let provided = InputValue::from_json(Some(&one));
        assert_eq!(provided.resolve_default(Some(&default)), Resolved::Provided(&one));

        let explicit_null = InputValue::from_json(Some(&null));
        assert_eq!(explicit_null, InputValue::ExplicitNull);
        assert_eq!(explicit_null.resolve_default(Some(&default)), Resolved::ExplicitNull);

        let omitted = InputValue::from_json(None);
        assert_eq!(omitted.resolve_default(Some(&default)), Resolved::Default(&default));
        assert_eq!(omitted.resolve_default(None), Resolved::Omitted);
    }
}
