//! Coercion of values written in a document
//!
//! <https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type>

use crate::ast::Type;
use crate::ast::Value;
use crate::coercion::error::CoercionErrorKind;
use crate::coercion::error::RuleExtensions;
use crate::coercion::error::ValidationRule;
use crate::coercion::path::path_to_vec;
use crate::coercion::path::LinkedPath;
use crate::coercion::path::LinkedPathElement;
use crate::coercion::CoercionError;
use crate::coercion::InputCoercion;
use crate::coercion::InputValue;
use crate::coercion::Invalid;
use crate::coercion::Resolved;
use crate::coercion::VariableBindings;
use crate::response::PathElement;
use crate::schema::ExtendedType;
use crate::schema::InputObjectType;
use crate::schema::LeafCoercer;
use crate::JsonMap;
use crate::JsonValue;
use crate::Name;
use crate::Node;
use crate::NodeLocation;

impl InputCoercion<'_> {
    /// Returns `Ok(None)` only for a reference to an omitted variable.
    pub(crate) fn coerce_literal(
        &mut self,
        bindings: Option<&VariableBindings<'_>>,
        path: LinkedPath<'_>,
        ty: &Type,
        value: &Node<Value>,
    ) -> Result<Option<JsonValue>, Invalid> {
        if let Value::Variable(name) = &**value {
            let Some(bindings) = bindings else {
                // Not followed when checking a constant position,
                // usages are checked against the variable’s declared type instead
                return Ok(Some(JsonValue::Null));
            };
            return self.coerce_variable_reference(bindings, path, ty, name, value.location());
        }
        match ty {
            Type::NonNull(inner) => {
                if value.is_null() {
                    self.literal_error(
                        CoercionErrorKind::NullOnNonNull,
                        format!("Expected value of type <{ty}>, found <null>"),
                        path,
                        ty,
                        value,
                    );
                    return Err(Invalid);
                }
                self.coerce_literal(bindings, path, inner, value)
            }
            // https://spec.graphql.org/October2021/#sec-List.Input-Coercion
            Type::List(inner) => match &**value {
                Value::Null => Ok(Some(JsonValue::Null)),
                Value::List(items) => {
                    let mut result = Ok(Vec::with_capacity(items.len()));
                    for (index, item) in items.iter().enumerate() {
                        let item_path = LinkedPathElement {
                            element: PathElement::ListIndex(index),
                            next: path,
                        };
                        match self.coerce_literal(bindings, Some(&item_path), inner, item) {
                            Ok(coerced) => {
                                if let Ok(vec) = &mut result {
                                    vec.push(coerced.unwrap_or(JsonValue::Null))
                                }
                            }
                            Err(Invalid) => result = Err(Invalid),
                        }
                    }
                    Ok(Some(JsonValue::Array(result?)))
                }
                // Not a list: treat the value as a list of size one
                _ => {
                    let coerced = self.coerce_literal(bindings, path, inner, value)?;
                    Ok(Some(JsonValue::Array(vec![
                        coerced.unwrap_or(JsonValue::Null)
                    ])))
                }
            },
            Type::Named(type_name) => {
                if value.is_null() {
                    return Ok(Some(JsonValue::Null));
                }
                let schema = self.schema;
                match schema.types.get(type_name) {
                    Some(ExtendedType::InputObject(def)) => {
                        self.coerce_literal_object(bindings, path, ty, def, value)
                    }
                    Some(ExtendedType::Scalar(def)) => {
                        self.coerce_leaf_literal(&*def.coercer, path, ty, value)
                    }
                    Some(ExtendedType::Enum(def)) => {
                        self.coerce_leaf_literal(&**def, path, ty, value)
                    }
                    Some(ExtendedType::Object(_)) => {
                        self.literal_error(
                            CoercionErrorKind::TypeMismatch,
                            format!("Type < {type_name} > is not an input type"),
                            path,
                            ty,
                            value,
                        );
                        Err(Invalid)
                    }
                    None => {
                        self.literal_error(
                            CoercionErrorKind::TypeMismatch,
                            format!("Unknown type < {type_name} >"),
                            path,
                            ty,
                            value,
                        );
                        Err(Invalid)
                    }
                }
            }
        }
    }

    fn coerce_leaf_literal(
        &mut self,
        coercer: &dyn LeafCoercer,
        path: LinkedPath<'_>,
        ty: &Type,
        value: &Node<Value>,
    ) -> Result<Option<JsonValue>, Invalid> {
        match coercer.coerce_literal(value) {
            Ok(coerced) => Ok(Some(coerced)),
            Err(message) => {
                self.literal_error(
                    CoercionErrorKind::LeafCoercionFailure,
                    message,
                    path,
                    ty,
                    value,
                );
                Err(Invalid)
            }
        }
    }

    /// <https://spec.graphql.org/October2021/#sec-Input-Objects.Input-Coercion>
    fn coerce_literal_object(
        &mut self,
        bindings: Option<&VariableBindings<'_>>,
        path: LinkedPath<'_>,
        ty: &Type,
        def: &InputObjectType,
        value: &Node<Value>,
    ) -> Result<Option<JsonValue>, Invalid> {
        let Value::Object(entries) = &**value else {
            self.literal_error(
                CoercionErrorKind::TypeMismatch,
                format!("Expected value of type <{}>, found <{value}>", def.name),
                path,
                ty,
                value,
            );
            return Err(Invalid);
        };
        let mut result = Ok(JsonMap::new());
        for (field_name, field_def) in &def.fields {
            let entry = entries
                .iter()
                .find(|(name, _)| name == field_name)
                .map(|(_, value)| value);
            let field_path = LinkedPathElement {
                element: PathElement::Field(field_name.clone()),
                next: path,
            };
            let input = InputValue::from_literal(entry, bindings);
            let coerced = match input.resolve_default(field_def.default_value.as_ref()) {
                Resolved::Provided(field_value) => {
                    self.coerce_literal(bindings, Some(&field_path), &field_def.ty, field_value)
                }
                Resolved::ExplicitNull => match entry {
                    Some(null) => {
                        self.coerce_literal(bindings, Some(&field_path), &field_def.ty, null)
                    }
                    None => Ok(Some(JsonValue::Null)),
                },
                Resolved::Default(default) => {
                    tracing::trace!(
                        field = %format_args!("{}.{}", def.name, field_name),
                        "substituting input field default"
                    );
                    // Default values are constant: never resolve variables inside them
                    self.coerce_literal(None, None, &field_def.ty, default)
                }
                Resolved::Omitted if field_def.ty.is_non_null() => {
                    self.literal_error(
                        CoercionErrorKind::MissingRequired,
                        format!(
                            "Field < {}.{field_name} > of required type < {} > was not provided",
                            def.name, field_def.ty
                        ),
                        path,
                        ty,
                        value,
                    );
                    Err(Invalid)
                }
                Resolved::Omitted => Ok(None),
            };
            match coerced {
                Ok(Some(coerced)) => {
                    if let Ok(map) = &mut result {
                        map.insert(field_name.as_str(), coerced);
                    }
                }
                Ok(None) => {}
                Err(Invalid) => result = Err(Invalid),
            }
        }
        Ok(Some(JsonValue::Object(result?)))
    }

    /// Coerces the runtime value of a variable where it is used,
    /// against the variable’s declared type.
    ///
    /// Whether that type is allowed at this position is a separate static check.
    fn coerce_variable_reference(
        &mut self,
        bindings: &VariableBindings<'_>,
        path: LinkedPath<'_>,
        ty: &Type,
        name: &Name,
        usage: Option<NodeLocation>,
    ) -> Result<Option<JsonValue>, Invalid> {
        let def = bindings.definition(name);
        let coerced = match def {
            Some(def) => {
                let first_error = self.errors.len();
                let coerced = self.coerce_variable(def, bindings.values.get(name.as_str()), usage);
                // Paths of binding errors start at the argument, not at the variable
                let prefix = path_to_vec(path);
                if !prefix.is_empty() {
                    for error in &mut self.errors[first_error..] {
                        error.path.splice(0..0, prefix.iter().cloned());
                    }
                }
                coerced?
            }
            None => {
                tracing::debug!(variable = %name, "reference to an undefined variable");
                None
            }
        };
        match (coerced, def) {
            (None | Some(JsonValue::Null), _) if ty.is_non_null() => {
                self.errors.push(CoercionError {
                    kind: CoercionErrorKind::NullOnNonNull,
                    message: format!("Expected value of type <{ty}>, found <null>"),
                    locations: usage
                        .into_iter()
                        .chain(def.and_then(|def| def.location()))
                        .collect(),
                    path: path_to_vec(path),
                    extensions: None,
                });
                Err(Invalid)
            }
            (Some(value), Some(def)) => Ok(Some(promote_to_list(ty, &def.ty, value))),
            (coerced, _) => Ok(coerced),
        }
    }

    fn literal_error(
        &mut self,
        kind: CoercionErrorKind,
        message: String,
        path: LinkedPath<'_>,
        ty: &Type,
        value: &Node<Value>,
    ) {
        let mut details = JsonMap::new();
        details.insert("expectedType", ty.to_string().as_str().into());
        details.insert("value", value.to_string().as_str().into());
        self.errors.push(CoercionError {
            kind,
            message,
            locations: value.location().into_iter().collect(),
            path: path_to_vec(path),
            extensions: Some(RuleExtensions {
                rule: ValidationRule::ValuesOfCorrectType,
                details,
            }),
        })
    }
}

/// Wraps a variable value in one list for each list level that `ty` has
/// beyond the variable’s declared type, like a literal at that position.
fn promote_to_list(ty: &Type, declared: &Type, value: JsonValue) -> JsonValue {
    let Some(item_type) = ty.item_type() else {
        return value;
    };
    match (declared.item_type(), value) {
        (_, JsonValue::Null) => JsonValue::Null,
        (Some(declared_item), JsonValue::Array(items)) => JsonValue::Array(
            items
                .into_iter()
                .map(|item| promote_to_list(item_type, declared_item, item))
                .collect(),
        ),
        (_, value) => JsonValue::Array(vec![promote_to_list(item_type, declared, value)]),
    }
}
