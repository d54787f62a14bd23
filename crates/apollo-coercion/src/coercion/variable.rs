//! Coercion of runtime values supplied as request variables
//!
//! <https://spec.graphql.org/October2021/#sec-Coercing-Variable-Values>

use crate::ast::Operation;
use crate::ast::Type;
use crate::ast::VariableDefinition;
use crate::coercion::error::CoercionErrorKind;
use crate::coercion::path::path_to_vec;
use crate::coercion::path::DisplayPath;
use crate::coercion::path::LinkedPath;
use crate::coercion::path::LinkedPathElement;
use crate::coercion::CoercionError;
use crate::coercion::CoercionErrors;
use crate::coercion::InputCoercion;
use crate::coercion::InputValue;
use crate::coercion::Invalid;
use crate::coercion::Resolved;
use crate::response::PathElement;
use crate::schema::leaf::print_json;
use crate::schema::ExtendedType;
use crate::schema::InputObjectType;
use crate::schema::LeafCoercer;
use crate::JsonMap;
use crate::JsonValue;
use crate::Node;
use crate::NodeLocation;
use crate::Schema;
use std::fmt;

/// Coerce the values of variables from a GraphQL request to the types expected by the operation.
///
/// Variables are coerced in declaration order.
/// An omitted nullable variable without a default is absent from the result.
/// Entries of `values` that the operation does not declare are ignored.
///
/// If type coercion fails, every error is returned and the request must not be executed.
///
/// This is [CoerceVariableValues()](https://spec.graphql.org/October2021/#CoerceVariableValues())
/// in the GraphQL specification.
pub fn coerce_variable_values(
    schema: &Schema,
    operation: &Operation,
    values: &JsonMap,
) -> Result<JsonMap, CoercionErrors> {
    let mut coercion = InputCoercion::new(schema);
    let mut coerced_values = JsonMap::new();
    for variable_def in &operation.variables {
        let name = variable_def.name.as_str();
        if let Ok(Some(value)) = coercion.coerce_variable(variable_def, values.get(name), None) {
            coerced_values.insert(name, value);
        }
    }
    tracing::debug!(
        operation = operation.name.as_deref().unwrap_or(""),
        variables = operation.variables.len(),
        errors = coercion.errors.len(),
        "coerced variable values"
    );
    coercion.finish(coerced_values)
}

/// The variable being coerced, for error messages
struct VariableContext<'a> {
    definition: &'a Node<VariableDefinition>,
    /// The whole value of the variable
    root: &'a JsonValue,
    locations: Vec<NodeLocation>,
}

impl InputCoercion<'_> {
    /// `usage` is the location of the variable reference being bound, if any.
    ///
    /// Returns `Ok(None)` if a nullable variable without default was omitted.
    pub(crate) fn coerce_variable(
        &mut self,
        definition: &Node<VariableDefinition>,
        value: Option<&JsonValue>,
        usage: Option<NodeLocation>,
    ) -> Result<Option<JsonValue>, Invalid> {
        let locations = || -> Vec<NodeLocation> {
            usage.into_iter().chain(definition.location()).collect()
        };
        let ty = &*definition.ty;
        match InputValue::from_json(value).resolve_default(definition.default_value.as_ref()) {
            Resolved::Provided(value) => {
                let variable = VariableContext {
                    definition,
                    root: value,
                    locations: locations(),
                };
                self.coerce_input(&variable, None, ty, value).map(Some)
            }
            Resolved::ExplicitNull if ty.is_non_null() => {
                self.errors.push(CoercionError {
                    kind: CoercionErrorKind::NullOnNonNull,
                    message: format!(
                        "Variable < ${} > of non-null type < {ty} > must not be null",
                        definition.name
                    ),
                    locations: locations(),
                    path: Vec::new(),
                    extensions: None,
                });
                Err(Invalid)
            }
            Resolved::ExplicitNull => Ok(Some(JsonValue::Null)),
            Resolved::Default(default) => {
                tracing::trace!(variable = %definition.name, "substituting variable default");
                // Coerced on every use, never cached
                self.coerce_literal(None, None, ty, default)
            }
            Resolved::Omitted if ty.is_non_null() => {
                self.errors.push(CoercionError {
                    kind: CoercionErrorKind::MissingRequired,
                    message: format!(
                        "Variable < ${} > of required type < {ty} > was not provided",
                        definition.name
                    ),
                    locations: locations(),
                    path: Vec::new(),
                    extensions: None,
                });
                Err(Invalid)
            }
            Resolved::Omitted => Ok(None),
        }
    }

    fn coerce_input(
        &mut self,
        variable: &VariableContext<'_>,
        path: LinkedPath<'_>,
        ty: &Type,
        value: &JsonValue,
    ) -> Result<JsonValue, Invalid> {
        match ty {
            Type::NonNull(inner) => {
                if value.is_null() {
                    self.invalid_value(
                        variable,
                        CoercionErrorKind::NullOnNonNull,
                        path,
                        format_args!("Expected non-nullable type < {ty} > not to be null"),
                    );
                    return Err(Invalid);
                }
                self.coerce_input(variable, path, inner, value)
            }
            // https://spec.graphql.org/October2021/#sec-List.Input-Coercion
            Type::List(inner) => match value {
                JsonValue::Null => Ok(JsonValue::Null),
                JsonValue::Array(items) => {
                    let mut result = Ok(Vec::with_capacity(items.len()));
                    for (index, item) in items.iter().enumerate() {
                        let item_path = LinkedPathElement {
                            element: PathElement::ListIndex(index),
                            next: path,
                        };
                        match self.coerce_input(variable, Some(&item_path), inner, item) {
                            Ok(coerced) => {
                                if let Ok(vec) = &mut result {
                                    vec.push(coerced)
                                }
                            }
                            Err(Invalid) => result = Err(Invalid),
                        }
                    }
                    Ok(JsonValue::Array(result?))
                }
                // Not an array: treat the value as an array of size one
                _ => {
                    let coerced = self.coerce_input(variable, path, inner, value)?;
                    Ok(JsonValue::Array(vec![coerced]))
                }
            },
            Type::Named(type_name) => {
                if value.is_null() {
                    return Ok(JsonValue::Null);
                }
                let schema = self.schema;
                match schema.types.get(type_name) {
                    Some(ExtendedType::InputObject(def)) => {
                        self.coerce_input_object(variable, path, def, value)
                    }
                    Some(ExtendedType::Scalar(def)) => {
                        self.coerce_leaf_input(variable, &*def.coercer, path, value)
                    }
                    Some(ExtendedType::Enum(def)) => {
                        self.coerce_leaf_input(variable, &**def, path, value)
                    }
                    Some(ExtendedType::Object(_)) => {
                        self.invalid_value(
                            variable,
                            CoercionErrorKind::TypeMismatch,
                            path,
                            format_args!("Type < {type_name} > is not an input type"),
                        );
                        Err(Invalid)
                    }
                    None => {
                        self.invalid_value(
                            variable,
                            CoercionErrorKind::TypeMismatch,
                            path,
                            format_args!("Unknown type < {type_name} >"),
                        );
                        Err(Invalid)
                    }
                }
            }
        }
    }

    /// The coercer’s message is reported unmodified
    fn coerce_leaf_input(
        &mut self,
        variable: &VariableContext<'_>,
        coercer: &dyn LeafCoercer,
        path: LinkedPath<'_>,
        value: &JsonValue,
    ) -> Result<JsonValue, Invalid> {
        coercer.coerce_input(value).map_err(|message| {
            self.errors.push(CoercionError {
                kind: CoercionErrorKind::LeafCoercionFailure,
                message,
                locations: variable.locations.clone(),
                path: path_to_vec(path),
                extensions: None,
            });
            Invalid
        })
    }

    /// <https://spec.graphql.org/October2021/#sec-Input-Objects.Input-Coercion>
    fn coerce_input_object(
        &mut self,
        variable: &VariableContext<'_>,
        path: LinkedPath<'_>,
        def: &InputObjectType,
        value: &JsonValue,
    ) -> Result<JsonValue, Invalid> {
        let Some(object) = value.as_object() else {
            self.invalid_value(
                variable,
                CoercionErrorKind::TypeMismatch,
                path,
                format_args!("Expected type < {} > to be an object", def.name),
            );
            return Err(Invalid);
        };
        let mut result = Ok(JsonMap::new());
        for (field_name, field_def) in &def.fields {
            let field_path = LinkedPathElement {
                element: PathElement::Field(field_name.clone()),
                next: path,
            };
            let ty = &*field_def.ty;
            let input = InputValue::from_json(object.get(field_name.as_str()));
            let coerced = match input.resolve_default(field_def.default_value.as_ref()) {
                Resolved::Provided(field_value) => self
                    .coerce_input(variable, Some(&field_path), ty, field_value)
                    .map(Some),
                Resolved::ExplicitNull if ty.is_non_null() => {
                    self.invalid_value(
                        variable,
                        CoercionErrorKind::NullOnNonNull,
                        Some(&field_path),
                        format_args!("Expected non-nullable type < {ty} > not to be null"),
                    );
                    Err(Invalid)
                }
                Resolved::ExplicitNull => Ok(Some(JsonValue::Null)),
                Resolved::Default(default) => {
                    tracing::trace!(
                        field = %format_args!("{}.{}", def.name, field_name),
                        "substituting input field default"
                    );
                    self.coerce_literal(None, None, ty, default)
                }
                Resolved::Omitted if ty.is_non_null() => {
                    self.invalid_value(
                        variable,
                        CoercionErrorKind::MissingRequired,
                        path,
                        format_args!(
                            "Field < {}.{field_name} > of required type < {ty} > was not provided",
                            def.name
                        ),
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
        // Runtime values have no separate validation rule for unknown fields
        for key in object.keys() {
            if !def.fields.contains_key(key.as_str()) {
                self.invalid_value(
                    variable,
                    CoercionErrorKind::UnknownField,
                    path,
                    format_args!(
                        "Field < {} > is not defined by type < {} >",
                        key.as_str(),
                        def.name
                    ),
                );
                result = Err(Invalid)
            }
        }
        Ok(JsonValue::Object(result?))
    }

    /// Records an error about part of a variable value,
    /// worded as `Variable < $name > got invalid value < V >; <detail> at <path>`
    fn invalid_value(
        &mut self,
        variable: &VariableContext<'_>,
        kind: CoercionErrorKind,
        path: LinkedPath<'_>,
        detail: fmt::Arguments<'_>,
    ) {
        let path = path_to_vec(path);
        let mut message = format!(
            "Variable < ${} > got invalid value < {} >; {detail}",
            variable.definition.name,
            print_json(variable.root),
        );
        if !path.is_empty() {
            message = format!("{message} at {}", DisplayPath(&path))
        }
        self.errors.push(CoercionError {
            kind,
            message,
            locations: variable.locations.clone(),
            path,
            extensions: None,
        })
    }
}
