use crate::ast::Operation;
use crate::ast::Type;
use crate::ast::Value;
use crate::ast::VariableDefinition;
use crate::coercion::CoercionError;
use crate::coercion::CoercionErrorKind;
use crate::coercion::RuleExtensions;
use crate::coercion::ValidationRule;
use crate::JsonMap;
use crate::Node;
use crate::Schema;

/// Whether a variable can be used at a position expecting `expected_type`.
///
/// A nullable variable is allowed at a non-null position
/// only if it has a non-null default value, or the position has a default value.
/// Otherwise the declared type must be [assignable][Type::is_assignable_to] to the expected type.
///
/// <https://spec.graphql.org/October2021/#IsVariableUsageAllowed()>
pub fn is_variable_usage_allowed(
    variable_def: &VariableDefinition,
    expected_type: &Type,
    position_has_default: bool,
) -> bool {
    let declared_type = &*variable_def.ty;
    if expected_type.is_non_null() && !declared_type.is_non_null() {
        let has_non_null_default = variable_def
            .default_value
            .as_ref()
            .is_some_and(|default| !default.is_null());
        if !has_non_null_default && !position_has_default {
            return false;
        }
        return declared_type.is_assignable_to(expected_type.nullable());
    }
    declared_type.is_assignable_to(expected_type)
}

/// Checks every variable used in `value` against the type expected at its position.
pub(crate) fn validate_variable_usages(
    schema: &Schema,
    operation: &Operation,
    ty: &Type,
    position_has_default: bool,
    value: &Node<Value>,
    errors: &mut Vec<CoercionError>,
) {
    match &**value {
        Value::Variable(name) => {
            let Some(variable_def) = operation.variable(name) else {
                tracing::debug!(variable = %name, "reference to an undefined variable");
                return;
            };
            if !is_variable_usage_allowed(variable_def, ty, position_has_default) {
                errors.push(usage_error(variable_def, ty, value))
            }
        }
        Value::List(items) => {
            if let Some(item_type) = ty.item_type() {
                for item in items {
                    validate_variable_usages(schema, operation, item_type, false, item, errors)
                }
            }
        }
        Value::Object(entries) => {
            let Some(def) = schema.get_input_object(ty.inner_named_type()) else {
                return;
            };
            if !ty.is_named() {
                return;
            }
            for (field_name, field_value) in entries {
                if let Some(field_def) = def.fields.get(field_name) {
                    validate_variable_usages(
                        schema,
                        operation,
                        &field_def.ty,
                        field_def.default_value.is_some(),
                        field_value,
                        errors,
                    )
                }
            }
        }
        _ => {}
    }
}

fn usage_error(
    variable_def: &Node<VariableDefinition>,
    expected_type: &Type,
    usage: &Node<Value>,
) -> CoercionError {
    let mut details = JsonMap::new();
    details.insert("variableType", variable_def.ty.to_string().as_str().into());
    details.insert("expectedType", expected_type.to_string().as_str().into());
    CoercionError {
        kind: CoercionErrorKind::VariableUsageIncompatible,
        message: format!(
            "Variable < ${} > of type < {} > used in position expecting type < {expected_type} >",
            variable_def.name, variable_def.ty,
        ),
        locations: variable_def
            .location()
            .into_iter()
            .chain(usage.location())
            .collect(),
        path: Vec::new(),
        extensions: Some(RuleExtensions {
            rule: ValidationRule::VariablesInAllowedPosition,
            details,
        }),
    }
}
