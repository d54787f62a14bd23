use crate::ast::Field;
use crate::coercion::error::CoercionErrorKind;
use crate::coercion::CoercionError;
use crate::coercion::CoercionErrors;
use crate::coercion::InputCoercion;
use crate::coercion::InputValue;
use crate::coercion::Invalid;
use crate::coercion::Resolved;
use crate::coercion::VariableBindings;
use crate::schema::FieldDefinition;
use crate::JsonMap;
use crate::JsonValue;
use crate::Node;
use crate::Schema;

/// Coerce the arguments of a field selection to the types of the field’s definition.
///
/// Arguments are coerced in the order of the field definition.
/// Variable references are bound to the request’s variable values:
/// a variable with no value and no default leaves its argument omitted,
/// so that the argument’s own default applies.
/// An omitted nullable argument without a default is absent from the result.
///
/// Arguments the definition does not have are ignored here.
///
/// This is [CoerceArgumentValues()](https://spec.graphql.org/October2021/#CoerceArgumentValues())
/// in the GraphQL specification.
pub fn coerce_argument_values(
    schema: &Schema,
    field_def: &FieldDefinition,
    field: &Node<Field>,
    bindings: &VariableBindings<'_>,
) -> Result<JsonMap, CoercionErrors> {
    let mut coercion = InputCoercion::new(schema);
    let mut coerced_values = JsonMap::new();
    for arg_def in &field_def.arguments {
        let arg_value = field
            .argument_by_name(&arg_def.name)
            .map(|argument| &argument.value);
        let ty = &*arg_def.ty;
        let input = InputValue::from_literal(arg_value, Some(bindings));
        let result = match input.resolve_default(arg_def.default_value.as_ref()) {
            Resolved::Provided(value) => coercion.coerce_literal(Some(bindings), None, ty, value),
            Resolved::ExplicitNull => match arg_value {
                Some(null) => coercion.coerce_literal(Some(bindings), None, ty, null),
                None => Ok(Some(JsonValue::Null)),
            },
            Resolved::Default(default) => {
                tracing::trace!(argument = %arg_def.name, "substituting argument default");
                coercion.coerce_literal(None, None, ty, default)
            }
            Resolved::Omitted if ty.is_non_null() => {
                coercion.errors.push(CoercionError {
                    kind: CoercionErrorKind::MissingRequired,
                    message: format!(
                        "Argument < {} > of required type < {ty} > was not provided",
                        arg_def.name
                    ),
                    locations: field.location().into_iter().collect(),
                    path: Vec::new(),
                    extensions: None,
                });
                Err(Invalid)
            }
            Resolved::Omitted => Ok(None),
        };
        if let Ok(Some(value)) = result {
            coerced_values.insert(arg_def.name.as_str(), value);
        }
    }
    tracing::debug!(
        field = %field_def.name,
        arguments = field_def.arguments.len(),
        errors = coercion.errors.len(),
        "coerced argument values"
    );
    coercion.finish(coerced_values)
}
