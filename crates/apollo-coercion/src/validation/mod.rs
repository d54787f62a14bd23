//! Static rules about input values, checked for a whole operation before execution.
//!
//! These run without variable values:
//! variable references are checked against their declared type
//! instead of being coerced.

use crate::ast::Field;
use crate::ast::Operation;
use crate::coercion::CoercionErrors;
use crate::coercion::InputCoercion;
use crate::schema::FieldDefinition;
use crate::ExecutableDocument;
use crate::Node;
use crate::Schema;

mod input_fields;
mod variable_usage;

pub use self::variable_usage::is_variable_usage_allowed;

/// Checks every operation of `document` against `schema`:
///
/// * [Values of Correct Type](https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type),
///   for variable default values and argument values
/// * [Input Object Field Names](https://spec.graphql.org/October2021/#sec-Input-Object-Field-Names)
/// * [All Variable Usages Are Allowed](https://spec.graphql.org/October2021/#sec-All-Variable-Usages-are-Allowed)
///
/// Fields and arguments the schema does not define are skipped.
pub fn validate_operation(
    schema: &Schema,
    document: &ExecutableDocument,
) -> Result<(), CoercionErrors> {
    let mut coercion = InputCoercion::new(schema);
    for operation in &document.operations {
        validate_variable_defaults(&mut coercion, operation);
        let Some(root) = schema.root_operation(operation.operation_type) else {
            tracing::debug!(
                operation_type = ?operation.operation_type,
                "schema has no root type for operation"
            );
            continue;
        };
        validate_selection_set(&mut coercion, operation, root, &operation.selection_set);
    }
    tracing::debug!(
        operations = document.operations.len(),
        errors = coercion.errors.len(),
        "validated input values"
    );
    coercion.finish(())
}

fn validate_variable_defaults(coercion: &mut InputCoercion<'_>, operation: &Operation) {
    for variable_def in &operation.variables {
        let Some(default) = &variable_def.default_value else {
            continue;
        };
        // Errors are recorded in `coercion`
        let _ = coercion.coerce_literal(None, None, &variable_def.ty, default);
        input_fields::validate_input_fields(
            coercion.schema,
            &variable_def.ty,
            default,
            &mut coercion.errors,
        );
    }
}

fn validate_selection_set(
    coercion: &mut InputCoercion<'_>,
    operation: &Operation,
    parent_type: &str,
    selection_set: &[Node<Field>],
) {
    let schema = coercion.schema;
    for field in selection_set {
        let Some(field_def) = schema.type_field(parent_type, &field.name) else {
            tracing::trace!(
                field = %format_args!("{parent_type}.{}", field.name),
                "skipping undefined field"
            );
            continue;
        };
        validate_arguments(coercion, operation, field_def, field);
        if !field.selection_set.is_empty() {
            let field_type = field_def.ty.inner_named_type();
            validate_selection_set(coercion, operation, field_type, &field.selection_set)
        }
    }
}

fn validate_arguments(
    coercion: &mut InputCoercion<'_>,
    operation: &Operation,
    field_def: &FieldDefinition,
    field: &Field,
) {
    for argument in &field.arguments {
        let Some(arg_def) = field_def.argument_by_name(&argument.name) else {
            continue;
        };
        // Errors are recorded in `coercion`
        let _ = coercion.coerce_literal(None, None, &arg_def.ty, &argument.value);
        input_fields::validate_input_fields(
            coercion.schema,
            &arg_def.ty,
            &argument.value,
            &mut coercion.errors,
        );
        variable_usage::validate_variable_usages(
            coercion.schema,
            operation,
            &arg_def.ty,
            arg_def.default_value.is_some(),
            &argument.value,
            &mut coercion.errors,
        );
    }
}
