use crate::ast::Type;
use crate::ast::Value;
use crate::coercion::CoercionError;
use crate::coercion::CoercionErrorKind;
use crate::coercion::RuleExtensions;
use crate::coercion::ValidationRule;
use crate::JsonMap;
use crate::Node;
use crate::Schema;

/// Reports fields of object values that their input object type does not define.
///
/// Coercion ignores such fields in values written in a document.
/// Variable references are not followed.
pub(crate) fn validate_input_fields(
    schema: &Schema,
    ty: &Type,
    value: &Node<Value>,
    errors: &mut Vec<CoercionError>,
) {
    match (ty.nullable(), &**value) {
        (Type::List(item_type), Value::List(items)) => {
            for item in items {
                validate_input_fields(schema, item_type, item, errors)
            }
        }
        // A single value coerced as a list of size one
        (Type::List(item_type), _) => validate_input_fields(schema, item_type, value, errors),
        (Type::Named(type_name), Value::Object(entries)) => {
            let Some(def) = schema.get_input_object(type_name) else {
                return;
            };
            for (field_name, field_value) in entries {
                if let Some(field_def) = def.fields.get(field_name) {
                    validate_input_fields(schema, &field_def.ty, field_value, errors);
                    continue;
                }
                let mut details = JsonMap::new();
                details.insert("type", def.name.as_str().into());
                details.insert("field", field_name.as_str().into());
                errors.push(CoercionError {
                    kind: CoercionErrorKind::UnknownField,
                    message: format!(
                        "Field < {field_name} > is not defined by type < {} >",
                        def.name
                    ),
                    locations: field_name
                        .location()
                        .or(field_value.location())
                        .into_iter()
                        .collect(),
                    path: Vec::new(),
                    extensions: Some(RuleExtensions {
                        rule: ValidationRule::InputFieldsDefined,
                        details,
                    }),
                })
            }
        }
        _ => {}
    }
}
