//! [Input coercion](https://spec.graphql.org/October2021/#sec-Input-Values):
//! converting values written in a document, or supplied as request variables,
//! to values of the type expected at their position.
//!
//! Coercion never stops at the first failure.
//! Every call returns either a fully coerced value,
//! or every error found in declaration order, never both.

use crate::ast::Operation;
use crate::ast::Type;
use crate::ast::Value;
use crate::ast::VariableDefinition;
use crate::JsonMap;
use crate::JsonValue;
use crate::Node;
use crate::Schema;

mod arguments;
mod defaults;
mod error;
mod literal;
pub(crate) mod path;
mod variable;

pub use self::arguments::coerce_argument_values;
pub use self::defaults::InputValue;
pub use self::defaults::Resolved;
pub use self::error::CoercionError;
pub use self::error::CoercionErrorKind;
pub use self::error::CoercionErrors;
pub use self::error::RuleExtensions;
pub use self::error::ValidationRule;
pub use self::variable::coerce_variable_values;

/// Marker for a failed coercion whose errors were already recorded.
///
/// Callers keep going with sibling values so that every error is found,
/// then propagate this to their own caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Invalid;

/// The variables of the operation being executed, for coercing argument values
/// that refer to them.
///
/// Variable values are the raw values from the request.
/// Each variable reference is coerced against the variable’s declared type where it is used.
#[derive(Debug, Clone, Copy)]
pub struct VariableBindings<'a> {
    pub definitions: &'a [Node<VariableDefinition>],
    pub values: &'a JsonMap,
}

/// State for one coercion call: the schema to read from and the errors found so far.
pub(crate) struct InputCoercion<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) errors: Vec<CoercionError>,
}

impl<'a> VariableBindings<'a> {
    pub fn new(operation: &'a Operation, values: &'a JsonMap) -> Self {
        Self {
            definitions: &operation.variables,
            values,
        }
    }

    pub fn definition(&self, name: &str) -> Option<&'a Node<VariableDefinition>> {
        self.definitions.iter().find(|def| def.name == name)
    }

    /// Whether a reference to this variable leaves its position omitted:
    /// no runtime value, no default, and a nullable declared type.
    /// An undefined variable counts as omitted.
    pub(crate) fn is_omitted(&self, name: &str) -> bool {
        if self.values.contains_key(name) {
            return false;
        }
        match self.definition(name) {
            Some(def) => def.default_value.is_none() && !def.ty.is_non_null(),
            None => true,
        }
    }
}

impl<'a> InputCoercion<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            errors: Vec::new(),
        }
    }

    /// Returns `value` if no error was recorded
    pub(crate) fn finish<T>(self, value: T) -> Result<T, CoercionErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(CoercionErrors {
                errors: self.errors,
            })
        }
    }
}

/// Coerce a value written in a document against the type `ty`.
///
/// With `bindings`, variable references are replaced by their coerced runtime values.
/// Without, as when checking a default value before execution,
/// variable references are left for [`validate_operation`][crate::validation::validate_operation]
/// to check against their declared type, and coerce to `null`.
///
/// Returns `None` if the value is a reference to a variable left omitted.
pub fn coerce_literal_value(
    schema: &Schema,
    ty: &Type,
    value: &Node<Value>,
    bindings: Option<&VariableBindings<'_>>,
) -> Result<Option<JsonValue>, CoercionErrors> {
    let mut coercion = InputCoercion::new(schema);
    let result = coercion.coerce_literal(bindings, None, ty, value);
    debug_assert_eq!(result.is_err(), !coercion.errors.is_empty());
    coercion.finish(result.ok().flatten())
}

/// Coerce the runtime value of one variable against its declared type.
///
/// `value` is the entry for this variable in the request, if any.
/// Returns `None` if a nullable variable without default was omitted.
pub fn coerce_variable_value(
    schema: &Schema,
    definition: &Node<VariableDefinition>,
    value: Option<&JsonValue>,
) -> Result<Option<JsonValue>, CoercionErrors> {
    let mut coercion = InputCoercion::new(schema);
    let result = coercion.coerce_variable(definition, value, None);
    debug_assert_eq!(result.is_err(), !coercion.errors.is_empty());
    coercion.finish(result.ok().flatten())
}
