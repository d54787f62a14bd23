use crate::response::GraphQLError;
use crate::response::GraphQLLocation;
use crate::response::PathElement;
use crate::JsonMap;
use crate::JsonValue;
use crate::NodeLocation;
use crate::SourceMap;

/// One coercion failure. Coercion reports every independent failure it finds,
/// so these come in a [`CoercionErrors`] list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CoercionError {
    pub kind: CoercionErrorKind,
    pub message: String,

    /// Source locations of the offending nodes.
    ///
    /// For a value bound from a variable: the variable usage, then the variable definition.
    /// Nodes without a source location, such as programmatic schema defaults, are skipped.
    pub locations: Vec<NodeLocation>,

    /// Where in the coerced value the failure is, relative to the root of that value:
    /// an argument, a variable, or a default value.
    pub path: Vec<PathElement>,

    /// Present for violations of a validation rule by a literal or default value.
    /// Absent for errors about runtime variable values.
    pub extensions: Option<RuleExtensions>,
}

/// What kind of failure a [`CoercionError`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoercionErrorKind {
    /// The shape of a value does not match its expected type,
    /// for example a string where an input object is expected
    TypeMismatch,
    /// Null, explicitly or through a variable, where a non-null type is expected
    NullOnNonNull,
    /// A non-null argument, input field, or variable with no default was omitted
    MissingRequired,
    /// A scalar or enum coercer rejected the value
    LeafCoercionFailure,
    /// A variable is used at a position whose type it is not compatible with
    VariableUsageIncompatible,
    /// An input object value has a field its type does not define
    UnknownField,
}

/// A validation rule that a [`CoercionError`] reports a violation of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// <https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type>
    ValuesOfCorrectType,
    /// <https://spec.graphql.org/October2021/#sec-All-Variable-Usages-are-Allowed>
    VariablesInAllowedPosition,
    /// <https://spec.graphql.org/October2021/#sec-Input-Object-Field-Names>
    InputFieldsDefined,
}

/// The `extensions` entry of an error about a rule violation
#[derive(Debug, Clone, PartialEq)]
pub struct RuleExtensions {
    pub rule: ValidationRule,
    /// Machine-readable data about the violation, such as the expected type
    pub details: JsonMap,
}

/// Returned when coercion fails. Contains every error found, in order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
pub struct CoercionErrors {
    pub errors: Vec<CoercionError>,
}

impl CoercionErrorKind {
    /// A short identifier for the `tag` response extension
    pub fn tag(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type-mismatch",
            Self::NullOnNonNull => "null-on-non-null",
            Self::MissingRequired => "missing-required",
            Self::LeafCoercionFailure => "leaf-coercion-failure",
            Self::VariableUsageIncompatible => "variable-usage-incompatible",
            Self::UnknownField => "unknown-field",
        }
    }
}

impl ValidationRule {
    /// A short identifier for the `rule` response extension
    pub fn name(self) -> &'static str {
        match self {
            Self::ValuesOfCorrectType => "values-of-correct-type",
            Self::VariablesInAllowedPosition => "variables-in-allowed-position",
            Self::InputFieldsDefined => "input-fields-defined",
        }
    }

    /// The section of the GraphQL specification defining this rule
    pub fn spec_url(self) -> &'static str {
        match self {
            Self::ValuesOfCorrectType => {
                "https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type"
            }
            Self::VariablesInAllowedPosition => {
                "https://spec.graphql.org/October2021/#sec-All-Variable-Usages-are-Allowed"
            }
            Self::InputFieldsDefined => {
                "https://spec.graphql.org/October2021/#sec-Input-Object-Field-Names"
            }
        }
    }
}

impl CoercionError {
    /// Convert to the error format of a GraphQL response,
    /// using `sources` to compute line and column numbers.
    pub fn to_graphql_error(&self, sources: &SourceMap) -> GraphQLError {
        let mut extensions = JsonMap::new();
        if let Some(rule_extensions) = &self.extensions {
            let rule = rule_extensions.rule;
            extensions.insert("spec", rule.spec_url().into());
            extensions.insert("rule", rule.name().into());
            extensions.insert("tag", self.kind.tag().into());
            extensions.insert(
                "details",
                JsonValue::Object(rule_extensions.details.clone()),
            );
        }
        GraphQLError {
            message: self.message.clone(),
            locations: self
                .locations
                .iter()
                .filter_map(|&location| GraphQLLocation::from_node(sources, Some(location)))
                .collect(),
            path: if self.path.is_empty() {
                None
            } else {
                Some(self.path.clone())
            },
            extensions,
        }
    }
}

impl CoercionErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoercionError> {
        self.errors.iter()
    }

    /// Convert every error to the error format of a GraphQL response
    pub fn to_graphql_errors(&self, sources: &SourceMap) -> Vec<GraphQLError> {
        self.errors
            .iter()
            .map(|error| error.to_graphql_error(sources))
            .collect()
    }
}

impl IntoIterator for CoercionErrors {
    type Item = CoercionError;
    type IntoIter = std::vec::IntoIter<CoercionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a CoercionErrors {
    type Item = &'a CoercionError;
    type IntoIter = std::slice::Iter<'a, CoercionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
