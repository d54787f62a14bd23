//! *Abstract Syntax Tree* for the parts of GraphQL documents that input coercion reads:
//! type references, values, and operations with their variable definitions and field arguments.
//!
//! Nodes are wrapped in [`Node`], which carries the source location
//! that coercion errors point to.
//!
//! [`Type`] and [`Value`] implement [`Display`][std::fmt::Display]
//! by serializing to GraphQL syntax, as used in error messages.

use crate::Name;
use crate::Node;

pub(crate) mod from_cst;
mod serialize;

/// Refers to the name of a GraphQL type defined elsewhere
pub type NamedType = Name;

/// A reference to a type at some input position:
/// an argument, an input object field, or a variable.
///
/// `NonNull` never directly wraps another `NonNull`.
/// [`SchemaBuilder::build`][crate::schema::SchemaBuilder::build] rejects schemas that do,
/// and the parser cannot produce one.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    /// A named type, such as `Int` or `PointInput`
    Named(NamedType),
    /// `[T]`
    List(Box<Type>),
    /// `T!`
    NonNull(Box<Type>),
}

/// A GraphQL value as written in a document.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Value {
    Null,
    Enum(Name),
    Variable(Name),
    String(String),
    Float(FloatValue),
    Int(IntValue),
    Boolean(bool),
    List(Vec<Node<Value>>),
    Object(Vec<(Name, Node<Value>)>),
}

/// An integer literal, kept as source text.
///
/// Leaf coercers decide what range to accept.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct IntValue(String);

/// A float literal, kept as source text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FloatValue(String);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

/// An operation with its variable definitions and top-level fields.
///
/// Fragments and directives do not affect coercion and are not kept.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Operation {
    pub operation_type: OperationType,
    pub name: Option<Name>,
    pub variables: Vec<Node<VariableDefinition>>,
    pub selection_set: Vec<Node<Field>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VariableDefinition {
    pub name: Name,
    pub ty: Node<Type>,
    pub default_value: Option<Node<Value>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Node<Argument>>,
    pub selection_set: Vec<Node<Field>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Argument {
    pub name: Name,
    pub value: Node<Value>,
}

/// The operations of a parsed executable document,
/// together with the source text their locations point into.
///
/// Create with [`Parser::parse_executable`][crate::Parser::parse_executable]
/// or [`ExecutableDocument::parse`].
#[derive(Clone, Debug)]
pub struct ExecutableDocument {
    pub sources: crate::SourceMap,
    pub operations: Vec<Node<Operation>>,
}

/// Returned by [`ExecutableDocument::get_operation`]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GetOperationError {
    #[error("the document does not contain any operation")]
    NoOperations,
    #[error("an operation name is required when the document contains several operations")]
    AnonymousWithSeveral,
    #[error("no operation named `{0}` in the document")]
    NotFound(String),
}

impl ExecutableDocument {
    /// Parse an executable document with the default parser configuration
    pub fn parse(
        source_text: impl Into<String>,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::parser::ParseErrors> {
        crate::Parser::new().parse_executable(source_text, path)
    }

    /// Selects the operation to execute.
    ///
    /// With `None`, the document must contain exactly one operation.
    pub fn get_operation(&self, name: Option<&str>) -> Result<&Node<Operation>, GetOperationError> {
        match name {
            Some(name) => self
                .operations
                .iter()
                .find(|op| op.name.as_ref().is_some_and(|n| n == name))
                .ok_or_else(|| GetOperationError::NotFound(name.to_owned())),
            None => match self.operations.as_slice() {
                [] => Err(GetOperationError::NoOperations),
                [single] => Ok(single),
                _ => Err(GetOperationError::AnonymousWithSeveral),
            },
        }
    }
}

impl Type {
    /// Returns a new `Type::Named`
    pub fn named(name: NamedType) -> Self {
        Type::Named(name)
    }

    /// Parse a type reference such as `[Int!]!`
    pub fn parse(source_text: &str) -> Result<Self, crate::parser::ParseErrors> {
        crate::Parser::new().parse_type(source_text, "type.graphql")
    }

    /// Returns this type made non-null, if it isn’t already.
    pub fn non_null(self) -> Self {
        match self {
            Type::NonNull(_) => self,
            _ => Type::NonNull(Box::new(self)),
        }
    }

    /// Returns a list type whose items are this type.
    pub fn list(self) -> Self {
        Type::List(Box::new(self))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Type::NonNull(_))
    }

    /// Whether this is a list type, nullable or not.
    pub fn is_list(&self) -> bool {
        matches!(self.nullable(), Type::List(_))
    }

    pub fn is_named(&self) -> bool {
        matches!(self.nullable(), Type::Named(_))
    }

    /// Returns the type with one level of non-null removed, or `self` if it is nullable.
    pub fn nullable(&self) -> &Type {
        match self {
            Type::NonNull(inner) => &**inner,
            _ => self,
        }
    }

    /// Returns the type directly wrapped by `List` or `NonNull`, or `None` for a named type.
    pub fn wrapped(&self) -> Option<&Type> {
        match self {
            Type::Named(_) => None,
            Type::List(inner) | Type::NonNull(inner) => Some(&**inner),
        }
    }

    /// If this is a list type (nullable or not), returns the type of its items.
    pub fn item_type(&self) -> Option<&Type> {
        match self.nullable() {
            Type::List(inner) => Some(&**inner),
            _ => None,
        }
    }

    /// Returns the inner named type, after unwrapping any non-null or list markers.
    pub fn inner_named_type(&self) -> &NamedType {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.inner_named_type(),
        }
    }

    /// Whether a variable declared with type `self`
    /// can be used at a position expecting `expected`.
    ///
    /// This is structural type compatibility, not value coercion:
    /// a nullable list item is never assignable to a non-null list item.
    ///
    /// <https://spec.graphql.org/October2021/#AreTypesCompatible()>
    pub fn is_assignable_to(&self, expected: &Type) -> bool {
        match (expected, self) {
            (Type::NonNull(expected), Type::NonNull(declared)) => {
                declared.is_assignable_to(expected)
            }
            (Type::NonNull(_), _) => false,
            (_, Type::NonNull(declared)) => declared.is_assignable_to(expected),
            (Type::List(expected), Type::List(declared)) => declared.is_assignable_to(expected),
            (Type::List(_), _) | (_, Type::List(_)) => false,
            (Type::Named(expected), Type::Named(declared)) => expected == declared,
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The kind of this value, as used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Enum(_) => "Enum",
            Value::Variable(_) => "Variable",
            Value::String(_) => "String",
            Value::Float(_) => "Float",
            Value::Int(_) => "Int",
            Value::Boolean(_) => "Boolean",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
        }
    }

    pub fn as_enum(&self) -> Option<&Name> {
        if let Value::Enum(name) = self {
            Some(name)
        } else {
            None
        }
    }

    pub fn as_variable(&self) -> Option<&Name> {
        if let Value::Variable(name) = self {
            Some(name)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(value) = self {
            Some(value)
        } else {
            None
        }
    }

    pub fn to_bool(&self) -> Option<bool> {
        if let Value::Boolean(value) = *self {
            Some(value)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Node<Value>]> {
        if let Value::List(value) = self {
            Some(value)
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&[(Name, Node<Value>)]> {
        if let Value::Object(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

impl IntValue {
    /// Constructs from a string matching the [`IntValue`
    /// grammar specification](https://spec.graphql.org/October2021/#IntValue)
    pub fn new_parsed(text: &str) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to `i32`, returning an error on overflow
    pub fn try_to_i32(&self) -> Result<i32, std::num::ParseIntError> {
        self.0.parse()
    }

    /// Converts to `f64`, which may be lossy or infinite for very large integers
    pub fn try_to_f64(&self) -> Result<f64, std::num::ParseFloatError> {
        self.0.parse()
    }
}

impl FloatValue {
    /// Constructs from a string matching the [`FloatValue`
    /// grammar specification](https://spec.graphql.org/October2021/#FloatValue)
    pub fn new_parsed(text: &str) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn try_to_f64(&self) -> Result<f64, std::num::ParseFloatError> {
        self.0.parse()
    }
}

impl From<i32> for IntValue {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<f64> for FloatValue {
    fn from(value: f64) -> Self {
        let mut text = value.to_string();
        if !text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
            text.push_str(".0")
        }
        Self(text)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&'_ str> for Value {
    fn from(value: &'_ str) -> Self {
        Value::String(value.to_owned())
    }
}

impl Operation {
    /// Returns the definition of the variable with the given name, if any
    pub fn variable(&self, name: &str) -> Option<&Node<VariableDefinition>> {
        self.variables.iter().find(|def| def.name == name)
    }
}

impl Field {
    /// The response key for this field: the alias if there is one, or the field name
    pub fn response_key(&self) -> &Name {
        self.alias.as_ref().unwrap_or(&self.name)
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&Node<Argument>> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}
