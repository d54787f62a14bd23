//! The type registry that coercion reads from.
//!
//! A [`Schema`] is built once with [`SchemaBuilder`], then shared read-only
//! (for example in an `Arc`) by every request that coerces values against it.

use crate::ast;
use crate::JsonValue;
use crate::Name;
use crate::Node;
use indexmap::IndexMap;
use std::sync::Arc;

mod builder;
pub mod leaf;

pub use self::builder::SchemaBuildError;
pub use self::builder::SchemaBuilder;
pub use self::leaf::LeafCoercer;
pub use crate::ast::NamedType;
pub use crate::ast::Type;
pub use crate::ast::Value;

/// Named types, and the root operation types that field arguments are looked up from.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Built-in scalars, then types in the order they were added to the builder
    pub types: IndexMap<NamedType, ExtendedType>,

    /// Name of the object type for the `query` root operation
    pub query: Option<NamedType>,

    /// Name of the object type for the `mutation` root operation
    pub mutation: Option<NamedType>,

    /// Name of the object type for the `subscription` root operation
    pub subscription: Option<NamedType>,
}

/// The definition of a named type
#[derive(Debug, Clone)]
pub enum ExtendedType {
    Scalar(Node<ScalarType>),
    Object(Node<ObjectType>),
    Enum(Node<EnumType>),
    InputObject(Node<InputObjectType>),
}

/// A scalar type and the coercer for its values
#[derive(Debug, Clone)]
pub struct ScalarType {
    pub name: Name,
    pub coercer: Arc<dyn LeafCoercer>,
}

/// An output object type. Only its field arguments matter for coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    pub name: Name,
    pub fields: IndexMap<Name, Node<FieldDefinition>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: Name,
    pub values: IndexMap<Name, EnumValueDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub value: Name,
    /// What coercion produces for this value. By default, the value’s name as a string.
    pub internal_value: JsonValue,
}

/// An input object type: an ordered table of input fields.
///
/// Declaration order is observable: fields are coerced,
/// and their errors reported, in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    pub name: Name,
    pub fields: IndexMap<Name, Node<InputValueDefinition>>,
}

/// A field of an output object type, with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDefinition {
    pub name: Name,
    pub arguments: Vec<Node<InputValueDefinition>>,
    pub ty: Type,
}

/// An argument of a field, or a field of an input object type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputValueDefinition {
    pub name: Name,
    pub ty: Node<Type>,
    /// A constant literal. It is coerced against `ty` each time it is used.
    pub default_value: Option<Node<Value>>,
}

impl Schema {
    /// Returns a new builder with the built-in scalars already registered
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Returns the type with the given name, if it is a scalar type
    pub fn get_scalar(&self, name: &str) -> Option<&Node<ScalarType>> {
        if let Some(ExtendedType::Scalar(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a object type
    pub fn get_object(&self, name: &str) -> Option<&Node<ObjectType>> {
        if let Some(ExtendedType::Object(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a enum type
    pub fn get_enum(&self, name: &str) -> Option<&Node<EnumType>> {
        if let Some(ExtendedType::Enum(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a input object type
    pub fn get_input_object(&self, name: &str) -> Option<&Node<InputObjectType>> {
        if let Some(ExtendedType::InputObject(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the coercer for a scalar or enum type
    pub fn leaf_coercer(&self, name: &str) -> Option<&dyn LeafCoercer> {
        match self.types.get(name)? {
            ExtendedType::Scalar(ty) => Some(&*ty.coercer),
            ExtendedType::Enum(ty) => Some(&**ty),
            ExtendedType::Object(_) | ExtendedType::InputObject(_) => None,
        }
    }

    /// Returns the name of the object type for the root operation with the given operation kind
    pub fn root_operation(&self, operation_type: ast::OperationType) -> Option<&NamedType> {
        match operation_type {
            ast::OperationType::Query => &self.query,
            ast::OperationType::Mutation => &self.mutation,
            ast::OperationType::Subscription => &self.subscription,
        }
        .as_ref()
    }

    /// Returns the definition of a field of an object type
    pub fn type_field(&self, type_name: &str, field_name: &str) -> Option<&Node<FieldDefinition>> {
        self.get_object(type_name)?.fields.get(field_name)
    }

    /// Returns whether the type `ty` is defined as is an input type
    ///
    /// <https://spec.graphql.org/October2021/#IsInputType()>
    pub fn is_input_type(&self, ty: &Type) -> bool {
        self.types
            .get(ty.inner_named_type())
            .is_some_and(ExtendedType::is_input_type)
    }
}

impl ExtendedType {
    pub fn name(&self) -> &Name {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    /// Returns true if a value of this type can be used as an input value.
    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    /// Scalars and enums
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_))
    }
}

impl FieldDefinition {
    pub fn new(name: Name, ty: Type) -> Self {
        Self {
            name,
            arguments: Vec::new(),
            ty,
        }
    }

    /// Adds an argument, after those already defined
    pub fn argument(mut self, argument: InputValueDefinition) -> Self {
        self.arguments.push(Node::new(argument));
        self
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&Node<InputValueDefinition>> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

impl InputValueDefinition {
    pub fn new(name: Name, ty: Type) -> Self {
        Self {
            name,
            ty: Node::new(ty),
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Node<Value>>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Whether omitting this input value is an error
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}
