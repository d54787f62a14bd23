use super::leaf;
use super::EnumType;
use super::EnumValueDefinition;
use super::ExtendedType;
use super::FieldDefinition;
use super::InputObjectType;
use super::InputValueDefinition;
use super::LeafCoercer;
use super::ObjectType;
use super::ScalarType;
use super::Schema;
use crate::ast::Type;
use crate::name;
use crate::JsonValue;
use crate::Name;
use crate::Node;
use indexmap::IndexMap;
use std::sync::Arc;

/// Registers type definitions, then checks them with [`build`][Self::build].
///
/// Built-in scalars `Int`, `Float`, `String`, `Boolean`, and `ID`
/// are registered with their standard coercers.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema: Schema,
    errors: Vec<SchemaBuildError>,
}

/// A definition error found by [`SchemaBuilder::build`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("type `{0}` is defined multiple times")]
    DuplicateType(Name),
    #[error("{position} references undefined type `{ty}`")]
    UndefinedType { position: String, ty: Name },
    #[error("{position} must be an input type, but `{ty}` is an object type")]
    NotInputType { position: String, ty: Name },
    #[error("{position} must be an output type, but `{ty}` is an input object type")]
    NotOutputType { position: String, ty: Name },
    #[error("{position} has type `{ty}`, where non-null directly wraps non-null")]
    NonNullOfNonNull { position: String, ty: Type },
    #[error("the {operation} root operation type `{ty}` is not an object type")]
    RootNotObject { operation: &'static str, ty: Name },
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        let builder = Self {
            schema: Schema {
                types: IndexMap::new(),
                query: None,
                mutation: None,
                subscription: None,
            },
            errors: Vec::new(),
        };
        builder
            .scalar(name!(Int), leaf::IntCoercer)
            .scalar(name!(Float), leaf::FloatCoercer)
            .scalar(name!(String), leaf::StringCoercer)
            .scalar(name!(Boolean), leaf::BooleanCoercer)
            .scalar(name!(ID), leaf::IdCoercer)
    }

    /// Registers a scalar type.
    ///
    /// Registering a built-in scalar name replaces its standard coercer.
    pub fn scalar(mut self, name: Name, coercer: impl LeafCoercer + 'static) -> Self {
        let def = ScalarType {
            name: name.clone(),
            coercer: Arc::new(coercer),
        };
        // Replacing a built-in is allowed, but not a user-defined type
        let replaces_builtin = self
            .schema
            .get_scalar(&name)
            .is_some_and(|existing| is_builtin_scalar(&existing.name));
        if replaces_builtin {
            self.schema
                .types
                .insert(name, ExtendedType::Scalar(Node::new(def)));
            self
        } else {
            self.insert(name, ExtendedType::Scalar(Node::new(def)))
        }
    }

    /// Registers an enum type whose values coerce to their own names
    pub fn enum_type(self, name: Name, values: impl IntoIterator<Item = Name>) -> Self {
        let values = values.into_iter().map(|value| {
            let internal_value = JsonValue::from(value.as_str());
            (value, internal_value)
        });
        self.enum_type_with_values(name, values)
    }

    /// Registers an enum type with the internal value each enum value coerces to
    pub fn enum_type_with_values(
        self,
        name: Name,
        values: impl IntoIterator<Item = (Name, JsonValue)>,
    ) -> Self {
        let def = EnumType {
            name: name.clone(),
            values: values
                .into_iter()
                .map(|(value, internal_value)| {
                    let def = EnumValueDefinition {
                        value: value.clone(),
                        internal_value,
                    };
                    (value, def)
                })
                .collect(),
        };
        self.insert(name, ExtendedType::Enum(Node::new(def)))
    }

    /// Registers an input object type. Fields keep the given order.
    pub fn input_object(
        self,
        name: Name,
        fields: impl IntoIterator<Item = InputValueDefinition>,
    ) -> Self {
        let def = InputObjectType {
            name: name.clone(),
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), Node::new(field)))
                .collect(),
        };
        self.insert(name, ExtendedType::InputObject(Node::new(def)))
    }

    /// Registers an output object type
    pub fn object(self, name: Name, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        let def = ObjectType {
            name: name.clone(),
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), Node::new(field)))
                .collect(),
        };
        self.insert(name, ExtendedType::Object(Node::new(def)))
    }

    /// Sets the object type for the `query` root operation
    pub fn query_type(mut self, name: Name) -> Self {
        self.schema.query = Some(name);
        self
    }

    /// Sets the object type for the `mutation` root operation
    pub fn mutation_type(mut self, name: Name) -> Self {
        self.schema.mutation = Some(name);
        self
    }

    /// Sets the object type for the `subscription` root operation
    pub fn subscription_type(mut self, name: Name) -> Self {
        self.schema.subscription = Some(name);
        self
    }

    fn insert(mut self, name: Name, def: ExtendedType) -> Self {
        if self.schema.types.contains_key(&name) {
            self.errors.push(SchemaBuildError::DuplicateType(name))
        } else {
            self.schema.types.insert(name, def);
        }
        self
    }

    /// Returns the schema, or every definition error found.
    ///
    /// If no `query` root type was set, an object type named `Query` is used if there is one.
    pub fn build(self) -> Result<Schema, Vec<SchemaBuildError>> {
        let Self {
            mut schema,
            mut errors,
        } = self;
        if schema.query.is_none() && schema.get_object("Query").is_some() {
            schema.query = Some(name!(Query))
        }
        for (operation, root) in [
            ("query", &schema.query),
            ("mutation", &schema.mutation),
            ("subscription", &schema.subscription),
        ] {
            if let Some(root) = root {
                if schema.get_object(root).is_none() {
                    errors.push(SchemaBuildError::RootNotObject {
                        operation,
                        ty: root.clone(),
                    })
                }
            }
        }
        for def in schema.types.values() {
            match def {
                ExtendedType::Scalar(_) | ExtendedType::Enum(_) => {}
                ExtendedType::InputObject(def) => {
                    for field in def.fields.values() {
                        let position = format!("input field `{}.{}`", def.name, field.name);
                        check_type(&schema, &mut errors, &position, &field.ty, true);
                    }
                }
                ExtendedType::Object(def) => {
                    for field in def.fields.values() {
                        let position = format!("field `{}.{}`", def.name, field.name);
                        check_type(&schema, &mut errors, &position, &field.ty, false);
                        for argument in &field.arguments {
                            let position = format!(
                                "argument `{}.{}({}:)`",
                                def.name, field.name, argument.name
                            );
                            check_type(&schema, &mut errors, &position, &argument.ty, true);
                        }
                    }
                }
            }
        }
        if errors.is_empty() {
            tracing::debug!(types = schema.types.len(), "built schema");
            Ok(schema)
        } else {
            Err(errors)
        }
    }
}

fn is_builtin_scalar(name: &str) -> bool {
    matches!(name, "Int" | "Float" | "String" | "Boolean" | "ID")
}

fn check_type(
    schema: &Schema,
    errors: &mut Vec<SchemaBuildError>,
    position: &str,
    ty: &Type,
    input: bool,
) {
    if has_nested_non_null(ty) {
        errors.push(SchemaBuildError::NonNullOfNonNull {
            position: position.to_owned(),
            ty: ty.clone(),
        })
    }
    let name = ty.inner_named_type();
    match schema.types.get(name) {
        None => errors.push(SchemaBuildError::UndefinedType {
            position: position.to_owned(),
            ty: name.clone(),
        }),
        Some(ExtendedType::Object(_)) if input => errors.push(SchemaBuildError::NotInputType {
            position: position.to_owned(),
            ty: name.clone(),
        }),
        Some(ExtendedType::InputObject(_)) if !input => {
            errors.push(SchemaBuildError::NotOutputType {
                position: position.to_owned(),
                ty: name.clone(),
            })
        }
        Some(_) => {}
    }
}

fn has_nested_non_null(ty: &Type) -> bool {
    match ty {
        Type::Named(_) => false,
        Type::NonNull(inner) if inner.is_non_null() => true,
        Type::List(inner) | Type::NonNull(inner) => has_nested_non_null(inner),
    }
}
