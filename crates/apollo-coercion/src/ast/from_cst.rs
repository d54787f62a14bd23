use crate::ast;
use crate::ExecutableDocument;
use crate::FileId;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use crate::SourceMap;
use apollo_parser::cst;
use apollo_parser::cst::CstNode;
use apollo_parser::SyntaxNode;
use apollo_parser::S;

impl ExecutableDocument {
    pub(crate) fn from_cst(document: cst::Document, file_id: FileId, sources: SourceMap) -> Self {
        let converter = FromCst { file_id };
        let operations = document
            .definitions()
            .filter_map(|def| match def {
                cst::Definition::OperationDefinition(op) => {
                    Some(converter.located(&op, converter.operation(&op)?))
                }
                // Fragments and type system definitions don't take part in input coercion
                _ => None,
            })
            .collect();
        Self {
            sources,
            operations,
        }
    }
}

impl ast::Type {
    pub(crate) fn from_cst(ty: &cst::Type, file_id: FileId) -> Option<Self> {
        FromCst { file_id }.ty(ty)
    }
}

/// Converts CST nodes of one source file.
///
/// Nodes that fail to convert are skipped: each has a matching parse error.
#[derive(Clone, Copy)]
struct FromCst {
    file_id: FileId,
}

impl FromCst {
    fn located<T>(self, cst: &impl CstNode, node: T) -> Node<T> {
        Node::new_parsed(node, NodeLocation::new(self.file_id, cst.syntax()))
    }

    fn operation(self, op: &cst::OperationDefinition) -> Option<ast::Operation> {
        let operation_type = match op.operation_type() {
            Some(ty) => match ty.syntax().first_token()?.kind() {
                S![query] => ast::OperationType::Query,
                S![mutation] => ast::OperationType::Mutation,
                S![subscription] => ast::OperationType::Subscription,
                _ => return None,
            },
            None => ast::OperationType::Query,
        };
        let name = match op.name() {
            Some(name) => Some(self.name(&name)?),
            None => None,
        };
        let variables = op
            .variable_definitions()
            .into_iter()
            .flat_map(|defs| defs.variable_definitions())
            .filter_map(|def| Some(self.located(&def, self.variable_definition(&def)?)))
            .collect();
        Some(ast::Operation {
            operation_type,
            name,
            variables,
            selection_set: self.selection_set(&op.selection_set()?),
        })
    }

    fn variable_definition(self, def: &cst::VariableDefinition) -> Option<ast::VariableDefinition> {
        let default_value = match def.default_value() {
            Some(default) => Some(self.value_node(&default.value()?)?),
            None => None,
        };
        let ty = def.ty()?;
        Some(ast::VariableDefinition {
            name: self.name(&def.variable()?.name()?)?,
            ty: self.located(&ty, self.ty(&ty)?),
            default_value,
        })
    }

    fn ty(self, ty: &cst::Type) -> Option<ast::Type> {
        Some(match ty {
            cst::Type::NamedType(named) => ast::Type::Named(self.name(&named.name()?)?),
            cst::Type::ListType(list) => ast::Type::List(Box::new(self.ty(&list.ty()?)?)),
            cst::Type::NonNullType(non_null) => {
                let inner = if let Some(named) = non_null.named_type() {
                    ast::Type::Named(self.name(&named.name()?)?)
                } else {
                    ast::Type::List(Box::new(self.ty(&non_null.list_type()?.ty()?)?))
                };
                ast::Type::NonNull(Box::new(inner))
            }
        })
    }

    fn selection_set(self, selection_set: &cst::SelectionSet) -> Vec<Node<ast::Field>> {
        selection_set
            .selections()
            .filter_map(|selection| match selection {
                cst::Selection::Field(field) => Some(self.located(&field, self.field(&field)?)),
                // TODO: walk inline fragments once type conditions are tracked
                cst::Selection::FragmentSpread(_) | cst::Selection::InlineFragment(_) => None,
            })
            .collect()
    }

    fn field(self, field: &cst::Field) -> Option<ast::Field> {
        let alias = match field.alias() {
            Some(alias) => Some(self.name(&alias.name()?)?),
            None => None,
        };
        let arguments = field
            .arguments()
            .into_iter()
            .flat_map(|args| args.arguments())
            .filter_map(|arg| {
                let argument = ast::Argument {
                    name: self.name(&arg.name()?)?,
                    value: self.value_node(&arg.value()?)?,
                };
                Some(self.located(&arg, argument))
            })
            .collect();
        Some(ast::Field {
            alias,
            name: self.name(&field.name()?)?,
            arguments,
            selection_set: field
                .selection_set()
                .map(|selection_set| self.selection_set(&selection_set))
                .unwrap_or_default(),
        })
    }

    fn value_node(self, value: &cst::Value) -> Option<Node<ast::Value>> {
        Some(self.located(value, self.value(value)?))
    }

    fn value(self, value: &cst::Value) -> Option<ast::Value> {
        let token_text = |syntax: &SyntaxNode| Some(syntax.first_token()?.text().to_owned());
        Some(match value {
            cst::Value::Variable(v) => ast::Value::Variable(self.name(&v.name()?)?),
            cst::Value::StringValue(v) => ast::Value::String(String::from(v)),
            cst::Value::FloatValue(v) => {
                ast::Value::Float(ast::FloatValue::new_parsed(&token_text(v.syntax())?))
            }
            cst::Value::IntValue(v) => {
                ast::Value::Int(ast::IntValue::new_parsed(&token_text(v.syntax())?))
            }
            cst::Value::BooleanValue(v) => ast::Value::Boolean(bool::try_from(v).ok()?),
            cst::Value::NullValue(_) => ast::Value::Null,
            cst::Value::EnumValue(v) => ast::Value::Enum(self.name(&v.name()?)?),
            cst::Value::ListValue(v) => ast::Value::List(
                v.values()
                    .filter_map(|item| self.value_node(&item))
                    .collect(),
            ),
            cst::Value::ObjectValue(v) => ast::Value::Object(
                v.object_fields()
                    .filter_map(|field| {
                        Some((self.name(&field.name()?)?, self.value_node(&field.value()?)?))
                    })
                    .collect(),
            ),
        })
    }

    fn name(self, name: &cst::Name) -> Option<Name> {
        let location = NodeLocation::new(self.file_id, name.syntax());
        Name::new_parsed(name.text().as_str(), location).ok()
    }
}
