//! Schema and helpers shared by the tests

use apollo_coercion::ast::Type;
use apollo_coercion::ast::Value;
use apollo_coercion::coercion::CoercionErrors;
use apollo_coercion::name;
use apollo_coercion::schema::FieldDefinition;
use apollo_coercion::schema::InputValueDefinition;
use apollo_coercion::ExecutableDocument;
use apollo_coercion::JsonMap;
use apollo_coercion::JsonValue;
use apollo_coercion::Name;
use apollo_coercion::Node;
use apollo_coercion::Schema;

pub fn ty(source: &str) -> Type {
    Type::parse(source).unwrap()
}

fn input(name: Name, ty_source: &str) -> InputValueDefinition {
    InputValueDefinition::new(name, ty(ty_source))
}

fn field(name: Name, args: impl IntoIterator<Item = InputValueDefinition>) -> FieldDefinition {
    args.into_iter()
        .fold(FieldDefinition::new(name, ty("Int")), FieldDefinition::argument)
}

/// The equivalent of:
///
/// ```graphql
/// enum Color { RED GREEN BLUE }
/// input Point { x: Int!, y: Int! }
/// input PointWithDefault { x: Int!, y: Int = 0 }
/// input Filter { name: String, tags: [String!], near: Point, limit: Int = 10 }
/// input Ten { a: Int!, b: Int!, … j: Int! }
/// type Query {
///   point(p: Point): Int
///   points(ps: [Point!]): Int
///   flags(f: [Boolean!]): Int
///   flagsNonNull(f: [Boolean]!): Int
///   maybeFlags(f: [Boolean]): Int
///   matrix(m: [[Int]]): Int
///   ten(t: Ten): Int
///   int(n: Int!): Int
///   intDefault(n: Int! = 5): Int
///   color(c: Color): Int
///   id(id: ID): Int
///   filter(f: Filter): Int
///   withDefault(p: PointWithDefault): Int
///   nested: Query
/// }
/// ```
pub fn schema() -> Schema {
    let ten = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]
        .into_iter()
        .map(|name| input(Name::new(name).unwrap(), "Int!"));
    Schema::builder()
        .enum_type(name!(Color), [name!(RED), name!(GREEN), name!(BLUE)])
        .input_object(
            name!(Point),
            [input(name!(x), "Int!"), input(name!(y), "Int!")],
        )
        .input_object(
            name!(PointWithDefault),
            [
                input(name!(x), "Int!"),
                input(name!(y), "Int").with_default(Value::from(0)),
            ],
        )
        .input_object(
            name!(Filter),
            [
                input(name!(name), "String"),
                input(name!(tags), "[String!]"),
                input(name!(near), "Point"),
                input(name!(limit), "Int").with_default(Value::from(10)),
            ],
        )
        .input_object(name!(Ten), ten)
        .object(
            name!(Query),
            [
                field(name!(point), [input(name!(p), "Point")]),
                field(name!(points), [input(name!(ps), "[Point!]")]),
                field(name!(flags), [input(name!(f), "[Boolean!]")]),
                field(name!(flagsNonNull), [input(name!(f), "[Boolean]!")]),
                field(name!(maybeFlags), [input(name!(f), "[Boolean]")]),
                field(name!(matrix), [input(name!(m), "[[Int]]")]),
                field(name!(ten), [input(name!(t), "Ten")]),
                field(name!(int), [input(name!(n), "Int!")]),
                field(
                    name!(intDefault),
                    [input(name!(n), "Int!").with_default(Value::from(5))],
                ),
                field(name!(color), [input(name!(c), "Color")]),
                field(name!(id), [input(name!(id), "ID")]),
                field(name!(filter), [input(name!(f), "Filter")]),
                field(name!(withDefault), [input(name!(p), "PointWithDefault")]),
                FieldDefinition::new(name!(nested), ty("Query")),
            ],
        )
        .build()
        .unwrap()
}

pub fn document(source: &str) -> ExecutableDocument {
    ExecutableDocument::parse(source, "query.graphql").unwrap()
}

/// Parses `value` as the value of an argument, in `{ f(a: <value>) }`.
///
/// The value starts at column 8.
pub fn literal(value: &str) -> (ExecutableDocument, Node<Value>) {
    let document = document(&format!("{{ f(a: {value}) }}"));
    let value = document.operations[0].selection_set[0].arguments[0]
        .value
        .clone();
    (document, value)
}

pub fn json_map(value: JsonValue) -> JsonMap {
    match value {
        JsonValue::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

/// One message per line
pub fn messages(errors: &CoercionErrors) -> String {
    errors
        .iter()
        .map(|error| format!("{}\n", error.message))
        .collect()
}

/// Errors in the format of a GraphQL response
pub fn response_errors(
    errors: &CoercionErrors,
    document: &ExecutableDocument,
) -> serde_json::Value {
    serde_json::to_value(errors.to_graphql_errors(&document.sources)).unwrap()
}
