use apollo_coercion::ast::GetOperationError;
use apollo_coercion::ast::OperationType;
use apollo_coercion::ast::Type;
use apollo_coercion::ast::Value;
use apollo_coercion::ExecutableDocument;
use apollo_coercion::Parser;
use pretty_assertions::assert_eq;
use unindent::unindent;

#[test]
fn operations_variables_and_arguments() {
    let source = unindent(
        r#"
        query Q($p: Point = {x: 1, y: [2, 3.5]}, $s: String!) {
          alias: field(a: $p, b: "x\ny", c: RED, d: null) {
            inner(e: true)
          }
          ...Fragment
        }

        mutation M { m }

        fragment Fragment on Query { a }
        "#,
    );
    let doc = ExecutableDocument::parse(source, "query.graphql").unwrap();
    assert_eq!(doc.operations.len(), 2);

    let query = doc.get_operation(Some("Q")).unwrap();
    assert_eq!(query.operation_type, OperationType::Query);
    let variables: Vec<String> = query
        .variables
        .iter()
        .map(|def| match &def.default_value {
            Some(default) => format!("${}: {} = {default}", def.name, def.ty),
            None => format!("${}: {}", def.name, def.ty),
        })
        .collect();
    assert_eq!(
        variables,
        ["$p: Point = {x: 1, y: [2, 3.5]}", "$s: String!"]
    );

    assert_eq!(query.selection_set.len(), 1);
    let field = &query.selection_set[0];
    assert_eq!(field.response_key(), "alias");
    let arguments: Vec<String> = field
        .arguments
        .iter()
        .map(|arg| format!("{}: {}", arg.name, arg.value))
        .collect();
    assert_eq!(
        arguments,
        ["a: $p", r#"b: "x\ny""#, "c: RED", "d: null"]
    );
    assert_eq!(*field.argument_by_name("d").unwrap().value, Value::Null);
    assert_eq!(field.selection_set[0].name, "inner");

    let mutation = doc.get_operation(Some("M")).unwrap();
    assert_eq!(mutation.operation_type, OperationType::Mutation);
}

#[test]
fn get_operation() {
    let doc = ExecutableDocument::parse("query A { a } query B { b }", "query.graphql").unwrap();
    assert_eq!(
        doc.get_operation(None).unwrap_err(),
        GetOperationError::AnonymousWithSeveral
    );
    assert_eq!(
        doc.get_operation(Some("C")).unwrap_err(),
        GetOperationError::NotFound("C".to_owned())
    );
    let doc = ExecutableDocument::parse("fragment F on Query { a }", "query.graphql").unwrap();
    assert_eq!(
        doc.get_operation(None).unwrap_err(),
        GetOperationError::NoOperations
    );
}

#[test]
fn type_references() {
    assert_eq!(Type::parse("[Int!]!").unwrap().to_string(), "[Int!]!");
    assert!(Type::parse("[Int").is_err());
}

#[test]
fn limits() {
    let source = "query($a: Int, $b: Int) { a { b { c { d } } } }";

    let mut parser = Parser::new().token_limit(10);
    assert!(parser.parse_executable(source, "query.graphql").is_err());

    let mut parser = Parser::new().recursion_limit(2);
    assert!(parser.parse_executable(source, "query.graphql").is_err());

    let mut parser = Parser::new();
    parser.parse_executable(source, "query.graphql").unwrap();
    assert!(parser.tokens_reached() > 10);
    assert!(parser.recursion_reached() > 2);
}
