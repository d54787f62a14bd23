use crate::fixtures::document;
use crate::fixtures::schema;
use apollo_coercion::coercion::coerce_variable_values;
use apollo_coercion::diagnostic::Color;
use apollo_coercion::diagnostic::ToDiagnostic;
use apollo_coercion::response::GraphQLLocation;
use apollo_coercion::validation::validate_operation;
use apollo_coercion::ExecutableDocument;
use apollo_coercion::JsonMap;

#[test]
fn coercion_error_report() {
    let doc = document("query($n: Int!) {\n  int(n: $n)\n}");
    let operation = doc.get_operation(None).unwrap();
    let errors = coerce_variable_values(&schema(), operation, &JsonMap::new()).unwrap_err();
    let diagnostic = errors.errors[0].clone().to_diagnostic(&doc.sources);
    assert_eq!(
        diagnostic.get_line_column(),
        Some(GraphQLLocation { line: 1, column: 7 })
    );
    let report = diagnostic.to_string();
    assert!(report.contains("Variable < $n > of required type < Int! > was not provided"));
    assert!(report.contains("query.graphql"));
    assert!(report.contains("missing-required"));
}

#[test]
fn validation_error_report() {
    let doc = document("{ point(p: {x: 1, y: 2, z: 3}) }");
    let errors = validate_operation(&schema(), &doc).unwrap_err();
    let report = (&errors.errors[0]).to_diagnostic(&doc.sources).to_string();
    assert!(report.contains("Field < z > is not defined by type < Point >"));
    assert!(report.contains("input-fields-defined"));
}

#[test]
fn syntax_error_report() {
    let errors = ExecutableDocument::parse("query { f(a: ) }", "broken.graphql").unwrap_err();
    assert!(!errors.errors.is_empty());
    let report = errors.errors[0].clone().to_diagnostic(&errors.sources).to_string();
    assert!(report.contains("syntax error"));
    assert!(report.contains("broken.graphql"));
}

#[test]
fn variable_usage_report() {
    let doc = document("query($n: Int) {\n  int(n: $n)\n}");
    let errors = validate_operation(&schema(), &doc).unwrap_err();
    let diagnostic = (&errors.errors[0]).to_diagnostic(&doc.sources);
    assert_eq!(
        diagnostic.get_line_column(),
        Some(GraphQLLocation { line: 1, column: 7 })
    );
    let report = diagnostic.to_string();
    assert!(report.contains("variable-usage-incompatible"));
    assert!(report.contains("variable used here"));

    let mut written = Vec::new();
    diagnostic.write(Color::Never, &mut written).unwrap();
    assert_eq!(String::from_utf8(written).unwrap(), report);
}
