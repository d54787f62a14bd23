use crate::fixtures::document;
use crate::fixtures::messages;
use crate::fixtures::response_errors;
use crate::fixtures::schema;
use apollo_coercion::coercion::CoercionErrorKind;
use apollo_coercion::validation::validate_operation;
use expect_test::expect;
use pretty_assertions::assert_eq;
use unindent::unindent;

#[test]
fn list_item_nullability_is_checked_statically() {
    let doc = document("query($v: [Boolean!]) { flagsNonNull(f: $v) }");
    let errors = validate_operation(&schema(), &doc).unwrap_err();
    assert_eq!(
        errors.errors[0].kind,
        CoercionErrorKind::VariableUsageIncompatible
    );
    assert_eq!(
        response_errors(&errors, &doc),
        serde_json::json!([{
            "message": "Variable < $v > of type < [Boolean!] > used in position expecting type < [Boolean]! >",
            "locations": [{"line": 1, "column": 7}, {"line": 1, "column": 41}],
            "path": null,
            "extensions": {
                "spec": "https://spec.graphql.org/October2021/#sec-All-Variable-Usages-are-Allowed",
                "rule": "variables-in-allowed-position",
                "tag": "variable-usage-incompatible",
                "details": {"variableType": "[Boolean!]", "expectedType": "[Boolean]!"},
            },
        }])
    );

    let doc = document("query($v: [Boolean]) { flags(f: $v) }");
    let errors = validate_operation(&schema(), &doc).unwrap_err();
    expect![[r#"
        Variable < $v > of type < [Boolean] > used in position expecting type < [Boolean!] >
    "#]]
    .assert_eq(&messages(&errors));
}

#[test]
fn allowed_variable_usages() {
    let schema = schema();
    let source = unindent(
        r#"
        query(
          $n: Int!
          $withDefault: Int = 1
          $optional: Int
          $flags: [Boolean!]!
          $x: Int!
        ) {
          int(n: $n)
          a: int(n: $withDefault)
          intDefault(n: $optional)
          flags(f: $flags)
          flagsNonNull(f: $flags)
          point(p: {x: $x, y: $n})
          nested { int(n: $n) }
        }
        "#,
    );
    validate_operation(&schema, &document(&source)).unwrap();
}

#[test]
fn nested_variable_usages() {
    let source = unindent(
        r#"
        query($x: Int, $b: Boolean, $p: PointWithDefault) {
          point(p: {x: $x, y: 1})
          flags(f: [true, $b])
          withDefault(p: {x: 1, y: $x})
          nested { withDefault(p: $p) }
        }
        "#,
    );
    let errors = validate_operation(&schema(), &document(&source)).unwrap_err();
    expect![[r#"
        Variable < $x > of type < Int > used in position expecting type < Int! >
        Variable < $b > of type < Boolean > used in position expecting type < Boolean! >
    "#]]
    .assert_eq(&messages(&errors));
}

#[test]
fn values_of_correct_type() {
    let source = unindent(
        r#"
        query($n: Int = "one", $p: Point = {x: 1}) {
          int(n: null)
          point(p: {x: 1, y: $n})
          nested { color(c: PURPLE) }
        }
        "#,
    );
    let errors = validate_operation(&schema(), &document(&source)).unwrap_err();
    expect![[r#"
        Int cannot represent non-integer value: "one"
        Field < Point.y > of required type < Int! > was not provided
        Expected value of type <Int!>, found <null>
        Value "PURPLE" does not exist in "Color" enum.
    "#]]
    .assert_eq(&messages(&errors));
    assert!(errors
        .iter()
        .all(|error| error.extensions.as_ref().unwrap().rule.name() == "values-of-correct-type"));
}

#[test]
fn input_fields_defined() {
    let doc = document("{ point(p: {x: 1, y: 2, z: 3}) }");
    let errors = validate_operation(&schema(), &doc).unwrap_err();
    assert_eq!(errors.errors[0].kind, CoercionErrorKind::UnknownField);
    assert_eq!(
        response_errors(&errors, &doc),
        serde_json::json!([{
            "message": "Field < z > is not defined by type < Point >",
            "locations": [{"line": 1, "column": 25}],
            "path": null,
            "extensions": {
                "spec": "https://spec.graphql.org/October2021/#sec-Input-Object-Field-Names",
                "rule": "input-fields-defined",
                "tag": "unknown-field",
                "details": {"type": "Point", "field": "z"},
            },
        }])
    );

    let doc = document("query($f: Filter = {near: {x: 1, y: 2, w: 0}}) { points(ps: [{x: 1, y: 2, q: 0}]) }");
    let errors = validate_operation(&schema(), &doc).unwrap_err();
    expect![[r#"
        Field < w > is not defined by type < Point >
        Field < q > is not defined by type < Point >
    "#]]
    .assert_eq(&messages(&errors));
}

#[test]
fn undefined_fields_and_arguments_are_skipped() {
    let doc = document("{ unknown(a: 1) point(unknown: 1) }");
    validate_operation(&schema(), &doc).unwrap();
}
