use crate::fixtures::document;
use crate::fixtures::literal;
use crate::fixtures::messages;
use crate::fixtures::response_errors;
use crate::fixtures::schema;
use crate::fixtures::ty;
use apollo_coercion::coercion::coerce_literal_value;
use apollo_coercion::coercion::coerce_variable_value;
use apollo_coercion::coercion::CoercionErrorKind;
use apollo_coercion::response::PathElement;
use apollo_coercion::serde_json_bytes::json;
use expect_test::expect;
use pretty_assertions::assert_eq;

#[track_caller]
fn coerce(ty_source: &str, value: &str) -> apollo_coercion::JsonValue {
    let (_, value) = literal(value);
    coerce_literal_value(&schema(), &ty(ty_source), &value, None)
        .unwrap()
        .unwrap()
}

#[test]
fn list_singleton_wrapping() {
    assert_eq!(coerce("[Boolean]", "false"), json!([false]));
    assert_eq!(coerce("[Boolean]", "[false, null]"), json!([false, null]));
    assert_eq!(coerce("[[Int]]", "1"), json!([[1]]));
    assert_eq!(coerce("[Int]", "null"), json!(null));
}

#[test]
fn null_list_item_at_non_null_position() {
    let (document, value) = literal("[false, null]");
    let errors = coerce_literal_value(&schema(), &ty("[Boolean!]"), &value, None).unwrap_err();
    assert_eq!(errors.len(), 1);
    let error = &errors.errors[0];
    assert_eq!(error.kind, CoercionErrorKind::NullOnNonNull);
    assert_eq!(error.path, [PathElement::ListIndex(1)]);
    assert_eq!(
        response_errors(&errors, &document),
        serde_json::json!([{
            "message": "Expected value of type <Boolean!>, found <null>",
            "locations": [{"line": 1, "column": 16}],
            "path": [1],
            "extensions": {
                "spec": "https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type",
                "rule": "values-of-correct-type",
                "tag": "null-on-non-null",
                "details": {"expectedType": "Boolean!", "value": "null"},
            },
        }])
    );
}

#[test]
fn every_missing_field_is_reported_at_the_object() {
    let (document, value) = literal("{}");
    let errors = coerce_literal_value(&schema(), &ty("Ten"), &value, None).unwrap_err();
    expect![[r#"
        Field < Ten.a > of required type < Int! > was not provided
        Field < Ten.b > of required type < Int! > was not provided
        Field < Ten.c > of required type < Int! > was not provided
        Field < Ten.d > of required type < Int! > was not provided
        Field < Ten.e > of required type < Int! > was not provided
        Field < Ten.f > of required type < Int! > was not provided
        Field < Ten.g > of required type < Int! > was not provided
        Field < Ten.h > of required type < Int! > was not provided
        Field < Ten.i > of required type < Int! > was not provided
        Field < Ten.j > of required type < Int! > was not provided
    "#]]
    .assert_eq(&messages(&errors));
    let graphql_errors = errors.to_graphql_errors(&document.sources);
    for (error, graphql_error) in errors.iter().zip(&graphql_errors) {
        assert_eq!(error.kind, CoercionErrorKind::MissingRequired);
        let location = &graphql_error.locations[0];
        assert_eq!((location.line, location.column), (1, 8));
        assert_eq!(graphql_error.path, None);
    }
}

#[test]
fn omission_versus_null() {
    let schema = schema();
    let point = ty("Point");

    let (_, value) = literal("{x: null, y: 1}");
    let errors = coerce_literal_value(&schema, &point, &value, None).unwrap_err();
    assert_eq!(errors.errors[0].kind, CoercionErrorKind::NullOnNonNull);
    assert_eq!(errors.errors[0].path, [PathElement::Field(apollo_coercion::name!(x))]);
    expect![[r#"
        Expected value of type <Int!>, found <null>
    "#]]
    .assert_eq(&messages(&errors));

    let (_, value) = literal("{y: 1}");
    let errors = coerce_literal_value(&schema, &point, &value, None).unwrap_err();
    assert_eq!(errors.errors[0].kind, CoercionErrorKind::MissingRequired);
    expect![[r#"
        Field < Point.x > of required type < Int! > was not provided
    "#]]
    .assert_eq(&messages(&errors));

    let with_default = ty("PointWithDefault");
    let (_, value) = literal("{x: 1}");
    let coerced = coerce_literal_value(&schema, &with_default, &value, None).unwrap();
    assert_eq!(coerced, Some(json!({"x": 1, "y": 0})));

    // A default never replaces an explicit null
    let (_, value) = literal("{x: 1, y: null}");
    let coerced = coerce_literal_value(&schema, &with_default, &value, None).unwrap();
    assert_eq!(coerced, Some(json!({"x": 1, "y": null})));
}

#[test]
fn errors_follow_declaration_order() {
    let (_, value) = literal(r#"{y: true, x: "a"}"#);
    let errors = coerce_literal_value(&schema(), &ty("Point"), &value, None).unwrap_err();
    expect![[r#"
        Int cannot represent non-integer value: "a"
        Int cannot represent non-integer value: true
    "#]]
    .assert_eq(&messages(&errors));
    let paths: Vec<_> = errors.iter().map(|error| error.path.clone()).collect();
    assert_eq!(
        paths,
        [
            [PathElement::Field(apollo_coercion::name!(x))],
            [PathElement::Field(apollo_coercion::name!(y))],
        ]
    );
    assert!(errors
        .iter()
        .all(|error| error.kind == CoercionErrorKind::LeafCoercionFailure));
}

#[test]
fn nested_paths() {
    let (_, value) = literal(r#"[{x: 1, y: 2}, {x: 1, y: "2"}]"#);
    let errors = coerce_literal_value(&schema(), &ty("[Point!]"), &value, None).unwrap_err();
    assert_eq!(
        errors.errors[0].path,
        [
            PathElement::ListIndex(1),
            PathElement::Field(apollo_coercion::name!(y))
        ]
    );
}

#[test]
fn input_object_field_order_and_defaults() {
    let coerced = coerce("Filter", r#"{near: {y: 2, x: 1}, name: "a", tags: "t"}"#);
    assert_eq!(
        coerced,
        json!({"name": "a", "tags": ["t"], "near": {"x": 1, "y": 2}, "limit": 10})
    );
    let keys: Vec<_> = coerced
        .as_object()
        .unwrap()
        .keys()
        .map(|key| key.as_str().to_owned())
        .collect();
    assert_eq!(keys, ["name", "tags", "near", "limit"]);
}

#[test]
fn leaf_values() {
    assert_eq!(coerce("Color", "GREEN"), json!("GREEN"));
    assert_eq!(coerce("ID", "42"), json!("42"));
    assert_eq!(coerce("Float", "3"), json!(3));

    let schema = schema();
    let (_, value) = literal(r#""GREEN""#);
    let errors = coerce_literal_value(&schema, &ty("Color"), &value, None).unwrap_err();
    let (_, value) = literal("PURPLE");
    let errors2 = coerce_literal_value(&schema, &ty("Color"), &value, None).unwrap_err();
    expect![[r#"
        Enum "Color" cannot represent non-enum value: "GREEN".
        Value "PURPLE" does not exist in "Color" enum.
    "#]]
    .assert_eq(&(messages(&errors) + &messages(&errors2)));
}

#[test]
fn type_mismatch() {
    let schema = schema();
    let (_, value) = literal("[1]");
    let errors = coerce_literal_value(&schema, &ty("Point"), &value, None).unwrap_err();
    assert_eq!(errors.errors[0].kind, CoercionErrorKind::TypeMismatch);
    let (_, value) = literal("1");
    let errors2 = coerce_literal_value(&schema, &ty("Query"), &value, None).unwrap_err();
    let (_, value) = literal("1");
    let errors3 = coerce_literal_value(&schema, &ty("Nope"), &value, None).unwrap_err();
    expect![[r#"
        Expected value of type "Point", found [1].
        Type < Query > is not an input type
        Unknown type < Nope >
    "#]]
    .assert_eq(&(messages(&errors) + &messages(&errors2) + &messages(&errors3)));
}

#[test]
fn variables_are_not_followed_without_bindings() {
    assert_eq!(coerce("Int!", "$n"), json!(null));
    assert_eq!(coerce("Point", "{x: $x, y: 1}"), json!({"x": null, "y": 1}));
}

#[test]
fn idempotent() {
    let schema = schema();
    let (_, value) = literal(r#"{tags: "t", near: {y: 2, x: 1}}"#);
    let once = coerce_literal_value(&schema, &ty("Filter"), &value, None)
        .unwrap()
        .unwrap();
    assert_eq!(
        once,
        json!({"tags": ["t"], "near": {"x": 1, "y": 2}, "limit": 10})
    );

    // The coerced value coerces to itself
    let doc = document("query($f: Filter) { filter(f: $f) }");
    let definition = &doc.get_operation(None).unwrap().variables[0];
    let twice = coerce_variable_value(&schema, definition, Some(&once)).unwrap();
    assert_eq!(twice, Some(once));
}
