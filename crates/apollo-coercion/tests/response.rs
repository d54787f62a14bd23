use crate::fixtures::document;
use crate::fixtures::json_map;
use crate::fixtures::schema;
use apollo_coercion::coercion::coerce_variable_values;
use apollo_coercion::response::GraphQLError;
use apollo_coercion::response::GraphQLLocation;
use apollo_coercion::response::PathElement;
use apollo_coercion::response::Response;
use apollo_coercion::serde_json_bytes::json;
use apollo_coercion::name;
use apollo_coercion::JsonMap;
use expect_test::expect;

#[test]
fn serialize_error() {
    let error = GraphQLError {
        message: "Expected value of type <Int!>, found <null>".to_owned(),
        locations: vec![GraphQLLocation { line: 2, column: 9 }],
        path: Some(vec![
            PathElement::Field(name!(points)),
            PathElement::ListIndex(1),
            PathElement::Field(name!(x)),
        ]),
        extensions: JsonMap::new(),
    };
    expect![[r#"
        {
          "message": "Expected value of type <Int!>, found <null>",
          "locations": [
            {
              "line": 2,
              "column": 9
            }
          ],
          "path": [
            "points",
            1,
            "x"
          ]
        }"#]]
    .assert_eq(&serde_json::to_string_pretty(&error).unwrap());
}

#[test]
fn request_error_response() {
    let doc = document("query($a: Int!, $b: [Int]) { a }");
    let operation = doc.get_operation(None).unwrap();
    let values = json_map(json!({"b": [1, "2"]}));
    let errors = coerce_variable_values(&schema(), operation, &values).unwrap_err();
    let response = Response::from_request_errors(&errors, &doc.sources);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({
            "errors": [
                {
                    "message": "Variable < $a > of required type < Int! > was not provided",
                    "locations": [{"line": 1, "column": 7}],
                    "path": null,
                },
                {
                    "message": "Int cannot represent non-integer value: \"2\"",
                    "locations": [{"line": 1, "column": 17}],
                    "path": [1],
                },
            ],
        })
    );
}

#[test]
fn locations_count_characters() {
    let doc = document("# é\nquery($n: Int!) { a }");
    let operation = doc.get_operation(None).unwrap();
    let errors = coerce_variable_values(&schema(), operation, &JsonMap::new()).unwrap_err();
    let error = &errors.to_graphql_errors(&doc.sources)[0];
    assert_eq!(error.locations, [GraphQLLocation { line: 2, column: 7 }]);
}
