// JSON helper tests

use bizkit::json::{self, JsonError};
use bizkit::ResponseMsg;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Product {
    #[serde(with = "json::long_string")]
    id: i64,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    tag: Option<String>,
}

#[test]
fn test_large_ids_survive_as_strings() {
    let product = Product {
        id: i64::MAX,
        name: "widget".to_string(),
        tag: None,
    };
    let text = json::to_json(&product).unwrap();
    assert_eq!(text, r#"{"id":"9223372036854775807","name":"widget"}"#);
    assert_eq!(json::from_json::<Product>(&text).unwrap(), product);
}

#[test]
fn test_records_to_table_unions_columns() {
    let records = vec![
        serde_json::json!({"a": 1, "b": "x"}),
        serde_json::json!({"b": "y", "c": null}),
    ];
    let table = json::to_table(&records).unwrap();
    assert_eq!(table.columns(), &["a", "b", "c"]);
    assert_eq!(table.rows()[0], vec!["1", "x", ""]);
    assert_eq!(table.rows()[1], vec!["", "y", ""]);
}

#[test]
fn test_to_map_rejects_arrays() {
    let err = json::to_map("[1,2]").unwrap_err();
    assert!(matches!(
        err,
        JsonError::UnexpectedShape {
            expected: "object",
            found: "array"
        }
    ));
}

#[test]
fn test_response_msg_round_trip_through_helpers() {
    let msg = ResponseMsg::succeeded_with_data(2, "[1,2]");
    let text = json::to_json(&msg).unwrap();
    let back: ResponseMsg = json::from_json(&text).unwrap();
    assert_eq!(back, msg);
    assert!(!text.contains("message"));
}
