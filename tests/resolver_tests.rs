use dotsel::{Chain, Location, SelectError, SelectorKind, Value, parse_selector, resolve, select};
use serde_json::json;

fn chain(doc: serde_json::Value, selector: &str) -> Chain {
    Chain::with_selectors(Value::from(doc), parse_selector(selector).unwrap())
}

fn query(doc: serde_json::Value, selector: &str) -> Result<Value, SelectError> {
    select(&mut chain(doc, selector))
}

fn users() -> serde_json::Value {
    json!({
        "users": [
            {"name": "ann", "age": 31, "tags": ["a", "b"]},
            {"name": "bob", "age": 27, "tags": []},
        ],
        "meta": {"count": 2, "title": "héllo"},
    })
}

#[test]
fn test_root_selector() {
    assert_eq!(query(users(), "."), Ok(Value::from(users())));
}

#[test]
fn test_nested_property_and_index() {
    assert_eq!(query(users(), ".users.[1].name"), Ok(Value::from("bob")));
    assert_eq!(query(users(), ".users[0].tags[1]"), Ok(Value::from("b")));
}

#[test]
fn test_dynamic_then_property() {
    assert_eq!(query(users(), ".users.(name=bob).age"), Ok(Value::Integer(27)));
    assert_eq!(query(users(), ".users.(age=31).name"), Ok(Value::from("ann")));
    assert_eq!(query(users(), ".users.(name!=ann).name"), Ok(Value::from("bob")));
    assert_eq!(query(users(), ".users.(name=~^b).age"), Ok(Value::Integer(27)));
}

#[test]
fn test_dynamic_no_coercion() {
    let got = query(users(), r#".users.(age="31")"#);
    assert!(matches!(got, Err(SelectError::ValueNotFound { .. })));
}

#[test]
fn test_length_and_type() {
    assert_eq!(query(users(), ".users.[#]"), Ok(Value::Integer(2)));
    assert_eq!(query(users(), ".meta.[#]"), Ok(Value::Integer(2)));
    assert_eq!(query(users(), ".meta.title.[#]"), Ok(Value::Integer(5)));
    assert_eq!(query(users(), ".users.[0].tags.[#]"), Ok(Value::Integer(2)));
    assert_eq!(query(users(), ".meta.count.[@]"), Ok(Value::from("int")));
    assert_eq!(query(users(), ".users.[@]"), Ok(Value::from("array")));
    assert_eq!(query(users(), ".[@]"), Ok(Value::from("map")));
}

#[test]
fn test_type_vocabulary() {
    let doc = json!([0, 1.5, true, "s", {}, []]);
    let names: Vec<Value> = (0..6)
        .map(|i| query(doc.clone(), &format!(".[{}].[@]", i)).unwrap())
        .collect();
    let expected: Vec<Value> = ["int", "float", "bool", "string", "map", "array"]
        .into_iter()
        .map(Value::from)
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn test_length_of_scalar_fails() {
    let got = query(users(), ".meta.count.[#]");
    match got {
        Err(SelectError::UnsupportedTypeForSelector { selector, value }) => {
            assert_eq!(selector.raw, ".[#]");
            assert_eq!(selector.kind(), &SelectorKind::Length);
            assert_eq!(value, Value::Integer(2));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_missing_property() {
    assert_eq!(
        query(users(), ".meta.missing"),
        Err(SelectError::ValueNotFound {
            selector: ".missing".into(),
            previous_value: Value::from(json!({"count": 2, "title": "héllo"})),
        })
    );
}

#[test]
fn test_index_on_map_fails() {
    assert!(matches!(
        query(users(), ".meta.[0]"),
        Err(SelectError::UnsupportedTypeForSelector { .. })
    ));
}

#[test]
fn test_next_available_index_read_fails() {
    assert!(matches!(
        query(users(), ".users.[]"),
        Err(SelectError::ValueNotFound { .. })
    ));
}

#[test]
fn test_null_previous_value() {
    assert_eq!(
        query(json!({"a": null}), ".a.b"),
        Err(SelectError::UnexpectedPreviousNilValue { selector: ".a".into() })
    );
}

#[test]
fn test_read_does_not_mutate() {
    let mut c = chain(users(), ".users.[5]");
    assert!(resolve(&mut c, false).is_err());
    assert_eq!(c.document(), Some(&Value::from(users())));
}

#[test]
fn test_create_records_locations() {
    let mut c = chain(json!({}), ".a.[2].b");
    assert_eq!(resolve(&mut c, true), Ok(None));

    let locations: Vec<Option<Location>> = c.ids().map(|id| c.node(id).location.clone()).collect();
    assert_eq!(
        locations,
        vec![
            None,
            Some(Location::Key("a".into())),
            Some(Location::Index(2)),
            Some(Location::Key("b".into())),
        ]
    );
}

#[test]
fn test_create_dynamic_on_map_cannot_append() {
    let mut c = chain(json!({"m": {"k": {"name": "y"}}}), ".m.(name=x)");
    assert!(matches!(
        resolve(&mut c, true),
        Err(SelectError::UnsupportedTypeForSelector { .. })
    ));
    assert_eq!(c.node(c.terminal()).selector.kind(), &SelectorKind::NextAvailableIndex);
}
