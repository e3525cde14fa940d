use dotsel::{Condition, ParseError, Selector, SelectorKind, Value, parse_selector};

fn parse(input: &str) -> Vec<Selector> {
    parse_selector(input).unwrap()
}

#[test]
fn test_root_only() {
    assert!(parse(".").is_empty());
}

#[test]
fn test_leading_dot_optional() {
    let kinds = |input| parse(input).into_iter().map(|s| s.kind().clone()).collect::<Vec<_>>();
    assert_eq!(kinds("a.b"), kinds(".a.b"));
}

#[test]
fn test_raw_and_current_text() {
    let selectors = parse(".users.(name=x).tags[0]");
    let raw: Vec<&str> = selectors.iter().map(|s| s.raw.as_str()).collect();
    assert_eq!(raw, vec![".users", ".(name=x)", ".tags", "[0]"]);
    for s in &selectors {
        assert_eq!(s.raw, s.current);
    }
}

#[test]
fn test_every_kind() {
    let kinds: Vec<SelectorKind> = parse(r".a\.b.[0].[].(x=1)(y=z).[#].[@]")
        .into_iter()
        .map(|s| s.kind().clone())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SelectorKind::Property("a.b".into()),
            SelectorKind::Index(0),
            SelectorKind::NextAvailableIndex,
            SelectorKind::Dynamic(vec![
                Condition::equal("x", Value::Integer(1)),
                Condition::equal("y", "z"),
            ]),
            SelectorKind::Length,
            SelectorKind::Type,
        ]
    );
}

#[test]
fn test_quoted_condition_value() {
    let selectors = parse(r#".(title="a.b (c)")"#);
    assert_eq!(
        selectors[0].kind(),
        &SelectorKind::Dynamic(vec![Condition::equal("title", "a.b (c)")])
    );
}

#[test]
fn test_self_condition() {
    let selectors = parse(".tags.(.=b)");
    assert_eq!(
        selectors[1].kind(),
        &SelectorKind::Dynamic(vec![Condition::equal(".", "b")])
    );
}

#[test]
fn test_errors() {
    assert_eq!(parse_selector(".a..b"), Err(ParseError::EmptyStep(3)));
    assert_eq!(parse_selector(".[abc]"), Err(ParseError::InvalidIndex("abc".into())));
    assert_eq!(
        parse_selector(".(abc)"),
        Err(ParseError::InvalidCondition("abc".into()))
    );
    assert!(matches!(
        parse_selector(".(a=~[)"),
        Err(ParseError::InvalidPattern { .. })
    ));
}
