use regex::Regex;

use crate::{
    condition::Condition,
    error::ParseError,
    lexer::{Lexer, RawStep, StepToken},
    selector::{Selector, SelectorKind},
    value::Value,
};

pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser { lexer }
    }

    /// Parse every step after the root. `.` yields an empty list.
    pub fn parse(&mut self) -> Result<Vec<Selector>, ParseError> {
        self.lexer
            .tokenize()?
            .into_iter()
            .map(parse_step)
            .collect()
    }
}

/// Parse selector text such as `.users.(name=x).tags.[0]`.
///
/// # Examples
///
/// ```
/// use dotsel::parser::parse_selector;
/// use dotsel::SelectorKind;
///
/// let selectors = parse_selector(".items.[#]").unwrap();
/// assert_eq!(selectors[0].kind(), &SelectorKind::Property("items".into()));
/// assert_eq!(selectors[1].kind(), &SelectorKind::Length);
/// ```
pub fn parse_selector(input: &str) -> Result<Vec<Selector>, ParseError> {
    Parser::new(Lexer::new(input)).parse()
}

fn parse_step(step: RawStep) -> Result<Selector, ParseError> {
    let kind = match step.token {
        StepToken::Property(name) => SelectorKind::Property(name),
        StepToken::Bracket(inner) => parse_bracket(&inner)?,
        StepToken::Conditions(groups) => SelectorKind::Dynamic(
            groups
                .iter()
                .map(|g| parse_condition(g))
                .collect::<Result<_, _>>()?,
        ),
    };
    Ok(Selector::new(step.text, kind))
}

fn parse_bracket(inner: &str) -> Result<SelectorKind, ParseError> {
    match inner.trim() {
        "" => Ok(SelectorKind::NextAvailableIndex),
        "#" => Ok(SelectorKind::Length),
        "@" => Ok(SelectorKind::Type),
        digits if digits.bytes().all(|b| b.is_ascii_digit()) => digits
            .parse::<usize>()
            .map(SelectorKind::Index)
            .map_err(|_| ParseError::InvalidIndex(inner.to_string())),
        _ => Err(ParseError::InvalidIndex(inner.to_string())),
    }
}

/// Parse `key=value`, `key!=value` or `key=~pattern`.
fn parse_condition(group: &str) -> Result<Condition, ParseError> {
    let invalid = || ParseError::InvalidCondition(group.to_string());

    let eq = group.find('=').ok_or_else(invalid)?;
    let (key, negated) = match group[..eq].strip_suffix('!') {
        Some(key) => (key, true),
        None => (&group[..eq], false),
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }

    let rest = &group[eq + 1..];
    if !negated && let Some(pattern) = rest.strip_prefix('~') {
        let pattern = unquote(pattern.trim()).unwrap_or_else(|| pattern.trim().to_string());
        let pattern = Regex::new(&pattern).map_err(|e| ParseError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        return Ok(Condition::Matches {
            key: key.to_string(),
            pattern,
        });
    }

    let expected = parse_literal(rest.trim());
    Ok(if negated {
        Condition::not_equal(key, expected)
    } else {
        Condition::equal(key, expected)
    })
}

/// Literal on the right-hand side of a condition.
fn parse_literal(text: &str) -> Value {
    if let Some(s) = unquote(text) {
        return Value::String(s);
    }
    match text {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        "null" => return Value::Null,
        _ => {}
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::Integer(n);
    }
    if text.contains(['.', 'e', 'E'])
        && let Ok(n) = text.parse::<f64>()
    {
        return Value::Float(n);
    }
    Value::String(text.to_string())
}

/// Strip surrounding double quotes, resolving `\"` and `\\`.
fn unquote(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => result.push(escaped),
                None => result.push('\\'),
            },
            _ => result.push(ch),
        }
    }
    Some(result)
}
