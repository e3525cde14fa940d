//! Splits selector text into raw steps.
//!
//! ```text
//! .users.(name=x)(age=3).tags.[0]
//! ```
//!
//! becomes five steps. The lexer only checks balance and separators; the
//! meaning of each step is decided by [`crate::parser`].

use crate::error::ParseError;

/// Shape of a raw step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepToken {
    /// A property name with `\.` style escapes already removed
    Property(String),
    /// Contents between `[` and `]`
    Bracket(String),
    /// Contents of each `(...)` group, in order
    Conditions(Vec<String>),
}

/// One step of selector text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStep {
    pub token: StepToken,
    /// The step exactly as written, including a leading `.` when present
    pub text: String,
    /// Character offset of the step in the input
    pub position: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Split the whole input into steps. `.` and the empty string yield none.
    pub fn tokenize(&mut self) -> Result<Vec<RawStep>, ParseError> {
        let mut steps = Vec::new();

        if self.current_char() == Some('.') {
            self.advance();
        }
        if self.current_char().is_none() {
            return Ok(steps);
        }

        let mut start = 0;
        loop {
            let token = self.read_step()?;
            steps.push(RawStep {
                token,
                text: self.text_from(start),
                position: start,
            });

            match self.current_char() {
                None => return Ok(steps),
                Some('.') => {
                    start = self.position;
                    self.advance();
                    if self.current_char().is_none() {
                        return Err(ParseError::EmptyStep(self.position));
                    }
                }
                Some('[') | Some('(') => start = self.position,
                Some(found) => {
                    return Err(ParseError::UnexpectedChar {
                        found,
                        position: self.position,
                    });
                }
            }
        }
    }

    fn read_step(&mut self) -> Result<StepToken, ParseError> {
        match self.current_char() {
            Some('[') => self.read_bracket(),
            Some('(') => self.read_conditions(),
            _ => self.read_property(),
        }
    }

    fn read_property(&mut self) -> Result<StepToken, ParseError> {
        let start = self.position;
        let mut name = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '.' | '[' | '(' => break,
                ']' | ')' => {
                    return Err(ParseError::UnexpectedChar {
                        found: ch,
                        position: self.position,
                    });
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some(escaped) => name.push(escaped),
                        None => name.push('\\'),
                    }
                    if self.current_char().is_some() {
                        self.advance();
                    }
                }
                _ => {
                    name.push(ch);
                    self.advance();
                }
            }
        }

        if name.is_empty() {
            return Err(ParseError::EmptyStep(start));
        }
        Ok(StepToken::Property(name))
    }

    fn read_bracket(&mut self) -> Result<StepToken, ParseError> {
        let open = self.position;
        self.advance(); // consume '['

        let mut inner = String::new();
        loop {
            match self.current_char() {
                Some(']') => {
                    self.advance();
                    return Ok(StepToken::Bracket(inner));
                }
                Some(ch) => {
                    inner.push(ch);
                    self.advance();
                }
                None => {
                    return Err(ParseError::Unterminated {
                        expected: ']',
                        position: open,
                    });
                }
            }
        }
    }

    fn read_conditions(&mut self) -> Result<StepToken, ParseError> {
        let mut groups = Vec::new();
        while self.current_char() == Some('(') {
            groups.push(self.read_group()?);
        }
        Ok(StepToken::Conditions(groups))
    }

    /// Read one `(...)` group. Quoted text may contain `)`.
    fn read_group(&mut self) -> Result<String, ParseError> {
        let open = self.position;
        self.advance(); // consume '('

        let mut inner = String::new();
        let mut quote_start = None;
        loop {
            let Some(ch) = self.current_char() else {
                return Err(match quote_start {
                    Some(position) => ParseError::Unterminated { expected: '"', position },
                    None => ParseError::Unterminated { expected: ')', position: open },
                });
            };
            self.advance();

            match (ch, quote_start) {
                (')', None) => return Ok(inner),
                ('"', None) => quote_start = Some(self.position - 1),
                ('"', Some(_)) => quote_start = None,
                ('\\', Some(_)) => {
                    // keep the escape for the literal parser
                    inner.push(ch);
                    if let Some(next) = self.current_char() {
                        inner.push(next);
                        self.advance();
                    }
                    continue;
                }
                _ => {}
            }
            inner.push(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<StepToken> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_root() {
        assert!(tokens(".").is_empty());
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_properties_and_brackets() {
        assert_eq!(
            tokens(".a.b[0].[]"),
            vec![
                StepToken::Property("a".into()),
                StepToken::Property("b".into()),
                StepToken::Bracket("0".into()),
                StepToken::Bracket("".into()),
            ]
        );
    }

    #[test]
    fn test_step_text() {
        let steps = Lexer::new(".a[0].(x=y)").tokenize().unwrap();
        let texts: Vec<&str> = steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec![".a", "[0]", ".(x=y)"]);
        let positions: Vec<usize> = steps.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 2, 5]);
    }

    #[test]
    fn test_escaped_dot() {
        assert_eq!(tokens(r".a\.b.c"), vec![
            StepToken::Property("a.b".into()),
            StepToken::Property("c".into()),
        ]);
    }

    #[test]
    fn test_condition_groups() {
        assert_eq!(
            tokens(r#".(a=1)(b=")")"#),
            vec![StepToken::Conditions(vec!["a=1".into(), r#"b=")""#.into()])]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(Lexer::new(".a..b").tokenize(), Err(ParseError::EmptyStep(3)));
        assert_eq!(Lexer::new(".a.").tokenize(), Err(ParseError::EmptyStep(3)));
        assert_eq!(
            Lexer::new(".[0").tokenize(),
            Err(ParseError::Unterminated { expected: ']', position: 1 })
        );
        assert_eq!(
            Lexer::new(".(a=b").tokenize(),
            Err(ParseError::Unterminated { expected: ')', position: 1 })
        );
        assert_eq!(
            Lexer::new(r#".(a="b)"#).tokenize(),
            Err(ParseError::Unterminated { expected: '"', position: 4 })
        );
        assert_eq!(
            Lexer::new(".[0]x").tokenize(),
            Err(ParseError::UnexpectedChar { found: 'x', position: 4 })
        );
    }
}
