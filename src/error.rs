use thiserror::Error;

use crate::{selector::Selector, value::Value};

/// Errors that stop the resolution of a selector chain.
///
/// Resolution never recovers locally: the first failing step is returned to
/// the caller and no partial result accompanies it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    /// Resolution was attempted on the root node itself.
    #[error("node is missing previous node")]
    MissingPreviousNode,

    /// The previous step produced null or nothing at all.
    #[error("next value is nil: previous selector {selector}")]
    UnexpectedPreviousNilValue {
        /// `current` text of the step that produced the unusable value
        selector: String,
    },

    /// Lookup or match failed and create mode is off.
    #[error("could not find value: selector {selector}, previous value {previous_value}")]
    ValueNotFound {
        selector: String,
        previous_value: Value,
    },

    /// The previous value has the wrong shape for this step.
    #[error("selector {selector} does not support value of type {}: {value}", type_label(.value))]
    UnsupportedTypeForSelector { selector: Selector, value: Value },

    /// Creating this index would pad the sequence past the allowed limit.
    #[error("index too large to create: selector {selector}, sequence length {length}")]
    IndexTooLarge {
        selector: String,
        index: usize,
        length: usize,
    },

    /// The step cannot be resolved or written through.
    #[error("selector is not supported here: {selector}")]
    UnsupportedSelector { selector: String },
}

fn type_label(value: &Value) -> &'static str {
    value.kind().map_or("null", |k| k.as_str())
}

/// Errors produced while turning selector text into selectors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty selector step at position {0}")]
    EmptyStep(usize),

    #[error("unterminated '{expected}' opened at position {position}")]
    Unterminated { expected: char, position: usize },

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("invalid index '{0}': expected a non-negative integer, '', '#' or '@'")]
    InvalidIndex(String),

    #[error("invalid condition '{0}': expected key=value, key!=value or key=~pattern")]
    InvalidCondition(String),

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
