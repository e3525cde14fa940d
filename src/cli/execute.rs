//! Execute selector commands against JSON input

use std::{fmt, str::FromStr};

use log::debug;

use super::CliError;
use crate::{Chain, Value, delete, parse_selector, put, select};

/// How the value argument of `put` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    String,
    Int,
    Float,
    Bool,
    Json,
}

impl FromStr for ValueType {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(ValueType::String),
            "int" | "integer" => Ok(ValueType::Int),
            "float" => Ok(ValueType::Float),
            "bool" | "boolean" => Ok(ValueType::Bool),
            "json" => Ok(ValueType::Json),
            _ => Err(CliError::UnknownValueType(s.to_string())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
            ValueType::Json => "json",
        };
        f.write_str(name)
    }
}

/// The command to run
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Print the selected value
    Select,
    /// Write a value, creating missing steps, and print the document
    Put { value: String, value_type: ValueType },
    /// Remove the selected value and print the document
    Delete,
}

/// Options for a single command
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Selector text, e.g. `.users.(name=x).age`
    pub selector: String,
    /// JSON input string
    pub input: Option<String>,
    pub operation: Operation,
}

/// Convert the `put` value argument into a [`Value`].
pub fn parse_value(value: &str, value_type: ValueType) -> Result<Value, CliError> {
    let invalid = || CliError::InvalidValue {
        value: value.to_string(),
        expected: value_type,
    };
    match value_type {
        ValueType::String => Ok(Value::String(value.to_string())),
        ValueType::Int => value.trim().parse().map(Value::Integer).map_err(|_| invalid()),
        ValueType::Float => value.trim().parse().map(Value::Float).map_err(|_| invalid()),
        ValueType::Bool => value.trim().parse().map(Value::Boolean).map_err(|_| invalid()),
        ValueType::Json => Ok(Value::from(serde_json::from_str::<serde_json::Value>(value)?)),
    }
}

/// Run a command and return the value to print.
pub fn execute(options: &ExecuteOptions) -> Result<Value, CliError> {
    let selectors = parse_selector(&options.selector)?;

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document = Value::from(serde_json::from_str::<serde_json::Value>(input)?);

    debug!("{:?} {}", options.operation, options.selector);

    let chain = Chain::with_selectors(document, selectors);
    let result = match &options.operation {
        Operation::Select => {
            let mut chain = chain;
            select(&mut chain)?
        }
        Operation::Put { value, value_type } => put(chain, parse_value(value, *value_type)?)?,
        Operation::Delete => delete(chain)?,
    };
    Ok(result)
}
