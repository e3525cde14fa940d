//! JSON rendering of [`Value`]s.
//!
//! Used for error messages and for the command-line output. Mapping keys are
//! written in insertion order so a document that was read, modified and
//! written back keeps its original layout.
//!
//! # Examples
//!
//! ```
//! use dotsel::Value;
//! use dotsel::output::{to_json, to_json_pretty};
//!
//! let value = Value::Array(vec![Value::Integer(1), Value::Float(2.0)]);
//!
//! assert_eq!(to_json(&value), "[1,2.0]");
//! assert_eq!(to_json_pretty(&value), "[\n  1,\n  2.0\n]");
//! ```

use std::fmt::Write;

use indexmap::IndexMap;

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, 0);
        out
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => {
                let _ = write!(out, "{}", n);
            }
            Value::Float(n) => write_float(out, *n),
            Value::String(s) => write_string(out, s),
            Value::Array(arr) => self.write_array(out, arr, depth),
            Value::Object(obj) => self.write_object(out, obj, depth),
        }
    }

    fn write_array(&self, out: &mut String, arr: &[Value], depth: usize) {
        if arr.is_empty() {
            out.push_str("[]");
            return;
        }

        out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(out, depth + 1);
            self.write_value(out, item, depth + 1);
        }
        self.newline(out, depth);
        out.push(']');
    }

    fn write_object(&self, out: &mut String, obj: &IndexMap<String, Value>, depth: usize) {
        if obj.is_empty() {
            out.push_str("{}");
            return;
        }

        out.push('{');
        for (i, (key, item)) in obj.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.newline(out, depth + 1);
            write_string(out, key);
            out.push(':');
            if self.pretty {
                out.push(' ');
            }
            self.write_value(out, item, depth + 1);
        }
        self.newline(out, depth);
        out.push('}');
    }

    fn newline(&self, out: &mut String, depth: usize) {
        if self.pretty {
            out.push('\n');
            out.push_str(&"  ".repeat(depth));
        }
    }
}

fn write_float(out: &mut String, n: f64) {
    if !n.is_finite() {
        // JSON has no representation for NaN or infinities
        out.push_str("null");
    } else if n.fract() == 0.0 && n.abs() < 1e16 {
        let _ = write!(out, "{:.1}", n);
    } else {
        let _ = write!(out, "{}", n);
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Converts a Value to compact JSON.
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to JSON with 2-space indentation, one element per line.
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
