pub mod cli;
pub mod condition;
pub mod error;
pub mod lexer;
pub mod mutate;
pub mod node;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod selector;
pub mod value;

pub use condition::Condition;
pub use error::{ParseError, SelectError};
pub use lexer::Lexer;
pub use mutate::{delete, put};
pub use node::{Chain, Location, Node, NodeId};
pub use output::{to_json, to_json_pretty};
pub use parser::{Parser, parse_selector};
pub use resolver::{resolve, resolve_node, select};
pub use selector::{Selector, SelectorKind};
pub use value::{Kind, Value};
