pub mod api;
pub mod emitter;
pub mod error;
pub mod event;
pub mod node;
pub mod parser;
pub mod scanner;
mod serialization;

pub use api::{emit, parse, parse_named, to_json};
pub use error::{EmitError, NodeError, ParseError, YamliteError};
pub use node::{Node, NodeKind};
