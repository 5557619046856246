use crate::emitter::Emitter;
use crate::error::YamliteError;
use crate::node::Node;
use crate::parser::Parser;

/// Parses block-style text into a node tree.
///
/// This is the primary entry point for reading documents. It returns either
/// a complete tree or an error, never both. Recursion depth during the build
/// is proportional to document nesting depth, which is itself bounded by
/// input size; callers on small stacks should bound their inputs.
///
/// # Errors
///
/// Returns a [`YamliteError`] wrapping a `ParseError` if the text is not a
/// well-formed single-document block structure.
pub fn parse(source: &str) -> Result<Node, YamliteError> {
    parse_named(source, "source.yaml")
}

/// Like [`parse`], with a document name used in error reports.
///
/// # Errors
///
/// Same contract as [`parse`].
pub fn parse_named(source: &str, name: &str) -> Result<Node, YamliteError> {
    log::debug!("parsing {name} ({} bytes)", source.len());
    let mut parser = Parser::new_with_name(source, name.to_string());
    parser.parse_document()
}

/// Renders a node tree back to block-style text.
///
/// Scalar text is written verbatim; values containing structurally
/// significant characters (a leading `- `, a `: ` splitter at an awkward
/// spot) will not round-trip. Empty sequences and maps produce no lines and
/// re-parse as empty scalars.
///
/// # Errors
///
/// Returns a [`YamliteError`] wrapping an `EmitError` if the tree contains a
/// null node; the error names the offending node's key/index path.
pub fn emit(node: &Node) -> Result<String, YamliteError> {
    log::debug!("emitting {} root", node.kind());
    let text = Emitter::new().emit(node)?;
    Ok(text)
}

/// Serializes a node tree as pretty-printed JSON.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn to_json(node: &Node) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(node)
}
