use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum YamliteError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Node(#[from] NodeError),
}

/// Errors produced while turning text (or an event stream) into a node tree.
/// A failed parse never yields a partial tree.
#[derive(Error, Debug, Diagnostic)]
#[error("Parse Error")]
pub enum ParseError {
    #[error("Unexpected {found}")]
    #[diagnostic(
        code(parser::unexpected_event),
        help("The document structure did not match what the parser expected at this point.")
    )]
    UnexpectedEvent {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected {expected}, but found {found}")]
        span: SourceSpan,
        expected: String,
        found: String,
    },

    #[error("Non-scalar mapping key")]
    #[diagnostic(
        code(parser::non_scalar_key),
        help("Mapping keys must be plain scalars; sequences and mappings cannot be used as keys.")
    )]
    NonScalarKey {
        #[source_code]
        src: NamedSource<String>,
        #[label("This cannot be used as a mapping key")]
        span: SourceSpan,
    },

    #[error("Multiple documents are unsupported")]
    #[diagnostic(
        code(parser::multiple_documents),
        help("Only a single document per input is supported; remove the extra `---` section.")
    )]
    MultipleDocuments {
        #[source_code]
        src: NamedSource<String>,
        #[label("A second document starts here")]
        span: SourceSpan,
    },

    #[error("Tab character in indentation")]
    #[diagnostic(
        code(scanner::tab_indentation),
        help("Indentation must use spaces only.")
    )]
    TabIndentation {
        #[source_code]
        src: NamedSource<String>,
        #[label("Tab found here")]
        span: SourceSpan,
    },

    #[error("Bad indentation")]
    #[diagnostic(
        code(scanner::bad_indentation),
        help("Entries must line up with their siblings, and nested blocks must be indented deeper than their parent entry.")
    )]
    BadIndentation {
        #[source_code]
        src: NamedSource<String>,
        #[label("This entry does not line up with any open block")]
        span: SourceSpan,
    },

    #[error("Malformed entry")]
    #[diagnostic(
        code(scanner::malformed_entry),
        help("Expected a `key: value` or `- item` entry here.")
    )]
    MalformedEntry {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected {expected}")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Content after the root value")]
    #[diagnostic(
        code(scanner::trailing_content),
        help("A document holds exactly one root value; nothing may follow it.")
    )]
    TrailingContent {
        #[source_code]
        src: NamedSource<String>,
        #[label("The document already ended before this line")]
        span: SourceSpan,
    },
}

/// Errors produced while rendering a node tree back to text.
/// A failed emit never yields partial text.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum EmitError {
    #[error("cannot emit a null node (at {path})")]
    #[diagnostic(
        code(emitter::null_node),
        help("Null nodes have no block-style representation; assign a value before emitting.")
    )]
    NullNode { path: String },
}

/// Errors produced by node access, mutation, and typed conversion.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum NodeError {
    #[error("node type mismatch: {op} requires a {expected} node, found {found}")]
    #[diagnostic(code(node::type_error))]
    TypeError {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("index {index} is out of range for a node with {len} entries")]
    #[diagnostic(code(node::out_of_range))]
    OutOfRange { index: usize, len: usize },

    #[error("cannot convert scalar {value:?} to {target}")]
    #[diagnostic(
        code(node::scalar_conversion),
        help("The scalar text must be a fully valid value for the target type; trailing characters are not ignored.")
    )]
    ScalarConversion {
        value: String,
        target: &'static str,
    },
}
