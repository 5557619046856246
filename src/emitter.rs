use crate::error::EmitError;
use crate::node::Node;

/// Renders a node tree as block-style text.
///
/// Layout rules: mapping entries render as `key: value` (or `key:` followed
/// by an indented block), sequence entries as `- value` (or `-` followed by
/// an indented block), with a fixed 2-space indent per nesting level. Scalar
/// text is written verbatim, without quoting or escaping.
///
/// A null node anywhere in the tree aborts the emit; the error carries the
/// key/index path of the offending node.
pub struct Emitter {
    out: String,
    path: Vec<String>,
}

impl Emitter {
    pub fn new() -> Emitter {
        Emitter {
            out: String::new(),
            path: Vec::new(),
        }
    }

    /// Renders `node` to text, consuming the emitter. All-or-nothing: on
    /// failure no partial text is returned.
    pub fn emit(mut self, node: &Node) -> Result<String, EmitError> {
        match node {
            Node::Null => Err(self.null_error()),
            Node::Scalar(text) => Ok(format!("{text}\n")),
            container => {
                self.emit_node(container, 0)?;
                Ok(self.out)
            }
        }
    }

    /// Writes the entries of a sequence or map node at `level`.
    fn emit_node(&mut self, node: &Node, level: usize) -> Result<(), EmitError> {
        match node {
            Node::Sequence(items) => {
                for (index, child) in items.iter().enumerate() {
                    self.indent(level);
                    match child {
                        Node::Null => {
                            self.path.push(format!("[{index}]"));
                            return Err(self.null_error());
                        }
                        Node::Scalar(text) if text.is_empty() => self.out.push_str("-\n"),
                        Node::Scalar(text) => {
                            self.out.push_str("- ");
                            self.out.push_str(text);
                            self.out.push('\n');
                        }
                        nested => {
                            self.out.push_str("-\n");
                            self.path.push(format!("[{index}]"));
                            self.emit_node(nested, level + 1)?;
                            self.path.pop();
                        }
                    }
                }
            }
            Node::Map(entries) => {
                for (key, value) in entries {
                    self.indent(level);
                    self.out.push_str(key);
                    match value {
                        Node::Null => {
                            self.path.push(key.clone());
                            return Err(self.null_error());
                        }
                        Node::Scalar(text) if text.is_empty() => self.out.push_str(":\n"),
                        Node::Scalar(text) => {
                            self.out.push_str(": ");
                            self.out.push_str(text);
                            self.out.push('\n');
                        }
                        nested => {
                            self.out.push_str(":\n");
                            self.path.push(key.clone());
                            self.emit_node(nested, level + 1)?;
                            self.path.pop();
                        }
                    }
                }
            }
            // Scalar and null roots are handled in `emit`; children of that
            // shape never reach here.
            Node::Scalar(_) | Node::Null => {}
        }
        Ok(())
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str("  ");
        }
    }

    fn null_error(&self) -> EmitError {
        let mut path = String::from("$");
        for segment in &self.path {
            if segment.starts_with('[') {
                path.push_str(segment);
            } else {
                path.push('.');
                path.push_str(segment);
            }
        }
        EmitError::NullNode { path }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
