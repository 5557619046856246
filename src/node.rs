use crate::error::NodeError;
use std::str::FromStr;

/// The discriminant of a [`Node`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeKind {
    /// An absent or empty value.
    Null,
    /// A leaf holding a single textual value.
    Scalar,
    /// An ordered list of child nodes.
    Sequence,
    /// An ordered list of `(key, child)` pairs. Duplicate keys may coexist.
    Map,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
            NodeKind::Map => "map",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single element of a document tree.
///
/// Every node is exactly one of null, scalar, sequence, or map, and each
/// variant carries the storage for that shape alone. A parent exclusively
/// owns its children; dropping the root tears the whole tree down.
///
/// Scalars hold their value as verbatim text regardless of what it encodes;
/// typed access happens on demand through [`Node::convert`]. Map entries keep
/// insertion order, and duplicate keys are allowed to coexist: lookups return
/// the first match.
#[derive(Debug, PartialEq, Clone, Default)]
pub enum Node {
    #[default]
    Null,
    Scalar(String),
    Sequence(Vec<Node>),
    Map(Vec<(String, Node)>),
}

impl Node {
    /// Constructs an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Node {
        match kind {
            NodeKind::Null => Node::Null,
            NodeKind::Scalar => Node::Scalar(String::new()),
            NodeKind::Sequence => Node::Sequence(Vec::new()),
            NodeKind::Map => Node::Map(Vec::new()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Scalar(_) => NodeKind::Scalar,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Map(_) => NodeKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    /// The scalar text, if this node is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// The child nodes, if this node is a sequence.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The `(key, child)` entries, if this node is a map.
    pub fn as_map(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// The number of children of a sequence or map; `0` for leaves.
    pub fn len(&self) -> usize {
        match self {
            Node::Sequence(items) => items.len(),
            Node::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the first entry with `key` without modifying the tree.
    ///
    /// Returns `None` when the key is absent or the node is not a map. This
    /// is the read-path companion to [`Node::entry`] and never inserts.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Mutable variant of [`Node::get`]. Never inserts.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        match self {
            Node::Map(entries) => entries
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Auto-vivifying map access: returns the first entry with `key`, or
    /// appends a new null entry with that key and returns it.
    ///
    /// Note that this mutates the tree on a missing key; traversal code that
    /// should not insert must use [`Node::get`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::TypeError`] if this node is not a map.
    pub fn entry(&mut self, key: impl Into<String>) -> Result<&mut Node, NodeError> {
        let found = self.kind().name();
        match self {
            Node::Map(entries) => {
                let key = key.into();
                if let Some(index) = entries.iter().position(|(k, _)| *k == key) {
                    Ok(&mut entries[index].1)
                } else {
                    entries.push((key, Node::Null));
                    let last = entries.len() - 1;
                    Ok(&mut entries[last].1)
                }
            }
            _ => Err(NodeError::TypeError {
                op: "entry",
                expected: "map",
                found,
            }),
        }
    }

    /// Bounds-checked positional access. On a sequence this is the `index`th
    /// child; on a map, the value of the `index`th entry.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::OutOfRange`] for an index past the end, and
    /// [`NodeError::TypeError`] on a leaf node.
    pub fn at(&self, index: usize) -> Result<&Node, NodeError> {
        match self {
            Node::Sequence(items) => items.get(index).ok_or(NodeError::OutOfRange {
                index,
                len: items.len(),
            }),
            Node::Map(entries) => entries
                .get(index)
                .map(|(_, v)| v)
                .ok_or(NodeError::OutOfRange {
                    index,
                    len: entries.len(),
                }),
            other => Err(NodeError::TypeError {
                op: "at",
                expected: "sequence or map",
                found: other.kind().name(),
            }),
        }
    }

    /// Mutable variant of [`Node::at`].
    ///
    /// # Errors
    ///
    /// Same contract as [`Node::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Node, NodeError> {
        let found = self.kind().name();
        match self {
            Node::Sequence(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or(NodeError::OutOfRange { index, len })
            }
            Node::Map(entries) => {
                let len = entries.len();
                entries
                    .get_mut(index)
                    .map(|(_, v)| v)
                    .ok_or(NodeError::OutOfRange { index, len })
            }
            _ => Err(NodeError::TypeError {
                op: "at_mut",
                expected: "sequence or map",
                found,
            }),
        }
    }

    /// Appends a child to a sequence, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::TypeError`] if this node is not a sequence.
    pub fn push(&mut self, value: impl Into<Node>) -> Result<(), NodeError> {
        let found = self.kind().name();
        match self {
            Node::Sequence(items) => {
                items.push(value.into());
                Ok(())
            }
            _ => Err(NodeError::TypeError {
                op: "push",
                expected: "sequence",
                found,
            }),
        }
    }

    /// Overwrites this node with `value`, whatever it held before.
    ///
    /// This is destructive: assigning a scalar over a map discards the map
    /// and its children. Scalar sources are stored as their canonical text
    /// (see the `From` impls below); integers and floats use Rust's
    /// locale-independent `Display` rendering.
    pub fn set(&mut self, value: impl Into<Node>) {
        *self = value.into();
    }

    /// Parses the scalar text into `T`.
    ///
    /// String targets always succeed; numeric targets must consume the whole
    /// text, so `"3.14"` converts to `f64` but not to `i64`, and trailing
    /// garbage is an error rather than a truncation.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::TypeError`] if this node is not a scalar, and
    /// [`NodeError::ScalarConversion`] if the text is not a fully valid
    /// value for `T`.
    pub fn convert<T: FromStr>(&self) -> Result<T, NodeError> {
        match self {
            Node::Scalar(text) => text.parse::<T>().map_err(|_| NodeError::ScalarConversion {
                value: text.clone(),
                target: std::any::type_name::<T>(),
            }),
            other => Err(NodeError::TypeError {
                op: "convert",
                expected: "scalar",
                found: other.kind().name(),
            }),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Node {
        Node::Scalar(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Node {
        Node::Scalar(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Node {
        Node::Scalar(value.to_string())
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Node {
        Node::Sequence(items)
    }
}

impl From<Vec<(String, Node)>> for Node {
    fn from(entries: Vec<(String, Node)>) -> Node {
        Node::Map(entries)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(value: $t) -> Node {
                    Node::Scalar(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);
