use crate::error::{ParseError, YamliteError};
use crate::event::{Event, EventKind, EventSource};
use crate::node::Node;
use crate::scanner::Scanner;
use miette::NamedSource;
use std::sync::Arc;

/// Builds a node tree from a structural event stream.
///
/// The builder enforces the strict stream protocol: `StreamStart`,
/// `DocumentStart`, exactly one root value, `DocumentEnd`, `StreamEnd`. Any
/// deviation, including a second document or a non-scalar mapping key, is a
/// [`ParseError`], and a failed build never yields a partial tree.
///
/// It is generic over [`EventSource`] so it can be driven by the real
/// [`Scanner`] or by a synthetic event sequence in tests.
pub struct TreeBuilder<S: EventSource> {
    events: S,
    source: Arc<NamedSource<String>>,
}

impl<S: EventSource> TreeBuilder<S> {
    pub fn new(events: S, source: Arc<NamedSource<String>>) -> Self {
        Self { events, source }
    }

    /// Consumes the whole stream and returns the document's root node.
    pub fn build_document(&mut self) -> Result<Node, ParseError> {
        self.expect(EventKind::StreamStart)?;
        self.expect(EventKind::DocumentStart)?;

        let event = self.events.next_event()?;
        let root = self.build_node(event)?;

        self.expect(EventKind::DocumentEnd)?;
        let event = self.events.next_event()?;
        match event.kind {
            EventKind::StreamEnd => Ok(root),
            EventKind::DocumentStart => Err(ParseError::MultipleDocuments {
                src: self.src(),
                span: span_of(&event),
            }),
            ref other => Err(self.err_unexpected(EventKind::StreamEnd.describe(), other, &event)),
        }
    }

    /// Recursively builds one node starting from `event`.
    fn build_node(&mut self, event: Event) -> Result<Node, ParseError> {
        match event.kind {
            EventKind::Scalar(text) => Ok(Node::Scalar(text)),

            EventKind::SequenceStart => {
                let mut items = Vec::new();
                loop {
                    let event = self.events.next_event()?;
                    if event.kind == EventKind::SequenceEnd {
                        break;
                    }
                    items.push(self.build_node(event)?);
                }
                Ok(Node::Sequence(items))
            }

            EventKind::MappingStart => {
                let mut entries = Vec::new();
                loop {
                    let event = self.events.next_event()?;
                    match event.kind {
                        EventKind::MappingEnd => break,
                        EventKind::Scalar(key) => {
                            let value_event = self.events.next_event()?;
                            let value = self.build_node(value_event)?;
                            // Duplicate keys are kept, in arrival order;
                            // lookups surface the first one.
                            entries.push((key, value));
                        }
                        _ => {
                            return Err(ParseError::NonScalarKey {
                                src: self.src(),
                                span: span_of(&event),
                            })
                        }
                    }
                }
                Ok(Node::Map(entries))
            }

            ref other => {
                Err(self.err_unexpected("a scalar, sequence, or mapping", other, &event))
            }
        }
    }

    fn expect(&mut self, expected: EventKind) -> Result<Event, ParseError> {
        let event = self.events.next_event()?;
        if std::mem::discriminant(&event.kind) == std::mem::discriminant(&expected) {
            Ok(event)
        } else {
            Err(self.err_unexpected(expected.describe(), &event.kind, &event))
        }
    }

    fn err_unexpected(&self, expected: &str, found: &EventKind, event: &Event) -> ParseError {
        ParseError::UnexpectedEvent {
            src: self.src(),
            span: span_of(event),
            expected: expected.to_string(),
            found: found.describe().to_string(),
        }
    }

    fn src(&self) -> NamedSource<String> {
        (*self.source).clone()
    }
}

fn span_of(event: &Event) -> miette::SourceSpan {
    (
        event.pos_start,
        event.pos_end.saturating_sub(event.pos_start),
    )
        .into()
}

/// The text-to-tree front end: wires a [`Scanner`] to a [`TreeBuilder`].
pub struct Parser<'a> {
    builder: TreeBuilder<Scanner<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::new_with_name(source_text, "source.yaml".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Self {
        let source = Arc::new(NamedSource::new(name, source_text.to_string()));
        let scanner = Scanner::with_source(source_text, Arc::clone(&source));
        Self {
            builder: TreeBuilder::new(scanner, source),
        }
    }

    pub fn parse_document(&mut self) -> Result<Node, YamliteError> {
        let root = self.builder.build_document()?;
        log::debug!("parsed document with {} root", root.kind());
        Ok(root)
    }
}
