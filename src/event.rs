use crate::error::ParseError;

/// Represents the different kinds of structural events a tokenizer can
/// produce. Together they describe a well-formed stream: a stream contains
/// documents, a document contains one root value, and sequences and mappings
/// are properly nested and closed.
#[derive(Debug, PartialEq, Clone)]
pub enum EventKind {
    /// The start of the event stream. Always the first event.
    StreamStart,
    /// The end of the event stream. Always the last event.
    StreamEnd,
    /// The start of a document within the stream.
    DocumentStart,
    /// The end of a document within the stream.
    DocumentEnd,
    /// A single scalar value, held as its verbatim text.
    Scalar(String),
    /// The start of a block sequence.
    SequenceStart,
    /// The end of a block sequence.
    SequenceEnd,
    /// The start of a block mapping.
    MappingStart,
    /// The end of a block mapping.
    MappingEnd,
}

impl EventKind {
    /// A short human-readable name, used in parser error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            EventKind::StreamStart => "start of stream",
            EventKind::StreamEnd => "end of stream",
            EventKind::DocumentStart => "start of document",
            EventKind::DocumentEnd => "end of document",
            EventKind::Scalar(_) => "scalar",
            EventKind::SequenceStart => "start of sequence",
            EventKind::SequenceEnd => "end of sequence",
            EventKind::MappingStart => "start of mapping",
            EventKind::MappingEnd => "end of mapping",
        }
    }
}

/// An event with its kind and byte position in the source text.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Event {
    pub fn new(kind: EventKind, pos_start: usize, pos_end: usize) -> Event {
        Event {
            kind,
            pos_start,
            pos_end,
        }
    }
}

/// A pull-based source of structural events.
///
/// The tree builder consumes events one at a time through this trait, so it
/// can be driven by the real [`Scanner`](crate::scanner::Scanner) or by a
/// synthetic event sequence in tests, and so the concrete tokenizer stays
/// swappable.
///
/// Implementations must keep yielding events until `StreamEnd`; tokenizer
/// failures surface as [`ParseError`]s.
pub trait EventSource {
    fn next_event(&mut self) -> Result<Event, ParseError>;
}
