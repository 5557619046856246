use crate::error::ParseError;
use crate::event::{Event, EventKind, EventSource};
use miette::NamedSource;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameKind {
    Sequence,
    Mapping,
}

/// An open block and the column its entries sit at.
#[derive(Debug)]
struct Frame {
    indent: usize,
    kind: FrameKind,
}

/// A `key:` or bare `-` whose value block has not appeared yet. Resolved to
/// an empty scalar unless the next content line is indented deeper.
#[derive(Debug)]
struct Pending {
    indent: usize,
    pos: usize,
}

#[derive(Debug, PartialEq)]
enum State {
    Start,
    Streaming,
    Done,
}

/// A pull-based scanner turning block-style text into structural events.
///
/// The scanner works line by line: indentation opens and closes sequence and
/// mapping blocks, `- ` introduces a sequence entry, and `key: value` or a
/// trailing `key:` introduces a mapping entry. Events are produced lazily,
/// one buffered line at a time, as [`next_event`](EventSource::next_event)
/// is pulled.
///
/// Nested blocks may use any consistent indent deeper than their parent
/// entry; tabs in indentation are an error. Blank lines are skipped. A `---`
/// line separates documents, though the tree builder accepts only one.
pub struct Scanner<'a> {
    source: Arc<NamedSource<String>>,
    input: &'a str,
    /// Byte offset of the next unread line.
    offset: usize,
    queue: VecDeque<Event>,
    stack: Vec<Frame>,
    doc_open: bool,
    root_done: bool,
    expect_child: bool,
    pending: Option<Pending>,
    state: State,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        let source = Arc::new(NamedSource::new("source.yaml", input.to_string()));
        Self::with_source(input, source)
    }

    pub fn with_source(input: &'a str, source: Arc<NamedSource<String>>) -> Self {
        Self {
            source,
            input,
            offset: 0,
            queue: VecDeque::new(),
            stack: Vec::new(),
            doc_open: false,
            root_done: false,
            expect_child: false,
            pending: None,
            state: State::Start,
        }
    }

    fn src(&self) -> NamedSource<String> {
        (*self.source).clone()
    }

    /// Scans forward to the next content line and queues its events.
    fn scan_line(&mut self) -> Result<(), ParseError> {
        loop {
            if self.offset >= self.input.len() {
                self.finish();
                return Ok(());
            }

            let line_start = self.offset;
            let rest = &self.input[self.offset..];
            let (raw_line, next_offset) = match rest.find('\n') {
                Some(i) => (&rest[..i], line_start + i + 1),
                None => (rest, self.input.len()),
            };
            self.offset = next_offset;

            let line = raw_line.trim_end();
            if line.trim_start().is_empty() {
                continue;
            }

            let trimmed = line.trim_start_matches(' ');
            let indent = line.len() - trimmed.len();
            let pos = line_start + indent;
            if trimmed.starts_with('\t') {
                return Err(ParseError::TabIndentation {
                    src: self.src(),
                    span: (pos, 1).into(),
                });
            }

            if trimmed == "---" {
                self.document_separator(pos);
                return Ok(());
            }

            if !self.doc_open {
                self.queue
                    .push_back(Event::new(EventKind::DocumentStart, pos, pos));
                self.doc_open = true;
                self.expect_child = true;
            }

            // A deferred empty value resolves now: either the nested block
            // starts on this line, or the value was empty after all.
            if let Some(pending) = self.pending.take() {
                if indent > pending.indent {
                    self.expect_child = true;
                } else {
                    self.queue.push_back(Event::new(
                        EventKind::Scalar(String::new()),
                        pending.pos,
                        pending.pos,
                    ));
                }
            }

            // Close every block this entry has dedented out of.
            while self.stack.last().is_some_and(|f| f.indent > indent) {
                self.close_top(pos);
            }

            return self.scan_entry(indent, trimmed, pos);
        }
    }

    /// Queues the events for one entry. `text` has no surrounding
    /// whitespace; `pos` is its byte offset in the input. Also used
    /// re-entrantly for compact entries like `- key: value`.
    fn scan_entry(&mut self, indent: usize, text: &str, pos: usize) -> Result<(), ParseError> {
        match self.stack.last() {
            Some(frame) if frame.indent == indent => {}
            Some(_) => {
                // Deeper than the innermost open block. Only valid when an
                // entry above is still waiting for its nested value.
                if !self.expect_child {
                    return Err(ParseError::BadIndentation {
                        src: self.src(),
                        span: (pos, text.len()).into(),
                    });
                }
            }
            None => {
                if self.root_done {
                    return Err(ParseError::TrailingContent {
                        src: self.src(),
                        span: (pos, text.len()).into(),
                    });
                }
            }
        }

        if text == "-" || text.starts_with("- ") {
            self.open_or_continue(indent, FrameKind::Sequence, pos, text)?;
            let rest = if text == "-" {
                ""
            } else {
                text[2..].trim_start()
            };
            if rest.is_empty() {
                self.pending = Some(Pending {
                    indent,
                    pos: pos + text.len(),
                });
            } else {
                let rest_pos = pos + (text.len() - rest.len());
                self.expect_child = true;
                self.scan_entry(indent + 2, rest, rest_pos)?;
            }
            return Ok(());
        }

        if let Some((key, value)) = split_mapping_entry(text) {
            self.open_or_continue(indent, FrameKind::Mapping, pos, text)?;
            self.queue.push_back(Event::new(
                EventKind::Scalar(key.to_string()),
                pos,
                pos + key.len(),
            ));
            if value.is_empty() {
                self.pending = Some(Pending {
                    indent,
                    pos: pos + text.len(),
                });
            } else {
                let value_pos = pos + (text.len() - value.len());
                self.queue.push_back(Event::new(
                    EventKind::Scalar(value.to_string()),
                    value_pos,
                    value_pos + value.len(),
                ));
                self.expect_child = false;
            }
            return Ok(());
        }

        // A plain scalar line: fine as a root value or a nested block value,
        // but not where a `- item` or `key: value` entry is required.
        match self.stack.last() {
            Some(frame) if frame.indent == indent => Err(ParseError::MalformedEntry {
                src: self.src(),
                span: (pos, text.len()).into(),
                expected: entry_shape(frame.kind).to_string(),
            }),
            _ => {
                self.queue.push_back(Event::new(
                    EventKind::Scalar(text.to_string()),
                    pos,
                    pos + text.len(),
                ));
                self.expect_child = false;
                if self.stack.is_empty() {
                    self.root_done = true;
                }
                Ok(())
            }
        }
    }

    /// Continues the block open at `indent`, or opens a new one.
    fn open_or_continue(
        &mut self,
        indent: usize,
        kind: FrameKind,
        pos: usize,
        text: &str,
    ) -> Result<(), ParseError> {
        match self.stack.last() {
            Some(frame) if frame.indent == indent => {
                if frame.kind != kind {
                    return Err(ParseError::MalformedEntry {
                        src: self.src(),
                        span: (pos, text.len()).into(),
                        expected: entry_shape(frame.kind).to_string(),
                    });
                }
                Ok(())
            }
            _ => {
                let start = match kind {
                    FrameKind::Sequence => EventKind::SequenceStart,
                    FrameKind::Mapping => EventKind::MappingStart,
                };
                self.queue.push_back(Event::new(start, pos, pos));
                self.stack.push(Frame { indent, kind });
                self.expect_child = false;
                Ok(())
            }
        }
    }

    fn close_top(&mut self, pos: usize) {
        if let Some(frame) = self.stack.pop() {
            let kind = match frame.kind {
                FrameKind::Sequence => EventKind::SequenceEnd,
                FrameKind::Mapping => EventKind::MappingEnd,
            };
            self.queue.push_back(Event::new(kind, pos, pos));
        }
    }

    /// Handles a `---` line. The first one opens the document; a later one
    /// closes it and opens another, which the tree builder rejects.
    fn document_separator(&mut self, pos: usize) {
        if self.doc_open {
            if let Some(pending) = self.pending.take() {
                self.queue.push_back(Event::new(
                    EventKind::Scalar(String::new()),
                    pending.pos,
                    pending.pos,
                ));
            }
            while !self.stack.is_empty() {
                self.close_top(pos);
            }
            self.queue
                .push_back(Event::new(EventKind::DocumentEnd, pos, pos));
        }
        self.queue
            .push_back(Event::new(EventKind::DocumentStart, pos, pos + 3));
        self.doc_open = true;
        self.root_done = false;
        self.expect_child = true;
    }

    /// Queues the closing events once the input is exhausted.
    fn finish(&mut self) {
        let end = self.input.len();
        if self.doc_open {
            if let Some(pending) = self.pending.take() {
                self.queue.push_back(Event::new(
                    EventKind::Scalar(String::new()),
                    pending.pos,
                    pending.pos,
                ));
            }
            while !self.stack.is_empty() {
                self.close_top(end);
            }
            self.queue
                .push_back(Event::new(EventKind::DocumentEnd, end, end));
        }
        self.queue
            .push_back(Event::new(EventKind::StreamEnd, end, end));
        self.state = State::Done;
    }
}

impl EventSource for Scanner<'_> {
    fn next_event(&mut self) -> Result<Event, ParseError> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Ok(event);
            }
            match self.state {
                State::Start => {
                    self.queue
                        .push_back(Event::new(EventKind::StreamStart, 0, 0));
                    self.state = State::Streaming;
                }
                State::Streaming => self.scan_line()?,
                State::Done => {
                    let end = self.input.len();
                    return Ok(Event::new(EventKind::StreamEnd, end, end));
                }
            }
        }
    }
}

fn entry_shape(kind: FrameKind) -> &'static str {
    match kind {
        FrameKind::Sequence => "a `- item` entry",
        FrameKind::Mapping => "a `key: value` entry",
    }
}

/// Splits a mapping entry at the first `:` that is followed by a space or
/// ends the line, so values like `10:30` or keys like `a:b` pass through
/// untouched. Returns `None` when the line is not a mapping entry.
fn split_mapping_entry(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(found) = text[from..].find(':') {
        let at = from + found;
        if at + 1 == bytes.len() || bytes[at + 1] == b' ' {
            let key = text[..at].trim_end();
            if key.is_empty() {
                return None;
            }
            let value = text[at + 1..].trim_start();
            return Some((key, value));
        }
        from = at + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<EventKind> {
        let mut scanner = Scanner::new(input);
        let mut kinds = Vec::new();
        loop {
            let event = scanner.next_event().expect("scan failed");
            let done = event.kind == EventKind::StreamEnd;
            kinds.push(event.kind);
            if done {
                break;
            }
        }
        kinds
    }

    fn scan_err(input: &str) -> ParseError {
        let mut scanner = Scanner::new(input);
        loop {
            match scanner.next_event() {
                Ok(event) if event.kind == EventKind::StreamEnd => {
                    panic!("expected a scan error for {input:?}")
                }
                Ok(_) => continue,
                Err(err) => return err,
            }
        }
    }

    fn scalar(text: &str) -> EventKind {
        EventKind::Scalar(text.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            scan(""),
            vec![EventKind::StreamStart, EventKind::StreamEnd]
        );
    }

    #[test]
    fn test_flat_mapping() {
        assert_eq!(
            scan("a: 1\nb: 2\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                EventKind::MappingStart,
                scalar("a"),
                scalar("1"),
                scalar("b"),
                scalar("2"),
                EventKind::MappingEnd,
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_flat_sequence() {
        assert_eq!(
            scan("- one\n- two\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                EventKind::SequenceStart,
                scalar("one"),
                scalar("two"),
                EventKind::SequenceEnd,
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_nested_mapping() {
        assert_eq!(
            scan("person:\n  name: John Doe\n  age: 30\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                EventKind::MappingStart,
                scalar("person"),
                EventKind::MappingStart,
                scalar("name"),
                scalar("John Doe"),
                scalar("age"),
                scalar("30"),
                EventKind::MappingEnd,
                EventKind::MappingEnd,
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_sequence_under_key() {
        assert_eq!(
            scan("person:\n  - Name 1\n  - Name 2\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                EventKind::MappingStart,
                scalar("person"),
                EventKind::SequenceStart,
                scalar("Name 1"),
                scalar("Name 2"),
                EventKind::SequenceEnd,
                EventKind::MappingEnd,
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_root_scalar() {
        assert_eq!(
            scan("just a value\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                scalar("just a value"),
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_key_with_no_value_yields_empty_scalar() {
        assert_eq!(
            scan("a:\nb: 2\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                EventKind::MappingStart,
                scalar("a"),
                scalar(""),
                scalar("b"),
                scalar("2"),
                EventKind::MappingEnd,
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_compact_mapping_in_sequence_entry() {
        assert_eq!(
            scan("- name: a\n  age: 1\n- name: b\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                EventKind::SequenceStart,
                EventKind::MappingStart,
                scalar("name"),
                scalar("a"),
                scalar("age"),
                scalar("1"),
                EventKind::MappingEnd,
                EventKind::MappingStart,
                scalar("name"),
                scalar("b"),
                EventKind::MappingEnd,
                EventKind::SequenceEnd,
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_blank_lines_and_trailing_spaces_skipped() {
        assert_eq!(
            scan("a: 1  \n\n   \nb: 2\n"),
            scan("a: 1\nb: 2\n")
        );
    }

    #[test]
    fn test_colon_inside_value_is_not_a_split_point() {
        assert_eq!(
            scan("time: 10:30\n"),
            vec![
                EventKind::StreamStart,
                EventKind::DocumentStart,
                EventKind::MappingStart,
                scalar("time"),
                scalar("10:30"),
                EventKind::MappingEnd,
                EventKind::DocumentEnd,
                EventKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn test_second_document_surfaces_both_document_starts() {
        let kinds = scan("a: 1\n---\nb: 2\n");
        let starts = kinds
            .iter()
            .filter(|k| **k == EventKind::DocumentStart)
            .count();
        assert_eq!(starts, 2);
    }

    #[test]
    fn test_tab_indentation_is_an_error() {
        assert!(matches!(
            scan_err("a:\n\tb: 1\n"),
            ParseError::TabIndentation { .. }
        ));
    }

    #[test]
    fn test_bad_indentation_is_an_error() {
        assert!(matches!(
            scan_err("a: 1\n    b: 2\n"),
            ParseError::BadIndentation { .. }
        ));
    }

    #[test]
    fn test_scalar_line_inside_mapping_is_an_error() {
        assert!(matches!(
            scan_err("a: 1\nloose scalar\n"),
            ParseError::MalformedEntry { .. }
        ));
    }

    #[test]
    fn test_content_after_root_scalar_is_an_error() {
        assert!(matches!(
            scan_err("root\nmore\n"),
            ParseError::TrailingContent { .. }
        ));
    }

    #[test]
    fn test_mixing_entry_shapes_is_an_error() {
        assert!(matches!(
            scan_err("a: 1\n- item\n"),
            ParseError::MalformedEntry { .. }
        ));
    }
}
