//! Placeholder tokenizer.
//!
//! Patterns and renderings share one grammar: literal text with
//! placeholders delimited by `{{` and `}}`. The enclosed text, trimmed of
//! surrounding whitespace, is the placeholder's name. There is no escaping;
//! an open marker without a matching close marker is plain literal text.

/// Opening placeholder marker.
pub const OPEN_MARKER: &str = "{{";

/// Closing placeholder marker.
pub const CLOSE_MARKER: &str = "}}";

/// A placeholder located in a pattern or rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of the open marker
    pub start: usize,

    /// Byte offset just past the close marker
    pub end: usize,

    /// Name between the markers, whitespace trimmed
    pub name: String,
}

/// A piece of a tokenized pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// A pattern string together with its placeholder positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    placeholders: Vec<Placeholder>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let placeholders = find_placeholders(&source);
        Self {
            source,
            placeholders,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Placeholders in order of appearance.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// The placeholder whose open marker sits at byte offset `pos`, if any.
    pub fn placeholder_at(&self, pos: usize) -> Option<&Placeholder> {
        self.placeholders
            .binary_search_by_key(&pos, |placeholder| placeholder.start)
            .ok()
            .map(|index| &self.placeholders[index])
    }

    /// Split the pattern into literal and placeholder segments.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::with_capacity(self.placeholders.len() * 2 + 1);
        let mut literal_start = 0;

        for placeholder in &self.placeholders {
            if placeholder.start > literal_start {
                segments.push(Segment::Literal(
                    &self.source[literal_start..placeholder.start],
                ));
            }
            segments.push(Segment::Placeholder(&placeholder.name));
            literal_start = placeholder.end;
        }

        if literal_start < self.source.len() {
            segments.push(Segment::Literal(&self.source[literal_start..]));
        }

        segments
    }
}

/// Locate every well-formed placeholder in `source`.
///
/// Each open marker is paired with the first close marker after it. The
/// whole string is scanned, so a placeholder that ends the string is found.
pub fn find_placeholders(source: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = source[cursor..].find(OPEN_MARKER) {
        let start = cursor + offset;
        let name_start = start + OPEN_MARKER.len();

        let Some(close_offset) = source[name_start..].find(CLOSE_MARKER) else {
            break;
        };
        let name_end = name_start + close_offset;
        let end = name_end + CLOSE_MARKER.len();

        placeholders.push(Placeholder {
            start,
            end,
            name: source[name_start..name_end].trim().to_string(),
        });
        cursor = end;
    }

    placeholders
}
