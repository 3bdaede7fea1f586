/// An immutable view of a contiguous range of bytes in a buffer.
///
/// A span never owns the bytes it refers to. Every operation that narrows a
/// span (advancing its start, shrinking its end or taking a prefix) returns a
/// new span over the same buffer. Since a span remembers where it starts in
/// the underlying buffer, positions reported for text spans are always
/// absolute offsets, no matter how deep in the search they were produced.
///
/// All narrowing operations clamp to the bounds of the span, so a span can
/// never refer to bytes outside of its buffer.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct Span<'a> {
    buf: &'a [u8],
    start: usize,
    end: usize,
}

impl<'a> Span<'a> {
    /// Create a span covering all of the given buffer.
    pub(crate) fn new(buf: &'a [u8]) -> Span<'a> {
        Span { buf, start: 0, end: buf.len() }
    }

    /// The absolute offset at which this span begins.
    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the bytes in this span.
    pub(crate) fn bytes(&self) -> &'a [u8] {
        &self.buf[self.start..self.end]
    }

    /// Returns the byte at the given offset relative to the start of this
    /// span, if one exists.
    pub(crate) fn get(&self, i: usize) -> Option<u8> {
        self.bytes().get(i).copied()
    }

    pub(crate) fn first(&self) -> Option<u8> {
        self.get(0)
    }

    pub(crate) fn last(&self) -> Option<u8> {
        self.bytes().last().copied()
    }

    /// Drop `n` bytes from the front of this span.
    pub(crate) fn advance(self, n: usize) -> Span<'a> {
        Span { start: self.start + n.min(self.len()), ..self }
    }

    /// Drop `n` bytes from the back of this span.
    pub(crate) fn shrink(self, n: usize) -> Span<'a> {
        Span { end: self.end - n.min(self.len()), ..self }
    }

    /// Keep only the first `n` bytes of this span.
    pub(crate) fn prefix(self, n: usize) -> Span<'a> {
        Span { end: self.start + n.min(self.len()), ..self }
    }
}

impl<'a> core::fmt::Debug for Span<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}..{}:\"", self.start, self.end)?;
        for &b in self.bytes() {
            write!(f, "{}", core::ascii::escape_default(b))?;
        }
        write!(f, "\"")
    }
}
