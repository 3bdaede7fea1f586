use alloc::{vec, vec::Vec};

/// The span of text matched by a whole pattern or by one capturing group.
///
/// Offsets are byte offsets into the text that was searched, no matter where
/// the search started.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Capture {
    offset: usize,
    len: usize,
}

impl Capture {
    /// Create a new capture from its starting offset and length.
    #[inline]
    pub fn new(offset: usize, len: usize) -> Capture {
        Capture { offset, len }
    }

    /// Returns the byte offset at which the capture starts.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the length, in bytes, of the capture.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// An alias for `offset`.
    #[inline]
    pub fn start(&self) -> usize {
        self.offset
    }

    /// Returns the byte offset just past the end of the capture.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Returns true if and only if this capture is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capture as a range of byte offsets.
    #[inline]
    pub fn range(&self) -> core::ops::Range<usize> {
        self.start()..self.end()
    }

    /// Returns the bytes of `haystack` covered by this capture.
    ///
    /// # Panics
    ///
    /// This panics if the capture does not fall within `haystack`, which
    /// can only happen when `haystack` is not the text that was searched.
    #[inline]
    pub fn as_bytes<'h>(&self, haystack: &'h [u8]) -> &'h [u8] {
        &haystack[self.range()]
    }
}

impl core::fmt::Debug for Capture {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}..{}", self.start(), self.end())
    }
}

impl From<Capture> for core::ops::Range<usize> {
    fn from(m: Capture) -> core::ops::Range<usize> {
        m.range()
    }
}

/// An owned set of capture slots for a single match.
///
/// Slot `0` always corresponds to the whole match. Slot `i` for `i >= 1`
/// corresponds to the `i`th capturing group, numbered by the order of their
/// opening parentheses. A group that did not participate in the match has
/// no capture.
///
/// Values of this type are returned by [`captures`](crate::captures) and
/// [`captures_iter`](crate::captures_iter). Callers that want to avoid
/// allocation can size a `[Option<Capture>]` buffer themselves with
/// [`Validation::captures_len`](crate::Validation::captures_len) and use
/// [`captures_read`](crate::captures_read) instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Captures {
    slots: Vec<Option<Capture>>,
}

impl Captures {
    /// Create a new set of `len` empty slots.
    pub fn with_len(len: usize) -> Captures {
        Captures { slots: vec![None; len] }
    }

    /// Returns the total number of slots, including the one for the whole
    /// match.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the capture for the group at index `i`, if that group
    /// participated in the match.
    pub fn get(&self, i: usize) -> Option<Capture> {
        self.slots.get(i).copied().flatten()
    }

    /// Returns the capture for the whole match.
    pub fn get_match(&self) -> Option<Capture> {
        self.get(0)
    }

    /// Returns an iterator over every slot, in group order.
    pub fn iter(&self) -> impl Iterator<Item = Option<Capture>> + '_ {
        self.slots.iter().copied()
    }

    /// Returns every slot, in group order.
    pub fn slots(&self) -> &[Option<Capture>] {
        &self.slots
    }

    /// Returns every slot mutably, for use with
    /// [`captures_read`](crate::captures_read).
    pub fn slots_mut(&mut self) -> &mut [Option<Capture>] {
        &mut self.slots
    }
}

/// Resets every slot to "did not participate".
pub(crate) fn clear(slots: &mut [Option<Capture>]) {
    for slot in slots.iter_mut() {
        *slot = None;
    }
}

/// Splits `slots` at `n`, clamping to its length.
///
/// Buffers smaller than the number of groups in a pattern are permitted.
/// Groups whose slots fall off the end are matched but not recorded.
pub(crate) fn split(
    slots: &mut [Option<Capture>],
    n: usize,
) -> (&mut [Option<Capture>], &mut [Option<Capture>]) {
    let n = n.min(slots.len());
    slots.split_at_mut(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_accessors() {
        let m = Capture::new(2, 3);
        assert_eq!(2, m.start());
        assert_eq!(5, m.end());
        assert_eq!(2..5, m.range());
        assert!(!m.is_empty());
        assert!(Capture::new(4, 0).is_empty());
        assert_eq!(b"bar", m.as_bytes(b"a bar b"));
        assert_eq!("2..5", alloc::format!("{:?}", m));
    }

    #[test]
    fn split_clamps() {
        let mut slots = [Some(Capture::new(0, 1)), None];
        let (a, b) = split(&mut slots, 5);
        assert_eq!(2, a.len());
        assert!(b.is_empty());
        clear(a);
        assert_eq!([None, None], slots);
    }

    #[test]
    fn captures_get() {
        let mut caps = Captures::with_len(2);
        assert_eq!(2, caps.len());
        assert_eq!(None, caps.get_match());
        caps.slots_mut()[1] = Some(Capture::new(1, 1));
        assert_eq!(Some(Capture::new(1, 1)), caps.get(1));
        assert_eq!(None, caps.get(7));
        assert_eq!(2, caps.iter().count());
    }
}
