use crate::{
    captures::{self, Capture, Captures},
    expr::match_alternation,
    span::Span,
    syntax::Anchors,
    validate::validate,
};

/// Searches `text` for `pattern`, trying every starting position from
/// `start` onwards, and returns the leftmost match.
///
/// `slots` is cleared before searching. On success, slot `0` (if present)
/// is set to the whole match and the remaining slots are set for every
/// group that participated in it.
fn search(
    pattern: &[u8],
    text: &[u8],
    start: usize,
    slots: &mut [Option<Capture>],
) -> Option<Capture> {
    captures::clear(slots);
    if start > text.len() {
        return None;
    }
    let anchors = Anchors::strip(Span::new(pattern));
    let (whole, groups) = captures::split(slots, 1);
    let text = Span::new(text);
    let last = if anchors.start {
        if start > 0 {
            return None;
        }
        0
    } else {
        text.len()
    };
    for at in start..=last {
        trace!("trying {:?} at offset {}", anchors.body, at);
        let haystack = text.advance(at);
        if let Some(len) =
            match_alternation(anchors.body, haystack, groups, anchors.end)
        {
            let m = Capture::new(at, len);
            if let Some(slot) = whole.first_mut() {
                *slot = Some(m);
            }
            return Some(m);
        }
    }
    None
}

/// Returns true if and only if `pattern` matches somewhere in `text`.
///
/// A pattern that is not valid never matches. Use [`validate`] to find out
/// why a pattern is rejected.
///
/// # Example
///
/// ```
/// use regex_recursive::is_match;
///
/// assert!(is_match(r"\d+\.\d+", "version 1.25"));
/// assert!(!is_match(r"^\d+$", "version 1.25"));
/// assert!(is_match("", ""));
/// ```
pub fn is_match<P, T>(pattern: &P, text: &T) -> bool
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    search(pattern.as_ref(), text.as_ref(), 0, &mut []).is_some()
}

/// Returns the leftmost match of `pattern` in `text`, if one exists.
///
/// Among matches that start at the same position, alternations prefer the
/// branch that matches the most text.
///
/// # Example
///
/// ```
/// use regex_recursive::{find, Capture};
///
/// assert_eq!(Some(Capture::new(2, 3)), find("foo|bar|barn", "a bar b"));
/// assert_eq!(Some(Capture::new(2, 4)), find("foo|bar|barn", "a barn"));
/// ```
pub fn find<P, T>(pattern: &P, text: &T) -> Option<Capture>
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    find_at(pattern, text, 0)
}

/// Returns the leftmost match of `pattern` in `text` that starts at or
/// after `start`.
///
/// Offsets in the match returned are relative to all of `text`. A pattern
/// beginning with `^` only matches when `start` is `0`.
pub fn find_at<P, T>(pattern: &P, text: &T, start: usize) -> Option<Capture>
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    search(pattern.as_ref(), text.as_ref(), start, &mut [])
}

/// Searches `text` for `pattern` and writes the captures of the leftmost
/// match into `slots`.
///
/// Slot `0` receives the whole match and slot `i` receives capturing group
/// `i`. Every slot is cleared first, so groups that did not participate in
/// the match (and every slot, when there is no match) are left as `None`.
///
/// `slots` should have [`Validation::captures_len`](crate::Validation) many
/// elements. A shorter buffer is permitted: the groups that don't fit are
/// not recorded. A longer one has its extra slots cleared.
///
/// # Example
///
/// ```
/// use regex_recursive::{captures_read, validate, Capture};
///
/// let pattern = r"(\d+)-(\d+)";
/// let mut slots = vec![None; validate(pattern)?.captures_len()];
/// assert!(captures_read(pattern, "call 555-1234", &mut slots));
/// assert_eq!(Some(Capture::new(5, 3)), slots[1]);
/// assert_eq!(Some(Capture::new(9, 4)), slots[2]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn captures_read<P, T>(
    pattern: &P,
    text: &T,
    slots: &mut [Option<Capture>],
) -> bool
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    captures_read_at(pattern, text, 0, slots)
}

/// Like [`captures_read`], but only considers matches starting at or after
/// `start`.
pub fn captures_read_at<P, T>(
    pattern: &P,
    text: &T,
    start: usize,
    slots: &mut [Option<Capture>],
) -> bool
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    search(pattern.as_ref(), text.as_ref(), start, slots).is_some()
}

/// Returns the captures of the leftmost match of `pattern` in `text`.
///
/// This allocates a buffer sized for `pattern`. It returns `None` when there
/// is no match, including when `pattern` is invalid.
///
/// # Example
///
/// ```
/// use regex_recursive::{captures, Capture};
///
/// let caps = captures("(foo)|(bar)|(baz)", "a bar b").unwrap();
/// assert_eq!(Some(Capture::new(2, 3)), caps.get_match());
/// assert_eq!(None, caps.get(1));
/// assert_eq!(Some(Capture::new(2, 3)), caps.get(2));
/// assert_eq!(None, caps.get(3));
/// ```
pub fn captures<P, T>(pattern: &P, text: &T) -> Option<Captures>
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    let len = validate(pattern).ok()?.captures_len();
    let mut caps = Captures::with_len(len);
    if captures_read(pattern, text, caps.slots_mut()) {
        Some(caps)
    } else {
        None
    }
}

/// Returns an iterator over successive non-overlapping matches of `pattern`
/// in `text`.
///
/// # Example
///
/// ```
/// use regex_recursive::find_iter;
///
/// let text = "a1 b22 c333";
/// let words: Vec<&str> = find_iter(r"\d+", text)
///     .map(|m| &text[m.range()])
///     .collect();
/// assert_eq!(vec!["1", "22", "333"], words);
/// ```
pub fn find_iter<'p, 't, P, T>(pattern: &'p P, text: &'t T) -> Matches<'p, 't>
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    Matches { it: Cursor::new(pattern.as_ref(), text.as_ref()) }
}

/// Returns an iterator over the captures of successive non-overlapping
/// matches of `pattern` in `text`.
///
/// If `pattern` is invalid, the iterator is empty.
pub fn captures_iter<'p, 't, P, T>(
    pattern: &'p P,
    text: &'t T,
) -> CapturesIter<'p, 't>
where
    P: AsRef<[u8]> + ?Sized,
    T: AsRef<[u8]> + ?Sized,
{
    let pattern = pattern.as_ref();
    let mut it = Cursor::new(pattern, text.as_ref());
    let len = match validate(pattern) {
        Ok(v) => v.captures_len(),
        Err(_) => {
            it.done = true;
            0
        }
    };
    CapturesIter { it, len }
}

/// The search position shared by both match iterators.
#[derive(Clone, Debug)]
struct Cursor<'p, 't> {
    pattern: &'p [u8],
    text: &'t [u8],
    at: usize,
    last_end: Option<usize>,
    done: bool,
}

impl<'p, 't> Cursor<'p, 't> {
    fn new(pattern: &'p [u8], text: &'t [u8]) -> Cursor<'p, 't> {
        Cursor { pattern, text, at: 0, last_end: None, done: false }
    }

    fn advance(&mut self, slots: &mut [Option<Capture>]) -> Option<Capture> {
        while !self.done {
            let m = match search(self.pattern, self.text, self.at, slots) {
                None => {
                    self.done = true;
                    return None;
                }
                Some(m) => m,
            };
            if m.is_empty() {
                // Step past an empty match so that the next search makes
                // progress. Skip it entirely if it sits right where the
                // previous match ended.
                self.at = m.end() + 1;
                if self.last_end == Some(m.end()) {
                    continue;
                }
            } else {
                self.at = m.end();
            }
            self.last_end = Some(m.end());
            return Some(m);
        }
        None
    }
}

/// An iterator over non-overlapping matches.
///
/// This is created by [`find_iter`].
#[derive(Clone, Debug)]
pub struct Matches<'p, 't> {
    it: Cursor<'p, 't>,
}

impl<'p, 't> Iterator for Matches<'p, 't> {
    type Item = Capture;

    fn next(&mut self) -> Option<Capture> {
        self.it.advance(&mut [])
    }
}

impl<'p, 't> core::iter::FusedIterator for Matches<'p, 't> {}

/// An iterator over the captures of non-overlapping matches.
///
/// This is created by [`captures_iter`].
#[derive(Clone, Debug)]
pub struct CapturesIter<'p, 't> {
    it: Cursor<'p, 't>,
    len: usize,
}

impl<'p, 't> Iterator for CapturesIter<'p, 't> {
    type Item = Captures;

    fn next(&mut self) -> Option<Captures> {
        let mut caps = Captures::with_len(self.len);
        self.it.advance(caps.slots_mut())?;
        Some(caps)
    }
}

impl<'p, 't> core::iter::FusedIterator for CapturesIter<'p, 't> {}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    fn spans(pattern: &str, text: &str) -> Vec<(usize, usize)> {
        find_iter(pattern, text).map(|m| (m.start(), m.end())).collect()
    }

    #[test]
    fn leftmost_start_wins() {
        assert_eq!(Some(Capture::new(1, 2)), find("c|b+", "abbc"));
        assert_eq!(Some(Capture::new(0, 4)), find("b+|ab+c", "abbc"));
    }

    #[test]
    fn anchored_start() {
        assert_eq!(Some(Capture::new(0, 1)), find("^a", "aa"));
        assert_eq!(None, find_at("^a", "aa", 1));
        assert_eq!(Some(Capture::new(1, 1)), find_at("a", "aa", 1));
        assert_eq!(None, find_at("a", "aa", 3));
        assert_eq!(Some(Capture::new(2, 0)), find_at("", "aa", 2));
    }

    #[test]
    fn anchored_end() {
        assert_eq!(Some(Capture::new(1, 1)), find("a$", "aa"));
        assert_eq!(Some(Capture::new(3, 0)), find("$", "abc"));
        assert_eq!(None, find("^$", "abc"));
        assert_eq!(Some(Capture::new(0, 0)), find("^$", ""));
        assert!(is_match(r"x\\$", r"ax\"));
        assert!(!is_match(r"x\\$", r"x\y"));
        assert!(is_match(r"\$", "costs $5"));
    }

    #[test]
    fn iterates_non_overlapping() {
        assert_eq!(vec![(0, 1), (1, 2), (2, 3)], spans("a", "aaa"));
        assert_eq!(vec![(0, 0), (1, 4), (5, 5)], spans("a*", "baaab"));
        assert_eq!(vec![(0, 0), (1, 1), (2, 2)], spans("", "ab"));
        assert_eq!(vec![(0, 1)], spans("^a", "aaa"));
        assert!(spans("x", "aaa").is_empty());
    }

    #[test]
    fn iterates_captures() {
        let all: Vec<Captures> =
            captures_iter(r"(\w)=(\d)", "a=1 b=2").collect();
        assert_eq!(2, all.len());
        assert_eq!(Some(Capture::new(4, 3)), all[1].get_match());
        assert_eq!(Some(Capture::new(6, 1)), all[1].get(2));
        assert_eq!(0, captures_iter("(", "(").count());
    }

    #[test]
    fn slots_cleared_without_match() {
        let mut slots = [Some(Capture::new(0, 1)); 3];
        assert!(!captures_read("(a)(b)", "ac", &mut slots));
        assert_eq!([None; 3], slots);
    }
}
