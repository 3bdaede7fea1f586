use alloc::string::String;

use crate::{
    error::Error,
    span::Span,
    step::{Builtin, Step},
};

// These are all of the errors that can occur while scanning a pattern.
//
// By convention, each message is used in exactly one place, so that a given
// message identifies which part of the scanner reported it. They are named so
// that tests can refer to them.
pub(crate) const ERR_ESCAPE_UNEXPECTED_EOF: &str =
    "saw start of escape sequence, but saw end of pattern before it finished";
pub(crate) const ERR_ESCAPE_UNRECOGNIZED: &str =
    "unrecognized escape sequence";
pub(crate) const ERR_CLASS_UNCLOSED: &str = "found unclosed character class";
pub(crate) const ERR_CLASS_INVALID_RANGE: &str =
    "invalid range in character class";
pub(crate) const ERR_CLASS_INVALID_ESCAPE: &str =
    "invalid escape sequence in character class";
pub(crate) const ERR_CLASS_UNOPENED: &str =
    "found closing ']' without matching '['";
pub(crate) const ERR_GROUP_UNCLOSED: &str =
    "found open group without closing ')'";
pub(crate) const ERR_GROUP_UNOPENED: &str =
    "found closing ')' without matching '('";
pub(crate) const ERR_GROUP_FLAGS_UNSUPPORTED: &str =
    "only the non-capturing '(?:' group prefix is supported";
pub(crate) const ERR_REP_SUB_MISSING: &str =
    "repetition operator must be applied to a sub-expression";
pub(crate) const ERR_COUNTED_REP_UNCLOSED: &str =
    "found unclosed counted repetition operator";
pub(crate) const ERR_COUNTED_REP_UNOPENED: &str =
    "found closing '}' without matching '{'";
pub(crate) const ERR_COUNTED_REP_INVALID: &str =
    "expected closing brace for counted repetition, but got something else";
pub(crate) const ERR_COUNTED_REP_INVALID_RANGE: &str =
    "found counted repetition with a min bigger than its max";
pub(crate) const ERR_DECIMAL_NO_DIGITS: &str =
    "expected decimal number, but found no digits";
pub(crate) const ERR_DECIMAL_INVALID: &str = "got invalid decimal number";
pub(crate) const ERR_ANCHOR_MISPLACED: &str =
    "'^' and '$' are only allowed at the start and end of a pattern";

/// Returns true if the given byte has special meaning in a pattern and must
/// be escaped to be matched literally.
pub(crate) fn is_meta(b: u8) -> bool {
    matches!(
        b,
        b'{' | b'}'
            | b'*'
            | b'?'
            | b'+'
            | b'('
            | b')'
            | b'['
            | b']'
            | b'^'
            | b'$'
            | b'|'
            | b'.'
            | b'\\'
    )
}

/// Escapes all meta characters in `text`.
///
/// The string returned may be safely used as a literal in a pattern.
///
/// # Example
///
/// ```
/// use regex_recursive::{escape, is_match};
///
/// let pattern = escape("1+1=2?");
/// assert_eq!(r"1\+1=2\?", pattern);
/// assert!(is_match(&pattern, "is 1+1=2?"));
/// ```
pub fn escape(text: &str) -> String {
    let mut buf = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() && is_meta(ch as u8) {
            buf.push('\\');
        }
        buf.push(ch);
    }
    buf
}

/// The repetition strategy of a quantifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Policy {
    /// Prefer as many repetitions as possible.
    Greedy,
    /// Prefer as few repetitions as possible. Spelled with a trailing `?`.
    Lazy,
}

/// A repetition operator attached to a unit.
///
/// A `max` of `None` means the repetition is unbounded. When `max` is
/// present, the scanner guarantees that `min <= max`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Quantifier {
    pub(crate) min: u32,
    pub(crate) max: Option<u32>,
    pub(crate) policy: Policy,
}

impl Quantifier {
    /// The quantifier of a unit without any repetition operator.
    pub(crate) const ONE: Quantifier =
        Quantifier { min: 1, max: Some(1), policy: Policy::Greedy };

    pub(crate) fn min(&self) -> usize {
        // OK because we require 32 or 64 bit targets, so every u32 fits
        // into a usize.
        self.min as usize
    }

    /// Returns true if a unit that has already been repeated `count` times
    /// may be repeated once more.
    pub(crate) fn allows(&self, count: usize) -> bool {
        self.max.map_or(true, |max| count < max as usize)
    }

    /// Returns the number of repetitions when the quantifier is not a range.
    pub(crate) fn exact(&self) -> Option<usize> {
        match self.max {
            Some(max) if max == self.min => Some(self.min()),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GroupFlags {
    Capturing,
    NonCapturing,
}

/// The thing a quantifier applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Atom<'p> {
    Step(Step<'p>),
    /// A parenthesized sub-pattern. `body` is everything between the
    /// parentheses (excluding any `?:` prefix) and `slots` is the number of
    /// capturing groups the group introduces, counting itself when it is
    /// capturing.
    Group { body: Span<'p>, flags: GroupFlags, slots: usize },
}

/// A single unit of a pattern: an atom followed by an optional quantifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Unit<'p> {
    pub(crate) atom: Atom<'p>,
    pub(crate) quant: Quantifier,
    /// The number of pattern bytes covered by the atom and its quantifier.
    pub(crate) len: usize,
}

impl<'p> Unit<'p> {
    /// The number of capture slots this unit occupies.
    pub(crate) fn slots(&self) -> usize {
        match self.atom {
            Atom::Step(_) => 0,
            Atom::Group { slots, .. } => slots,
        }
    }
}

/// Scans the unit at the beginning of `pattern`.
///
/// This returns `None` when `pattern` is at the end of a branch, i.e., when
/// it is empty or begins with `|` or `)`.
pub(crate) fn unit<'p>(pattern: Span<'p>) -> Result<Option<Unit<'p>>, Error> {
    let at = pattern.start();
    let (atom, len) = match pattern.first() {
        None | Some(b'|') | Some(b')') => return Ok(None),
        Some(b'(') => group(pattern)?,
        Some(b'[') => {
            let (step, len) = class(pattern)?;
            (Atom::Step(step), len)
        }
        Some(b'\\') => (Atom::Step(escape_sequence(pattern)?), 2),
        Some(b'.') => (Atom::Step(Step::Any), 1),
        Some(b'*') | Some(b'+') | Some(b'?') | Some(b'{') => {
            return Err(Error::new(ERR_REP_SUB_MISSING, at));
        }
        Some(b']') => return Err(Error::new(ERR_CLASS_UNOPENED, at)),
        Some(b'}') => return Err(Error::new(ERR_COUNTED_REP_UNOPENED, at)),
        Some(b'^') | Some(b'$') => {
            return Err(Error::new(ERR_ANCHOR_MISPLACED, at));
        }
        Some(b) => (Atom::Step(Step::Byte(b)), 1),
    };
    let (quant, quant_len) = quantifier(pattern.advance(len))?;
    Ok(Some(Unit { atom, quant, len: len + quant_len }))
}

/// Scans the branch at the beginning of `pattern`, returning its length and
/// the number of capturing groups in it.
///
/// A branch ends at the first `|` or `)` that is not nested inside of a
/// group or class, or at the end of the pattern.
pub(crate) fn branch(pattern: Span<'_>) -> Result<(usize, usize), Error> {
    let (mut len, mut slots) = (0, 0);
    while let Some(unit) = unit(pattern.advance(len))? {
        len += unit.len;
        slots += unit.slots();
    }
    Ok((len, slots))
}

/// Scans a sequence of `|` separated branches at the beginning of `pattern`,
/// returning their total length and the number of capturing groups in them.
///
/// This stops at an unnested `)` or at the end of the pattern.
pub(crate) fn alternation(pattern: Span<'_>) -> Result<(usize, usize), Error> {
    let (mut len, mut slots) = (0, 0);
    loop {
        let (n, s) = branch(pattern.advance(len))?;
        len += n;
        slots += s;
        if pattern.get(len) != Some(b'|') {
            return Ok((len, slots));
        }
        len += 1;
    }
}

/// Scans the group starting at the `(` at the beginning of `pattern`. The
/// length returned covers everything through the closing `)`.
fn group<'p>(pattern: Span<'p>) -> Result<(Atom<'p>, usize), Error> {
    debug_assert_eq!(Some(b'('), pattern.first());
    let (flags, open) = match (pattern.get(1), pattern.get(2)) {
        (Some(b'?'), Some(b':')) => (GroupFlags::NonCapturing, 3),
        (Some(b'?'), _) => {
            let at = pattern.start();
            return Err(Error::new(ERR_GROUP_FLAGS_UNSUPPORTED, at));
        }
        _ => (GroupFlags::Capturing, 1),
    };
    let inner = pattern.advance(open);
    let (len, mut slots) = alternation(inner)?;
    if inner.get(len) != Some(b')') {
        return Err(Error::new(ERR_GROUP_UNCLOSED, pattern.start()));
    }
    if flags == GroupFlags::Capturing {
        slots += 1;
    }
    let body = inner.prefix(len);
    Ok((Atom::Group { body, flags, slots }, open + len + 1))
}

/// Scans the bracketed class starting at the `[` at the beginning of
/// `pattern`. The length returned covers everything through the closing `]`.
fn class<'p>(pattern: Span<'p>) -> Result<(Step<'p>, usize), Error> {
    debug_assert_eq!(Some(b'['), pattern.first());
    let mut i = 1;
    let negated = pattern.get(i) == Some(b'^');
    if negated {
        i += 1;
    }
    let members_start = i;
    loop {
        let start = match pattern.get(i) {
            None => {
                return Err(Error::new(ERR_CLASS_UNCLOSED, pattern.start()))
            }
            Some(b']') => break,
            Some(_) => {
                let (b, n) = class_member(pattern, i)?;
                i += n;
                b
            }
        };
        // A '-' right before the closing bracket is a literal.
        if pattern.get(i) == Some(b'-')
            && !matches!(pattern.get(i + 1), None | Some(b']'))
        {
            let (end, n) = class_member(pattern, i + 1)?;
            if start > end {
                return Err(Error::new(
                    ERR_CLASS_INVALID_RANGE,
                    pattern.start() + i,
                ));
            }
            i += 1 + n;
        }
    }
    let members = pattern.advance(members_start).prefix(i - members_start);
    Ok((Step::Set { members, negated }, i + 1))
}

fn class_member(pattern: Span<'_>, i: usize) -> Result<(u8, usize), Error> {
    match pattern.get(i) {
        Some(b'\\') => match pattern.get(i + 1) {
            Some(b) if is_meta(b) || b == b'-' => Ok((b, 2)),
            Some(_) => {
                Err(Error::new(ERR_CLASS_INVALID_ESCAPE, pattern.start() + i))
            }
            None => Err(Error::new(ERR_CLASS_UNCLOSED, pattern.start())),
        },
        Some(b) => Ok((b, 1)),
        None => Err(Error::new(ERR_CLASS_UNCLOSED, pattern.start())),
    }
}

/// Scans the two byte escape sequence at the beginning of `pattern`.
fn escape_sequence<'p>(pattern: Span<'p>) -> Result<Step<'p>, Error> {
    debug_assert_eq!(Some(b'\\'), pattern.first());
    match pattern.get(1) {
        None => Err(Error::new(ERR_ESCAPE_UNEXPECTED_EOF, pattern.start())),
        Some(b) => {
            if let Some(class) = Builtin::from_escape(b) {
                Ok(Step::Class(class))
            } else if is_meta(b) {
                Ok(Step::Escaped(b))
            } else {
                Err(Error::new(ERR_ESCAPE_UNRECOGNIZED, pattern.start()))
            }
        }
    }
}

/// Scans the quantifier, if any, at the beginning of `pattern`.
///
/// When there is no quantifier, this returns `Quantifier::ONE` and a length
/// of zero.
pub(crate) fn quantifier(
    pattern: Span<'_>,
) -> Result<(Quantifier, usize), Error> {
    let (min, max, mut len) = match pattern.first() {
        Some(b'*') => (0, None, 1),
        Some(b'+') => (1, None, 1),
        Some(b'?') => (0, Some(1), 1),
        Some(b'{') => counted(pattern)?,
        _ => return Ok((Quantifier::ONE, 0)),
    };
    let mut policy = Policy::Greedy;
    if pattern.get(len) == Some(b'?') {
        policy = Policy::Lazy;
        len += 1;
    }
    Ok((Quantifier { min, max, policy }, len))
}

/// Scans one of `{m}`, `{m,}` or `{m,n}` at the beginning of `pattern`.
fn counted(pattern: Span<'_>) -> Result<(u32, Option<u32>, usize), Error> {
    debug_assert_eq!(Some(b'{'), pattern.first());
    let at = pattern.start();
    let (min, mut i) = decimal(pattern, 1)?;
    let max = match pattern.get(i) {
        Some(b'}') => Some(min),
        Some(b',') => {
            i += 1;
            if pattern.get(i) == Some(b'}') {
                None
            } else {
                let (max, end) = decimal(pattern, i)?;
                i = end;
                Some(max)
            }
        }
        None => return Err(Error::new(ERR_COUNTED_REP_UNCLOSED, at)),
        Some(_) => return Err(Error::new(ERR_COUNTED_REP_INVALID, at + i)),
    };
    match pattern.get(i) {
        Some(b'}') => {}
        None => return Err(Error::new(ERR_COUNTED_REP_UNCLOSED, at)),
        Some(_) => return Err(Error::new(ERR_COUNTED_REP_INVALID, at + i)),
    }
    if max.map_or(false, |max| min > max) {
        return Err(Error::new(ERR_COUNTED_REP_INVALID_RANGE, at));
    }
    Ok((min, max, i + 1))
}

/// Parses the decimal number starting at `start`, returning it along with
/// the offset just past its last digit.
fn decimal(pattern: Span<'_>, start: usize) -> Result<(u32, usize), Error> {
    let mut i = start;
    let mut n: u32 = 0;
    while let Some(b) = pattern.get(i).filter(u8::is_ascii_digit) {
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(u32::from(b - b'0')))
            .ok_or_else(|| {
                Error::new(ERR_DECIMAL_INVALID, pattern.start() + start)
            })?;
        i += 1;
    }
    if i == start {
        return Err(match pattern.get(i) {
            None => Error::new(ERR_COUNTED_REP_UNCLOSED, pattern.start()),
            Some(_) => {
                Error::new(ERR_DECIMAL_NO_DIGITS, pattern.start() + start)
            }
        });
    }
    Ok((n, i))
}

/// A pattern with its anchors removed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Anchors<'p> {
    pub(crate) body: Span<'p>,
    /// Set when the pattern began with `^`.
    pub(crate) start: bool,
    /// Set when the pattern ended with an unescaped `$`.
    pub(crate) end: bool,
}

impl<'p> Anchors<'p> {
    /// Strips a leading `^` and a trailing unescaped `$` from `pattern`.
    ///
    /// A trailing `$` is escaped when it is preceded by an odd number of
    /// consecutive backslashes. With an even number (zero included), the
    /// backslashes escape each other and the `$` is an anchor.
    pub(crate) fn strip(pattern: Span<'p>) -> Anchors<'p> {
        let mut body = pattern;
        let mut end = false;
        if body.last() == Some(b'$') {
            let backslashes = body.bytes()[..body.len() - 1]
                .iter()
                .rev()
                .take_while(|&&b| b == b'\\')
                .count();
            if backslashes % 2 == 0 {
                end = true;
                body = body.shrink(1);
            }
        }
        let start = body.first() == Some(b'^');
        if start {
            body = body.advance(1);
        }
        Anchors { body, start, end }
    }
}
