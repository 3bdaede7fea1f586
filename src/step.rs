use crate::span::Span;

/// A single pattern unit that matches exactly one byte of text.
///
/// Every step is a pure predicate over one byte. Repetition of a step is
/// handled by the quantifier engine, never by the step itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step<'p> {
    /// `.`, which matches any byte, including `\n`.
    Any,
    /// A byte that stands for itself.
    Byte(u8),
    /// A meta character escaped with a `\`, e.g., `\*`.
    Escaped(u8),
    /// One of `\d`, `\D`, `\s`, `\S`, `\w` or `\W`.
    Class(Builtin),
    /// A bracketed class like `[a-z_]` or `[^0-9]`. `members` is everything
    /// between the brackets, excluding the negation `^` and the closing `]`.
    /// It has already been checked by the scanner.
    Set { members: Span<'p>, negated: bool },
}

impl<'p> Step<'p> {
    pub(crate) fn is_match(&self, byte: u8) -> bool {
        match *self {
            Step::Any => true,
            Step::Byte(b) | Step::Escaped(b) => b == byte,
            Step::Class(class) => class.is_match(byte),
            Step::Set { members, negated } => {
                set_contains(members, byte) != negated
            }
        }
    }
}

/// The built-in ASCII classes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Builtin {
    Digit,
    NotDigit,
    Space,
    NotSpace,
    Word,
    NotWord,
}

impl Builtin {
    /// Returns the class named by the byte following a `\`, if any.
    pub(crate) fn from_escape(b: u8) -> Option<Builtin> {
        let class = match b {
            b'd' => Builtin::Digit,
            b'D' => Builtin::NotDigit,
            b's' => Builtin::Space,
            b'S' => Builtin::NotSpace,
            b'w' => Builtin::Word,
            b'W' => Builtin::NotWord,
            _ => return None,
        };
        Some(class)
    }

    fn is_match(self, byte: u8) -> bool {
        match self {
            Builtin::Digit => byte.is_ascii_digit(),
            Builtin::NotDigit => !byte.is_ascii_digit(),
            Builtin::Space => is_space(byte),
            Builtin::NotSpace => !is_space(byte),
            Builtin::Word => is_word(byte),
            Builtin::NotWord => !is_word(byte),
        }
    }
}

/// `u8::is_ascii_whitespace` leaves out vertical tab, which `\s` includes.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

fn is_word(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Scans the members of a bracketed class for `byte`.
///
/// Members are single bytes, escaped bytes or ranges `x-y`. A `-` that is
/// the last member is a literal. The scanner has already rejected malformed
/// classes, so every escape here is complete.
fn set_contains(members: Span<'_>, byte: u8) -> bool {
    let mut i = 0;
    while i < members.len() {
        let (start, n) = member(members, i);
        i += n;
        let mut end = start;
        if members.get(i) == Some(b'-') && i + 1 < members.len() {
            let (e, n) = member(members, i + 1);
            end = e;
            i += 1 + n;
        }
        if start <= byte && byte <= end {
            return true;
        }
    }
    false
}

/// Decodes the class member at `i`, returning its byte and encoded length.
fn member(members: Span<'_>, i: usize) -> (u8, usize) {
    match members.get(i) {
        Some(b'\\') => (members.get(i + 1).unwrap_or(b'\\'), 2),
        Some(b) => (b, 1),
        None => (0, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(members: &[u8], negated: bool) -> Step<'_> {
        Step::Set { members: Span::new(members), negated }
    }

    #[test]
    fn builtins() {
        let digit = Step::Class(Builtin::Digit);
        assert!(digit.is_match(b'0'));
        assert!(digit.is_match(b'9'));
        assert!(!digit.is_match(b'a'));
        assert!(Step::Class(Builtin::NotDigit).is_match(b'a'));

        let space = Step::Class(Builtin::Space);
        for &b in b" \t\n\x0B\x0C\r" {
            assert!(space.is_match(b), "{:?}", b);
        }
        assert!(!space.is_match(b'x'));
        assert!(Step::Class(Builtin::NotSpace).is_match(b'x'));

        let word = Step::Class(Builtin::Word);
        assert!(word.is_match(b'_'));
        assert!(word.is_match(b'Z'));
        assert!(!word.is_match(b'-'));
        assert!(!word.is_match(0xE2));
        assert!(Step::Class(Builtin::NotWord).is_match(b'-'));
    }

    #[test]
    fn any_and_literals() {
        assert!(Step::Any.is_match(b'\n'));
        assert!(Step::Any.is_match(0xFF));
        assert!(Step::Byte(b'a').is_match(b'a'));
        assert!(!Step::Byte(b'a').is_match(b'A'));
        assert!(Step::Escaped(b'*').is_match(b'*'));
    }

    #[test]
    fn sets() {
        assert!(set(b"a-c", false).is_match(b'b'));
        assert!(!set(b"a-c", false).is_match(b'd'));
        assert!(set(b"a-c", true).is_match(b'd'));
        assert!(set(b"a-", false).is_match(b'-'));
        assert!(set(b"-a", false).is_match(b'-'));
        assert!(set(br"\]\-", false).is_match(b']'));
        assert!(set(br"\]\-", false).is_match(b'-'));
        assert!(set(br"!-\]", false).is_match(b'A'));
        assert!(set(b"()", false).is_match(b')'));
        assert!(!set(b"", false).is_match(b'a'));
        assert!(set(b"", true).is_match(b'a'));
    }
}
