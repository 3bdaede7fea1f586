use crate::{
    captures::{self, Capture},
    repeat::{self, Group, Rest},
    span::Span,
    syntax::{self, Atom},
};

/// Matches a sequence of units, i.e., a single branch, at the start of
/// `text`.
///
/// The first unit is matched by one of the repetition drivers, which in turn
/// match everything after it by calling back into this function. On success,
/// this returns the number of bytes matched. When `end_anchored` is set, a
/// match must consume all of `text`.
///
/// A pattern that fails to scan never matches.
pub(crate) fn match_expression(
    pattern: Span<'_>,
    text: Span<'_>,
    slots: &mut [Option<Capture>],
    end_anchored: bool,
) -> Option<usize> {
    if pattern.is_empty() {
        return if end_anchored && !text.is_empty() { None } else { Some(0) };
    }
    let unit = match syntax::unit(pattern) {
        Ok(Some(unit)) => unit,
        Ok(None) | Err(_) => return None,
    };
    let pattern = pattern.advance(unit.len);
    match unit.atom {
        Atom::Step(step) => {
            let rest = Rest { pattern, slots, end_anchored };
            repeat::step(step, unit.quant, text, rest)
        }
        Atom::Group { body, flags, slots: len } => {
            let (mine, slots) = captures::split(slots, len);
            let group = Group { body, flags, quant: unit.quant };
            let rest = Rest { pattern, slots, end_anchored };
            repeat::group(group, text, mine, rest)
        }
    }
}

/// Matches `|` separated branches at the start of `text`.
///
/// Every branch is tried and the one matching the most bytes wins. Among
/// branches that match the same number of bytes, the earliest one wins.
/// Only the winning branch's groups have their slots set.
///
/// This stops at the end of `pattern`. Anything else that stops scanning
/// early, i.e., a `)` with no matching `(`, means the pattern never matches.
pub(crate) fn match_alternation(
    pattern: Span<'_>,
    text: Span<'_>,
    slots: &mut [Option<Capture>],
    end_anchored: bool,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    let (mut at, mut slot) = (0, 0);
    loop {
        let remaining = pattern.advance(at);
        let (len, groups) = match syntax::branch(remaining) {
            Ok(branch) => branch,
            Err(_) => {
                captures::clear(slots);
                return None;
            }
        };
        let (before, after) = captures::split(slots, slot);
        let (mine, _) = captures::split(after, groups);
        let branch = remaining.prefix(len);
        match match_expression(branch, text, mine, end_anchored) {
            Some(n) if best.map_or(true, |best| n > best) => {
                // Only the previous winner has anything to clear.
                captures::clear(before);
                best = Some(n);
            }
            // A branch can fail before reaching its groups, which leaves
            // them holding whatever an earlier repetition recorded.
            Some(_) | None => captures::clear(mine),
        }
        at += len;
        slot += groups;
        match pattern.get(at) {
            None => return best,
            Some(b'|') => at += 1,
            Some(_) => {
                captures::clear(slots);
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(
        pattern: &str,
        text: &str,
        slots: &mut [Option<Capture>],
    ) -> Option<usize> {
        let pattern = Span::new(pattern.as_bytes());
        match_alternation(pattern, Span::new(text.as_bytes()), slots, false)
    }

    #[test]
    fn empty_pattern() {
        let empty = Span::new(b"");
        assert_eq!(Some(0), match_expression(empty, empty, &mut [], true));
        let text = Span::new(b"abc");
        assert_eq!(Some(0), match_expression(empty, text, &mut [], false));
        assert_eq!(None, match_expression(empty, text, &mut [], true));
        let end = text.advance(3);
        assert_eq!(Some(0), match_expression(empty, end, &mut [], true));
    }

    #[test]
    fn longest_branch_wins() {
        let mut slots = [None; 3];
        assert_eq!(Some(3), alt("(foo)|(bar)|(baz)", "bar b", &mut slots));
        assert_eq!([None, Some(Capture::new(0, 3)), None], slots);

        let mut slots = [None; 2];
        assert_eq!(Some(3), alt("(a)|(abc)", "abcd", &mut slots));
        assert_eq!([None, Some(Capture::new(0, 3))], slots);

        let mut slots = [None; 2];
        assert_eq!(Some(3), alt("(abc)|(a)", "abcd", &mut slots));
        assert_eq!([Some(Capture::new(0, 3)), None], slots);
    }

    #[test]
    fn ties_go_to_earliest() {
        let mut slots = [None; 2];
        assert_eq!(Some(1), alt("(a)|(.)", "ab", &mut slots));
        assert_eq!([Some(Capture::new(0, 1)), None], slots);
    }

    #[test]
    fn nested_pipes_are_not_branches() {
        let mut slots = [None; 1];
        assert_eq!(Some(2), alt("x|a(b|c)|[|]", "ac", &mut slots));
        assert_eq!([Some(Capture::new(1, 1))], slots);
        assert_eq!(Some(1), alt("x|a(b|c)|[|]", "|", &mut slots));
        assert_eq!([None], slots);
    }

    #[test]
    fn failed_branch_clears_its_slots() {
        let mut slots = [Some(Capture::new(1, 1))];
        assert_eq!(Some(1), alt("b|x(a)", "b", &mut slots));
        assert_eq!([None], slots);

        let mut slots = [Some(Capture::new(1, 1))];
        assert_eq!(None, alt("y|x(a)", "b", &mut slots));
        assert_eq!([None], slots);
    }

    #[test]
    fn malformed_never_matches() {
        let mut slots = [Some(Capture::new(0, 1))];
        assert_eq!(None, alt("a)", "a)", &mut slots));
        assert_eq!([None], slots);
        assert_eq!(None, alt("(a", "a", &mut []));
        assert_eq!(None, alt("a|b{", "a", &mut []));
        assert_eq!(None, alt("a[", "a", &mut []));
    }
}
