/*!
Repetition drivers.

Every driver here receives the unit being repeated along with the rest of
the pattern that follows it, and succeeds only when some number of
repetitions followed by a match of the rest succeeds. Backtracking is done
by trying one repetition count after another, so the only state that exists
lives on the call stack.

All drivers uphold the same contract for capture slots: when they fail,
every slot they were given is left unset.
*/

use crate::{
    captures::{self, Capture},
    expr::{match_alternation, match_expression},
    span::Span,
    step::Step,
    syntax::{GroupFlags, Policy, Quantifier},
};

/// The part of a pattern that must match after a repetition.
pub(crate) struct Rest<'p, 's> {
    pub(crate) pattern: Span<'p>,
    pub(crate) slots: &'s mut [Option<Capture>],
    pub(crate) end_anchored: bool,
}

impl<'p, 's> Rest<'p, 's> {
    fn matches(&mut self, text: Span<'_>) -> Option<usize> {
        match_expression(self.pattern, text, self.slots, self.end_anchored)
    }
}

/// Matches `step` repeated according to `quant`, followed by `rest`.
///
/// On success, this returns the number of bytes consumed by both the
/// repetition and `rest`.
pub(crate) fn step(
    step: Step<'_>,
    quant: Quantifier,
    text: Span<'_>,
    rest: Rest<'_, '_>,
) -> Option<usize> {
    match quant.policy {
        Policy::Greedy => greedy_step(step, quant, text, rest),
        Policy::Lazy => lazy_step(step, quant, text, rest),
    }
}

fn greedy_step(
    step: Step<'_>,
    quant: Quantifier,
    text: Span<'_>,
    mut rest: Rest<'_, '_>,
) -> Option<usize> {
    let mut count = 0;
    while quant.allows(count)
        && text.get(count).map_or(false, |b| step.is_match(b))
    {
        count += 1;
    }
    if count < quant.min() {
        return None;
    }
    loop {
        if let Some(len) = rest.matches(text.advance(count)) {
            return Some(count + len);
        }
        if count == quant.min() {
            return None;
        }
        count -= 1;
    }
}

fn lazy_step(
    step: Step<'_>,
    quant: Quantifier,
    text: Span<'_>,
    mut rest: Rest<'_, '_>,
) -> Option<usize> {
    let is_match = |i: usize| text.get(i).map_or(false, |b| step.is_match(b));
    let mut count = 0;
    while count < quant.min() {
        if !is_match(count) {
            return None;
        }
        count += 1;
    }
    loop {
        if let Some(len) = rest.matches(text.advance(count)) {
            return Some(count + len);
        }
        if !quant.allows(count) || !is_match(count) {
            return None;
        }
        count += 1;
    }
}

/// A parenthesized sub-pattern along with its quantifier.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Group<'p> {
    pub(crate) body: Span<'p>,
    pub(crate) flags: GroupFlags,
    pub(crate) quant: Quantifier,
}

/// The outcome of a successful group repetition.
#[derive(Clone, Copy, Debug)]
struct Repeat {
    /// The number of bytes consumed by every repetition and the rest of
    /// the pattern.
    len: usize,
    /// The length of the repetition made at this depth, or `None` if this
    /// depth matched the rest of the pattern without repeating the group.
    first: Option<usize>,
}

/// Matches `group` repeated according to its quantifier, followed by `rest`.
///
/// `slots` are the slots belonging to the group: its own slot first when it
/// is capturing, followed by the slots of every group nested inside of it.
///
/// When the group is capturing, its own slot is set to the span of its
/// *first* repetition. Later repetitions never overwrite it. Groups nested
/// inside the body keep whatever their last repetition recorded.
pub(crate) fn group(
    group: Group<'_>,
    text: Span<'_>,
    slots: &mut [Option<Capture>],
    mut rest: Rest<'_, '_>,
) -> Option<usize> {
    captures::clear(slots);
    let (own, inner) = match group.flags {
        GroupFlags::Capturing => {
            let (own, inner) = captures::split(slots, 1);
            (own.first_mut(), inner)
        }
        GroupFlags::NonCapturing => (None, slots),
    };
    let repeat = match group.quant.policy {
        Policy::Greedy => greedy_group(&group, 0, text, inner, &mut rest),
        Policy::Lazy => lazy_group(&group, 0, text, inner, &mut rest),
    }?;
    if let (Some(own), Some(first)) = (own, repeat.first) {
        *own = Some(Capture::new(text.start(), first));
    }
    Some(repeat.len)
}

/// Matches one repetition of the group's body against exactly all of `text`.
fn body(
    group: &Group<'_>,
    text: Span<'_>,
    inner: &mut [Option<Capture>],
) -> bool {
    match_alternation(group.body, text, inner, true) == Some(text.len())
}

/// Tries one more repetition of `group`, preferring the longest, after
/// `count` repetitions have already been made.
fn greedy_group(
    group: &Group<'_>,
    count: usize,
    text: Span<'_>,
    inner: &mut [Option<Capture>],
    rest: &mut Rest<'_, '_>,
) -> Option<Repeat> {
    if group.quant.allows(count) {
        for n in (0..=text.len()).rev() {
            if !body(group, text.prefix(n), inner) {
                continue;
            }
            if n == 0 {
                // Repeating an empty match changes nothing, so go straight
                // to the rest of the pattern.
                if let Some(len) = rest.matches(text) {
                    return Some(Repeat { len, first: Some(0) });
                }
                captures::clear(inner);
                continue;
            }
            let next = text.advance(n);
            if !group.quant.allows(count + 1) {
                // This repetition is the last one possible, so its captures
                // are already the ones to keep.
                if let Some(len) = rest.matches(next) {
                    return Some(Repeat { len: n + len, first: Some(n) });
                }
                captures::clear(inner);
                continue;
            }
            match greedy_group(group, count + 1, next, inner, rest) {
                Some(r) => {
                    if r.first.is_none() {
                        // The deeper call cleared the inner slots before
                        // matching the rest, so this repetition is the last
                        // one. Match it again to put its captures back.
                        body(group, text.prefix(n), inner);
                    }
                    return Some(Repeat { len: n + r.len, first: Some(n) });
                }
                None => captures::clear(inner),
            }
        }
    }
    if count < group.quant.min() {
        return None;
    }
    captures::clear(inner);
    rest.matches(text).map(|len| Repeat { len, first: None })
}

/// Tries to stop repeating `group`, and only if that fails, tries one more
/// repetition, preferring the shortest.
fn lazy_group(
    group: &Group<'_>,
    count: usize,
    text: Span<'_>,
    inner: &mut [Option<Capture>],
    rest: &mut Rest<'_, '_>,
) -> Option<Repeat> {
    let satisfied = count >= group.quant.min();
    if satisfied {
        if let Some(len) = rest.matches(text) {
            return Some(Repeat { len, first: None });
        }
    }
    if !group.quant.allows(count) {
        return None;
    }
    for n in 0..=text.len() {
        // Once the minimum is met, another empty repetition can't lead
        // anywhere that stopping didn't already reach.
        if n == 0 && satisfied {
            continue;
        }
        if !body(group, text.prefix(n), inner) {
            continue;
        }
        if n == 0 {
            if let Some(len) = rest.matches(text) {
                return Some(Repeat { len, first: Some(0) });
            }
            captures::clear(inner);
            continue;
        }
        match lazy_group(group, count + 1, text.advance(n), inner, rest) {
            Some(r) => return Some(Repeat { len: n + r.len, first: Some(n) }),
            None => captures::clear(inner),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(min: u32, max: Option<u32>, policy: Policy) -> Quantifier {
        Quantifier { min, max, policy }
    }

    fn step_len(
        step: Step<'_>,
        quant: Quantifier,
        text: &str,
        rest: &str,
    ) -> Option<usize> {
        let rest = Rest {
            pattern: Span::new(rest.as_bytes()),
            slots: &mut [],
            end_anchored: false,
        };
        super::step(step, quant, Span::new(text.as_bytes()), rest)
    }

    #[test]
    fn greedy_step_backs_off() {
        let digit = Step::Class(crate::step::Builtin::Digit);
        let q2 = q(2, None, Policy::Greedy);
        assert_eq!(Some(9), step_len(digit, q2, "123456789", "."));
        assert_eq!(Some(3), step_len(digit, q2, "123", "."));
        assert_eq!(None, step_len(digit, q2, "12", "."));
        assert_eq!(None, step_len(digit, q2, "1x", ""));
    }

    #[test]
    fn lazy_step_grows() {
        let digit = Step::Class(crate::step::Builtin::Digit);
        let q2 = q(2, None, Policy::Lazy);
        assert_eq!(Some(3), step_len(digit, q2, "123456789", "."));
        assert_eq!(Some(2), step_len(digit, q2, "123456789", ""));
        assert_eq!(Some(5), step_len(digit, q2, "1234a", "a"));
        let upto2 = q(0, Some(2), Policy::Lazy);
        assert_eq!(None, step_len(digit, upto2, "123a", "a"));
    }

    #[test]
    fn bounded_steps() {
        let a = Step::Byte(b'a');
        let greedy = |min, max| q(min, Some(max), Policy::Greedy);
        assert_eq!(Some(2), step_len(a, greedy(0, 2), "aaa", ""));
        assert_eq!(Some(0), step_len(a, greedy(0, 0), "aaa", ""));
        let lazy = q(1, Some(3), Policy::Lazy);
        assert_eq!(Some(1), step_len(a, lazy, "aaa", ""));
    }

    fn group_slots(
        body: &str,
        flags: GroupFlags,
        quant: Quantifier,
        text: &str,
        rest: &str,
        slots: &mut [Option<Capture>],
    ) -> Option<usize> {
        let group = Group { body: Span::new(body.as_bytes()), flags, quant };
        let rest = Rest {
            pattern: Span::new(rest.as_bytes()),
            slots: &mut [],
            end_anchored: false,
        };
        super::group(group, Span::new(text.as_bytes()), slots, rest)
    }

    #[test]
    fn greedy_group_records_first_repetition() {
        let mut slots = [None; 3];
        let len = group_slots(
            "(.) (.) ?",
            GroupFlags::Capturing,
            q(0, None, Policy::Greedy),
            "a b c d e",
            "",
            &mut slots,
        );
        assert_eq!(Some(8), len);
        assert_eq!(Some(Capture::new(0, 4)), slots[0]);
        assert_eq!(Some(Capture::new(4, 1)), slots[1]);
        assert_eq!(Some(Capture::new(6, 1)), slots[2]);
    }

    #[test]
    fn greedy_group_zero_repetitions() {
        let mut slots = [Some(Capture::new(9, 9))];
        let len = group_slots(
            ".",
            GroupFlags::Capturing,
            q(0, None, Policy::Greedy),
            "x",
            "x",
            &mut slots,
        );
        assert_eq!(Some(1), len);
        assert_eq!([None], slots);
    }

    #[test]
    fn empty_repetition_terminates() {
        let mut slots = [None];
        let len = group_slots(
            "",
            GroupFlags::Capturing,
            q(0, None, Policy::Greedy),
            "abc",
            "",
            &mut slots,
        );
        assert_eq!(Some(0), len);
        assert_eq!(Some(Capture::new(0, 0)), slots[0]);
    }

    #[test]
    fn lazy_group_prefers_fewer() {
        let mut slots = [None, None];
        let len = group_slots(
            "(a|b)",
            GroupFlags::NonCapturing,
            q(1, None, Policy::Lazy),
            "abab",
            "b",
            &mut slots,
        );
        assert_eq!(Some(2), len);
        assert_eq!(Some(Capture::new(0, 1)), slots[0]);
        assert_eq!(None, slots[1]);
    }

    #[test]
    fn failed_group_leaves_slots_unset() {
        let mut slots = [Some(Capture::new(1, 1)), Some(Capture::new(2, 2))];
        let len = group_slots(
            "(a)",
            GroupFlags::Capturing,
            q(2, Some(2), Policy::Greedy),
            "ab",
            "",
            &mut slots,
        );
        assert_eq!(None, len);
        assert_eq!([None, None], slots);
    }
}
