use {
    quickcheck::{Arbitrary, Gen, QuickCheck, Testable},
    regex_recursive::{
        captures, captures_read, captures_read_at, escape, find, find_at,
        find_iter, is_match, validate, Capture,
    },
};

fn qc<T: Testable>(t: T) {
    QuickCheck::new().tests(2_000).max_tests(4_000).quickcheck(t);
}

#[test]
fn empty_pattern_matches_everything() {
    assert_eq!(Some(Capture::new(0, 0)), find("", ""));
    assert_eq!(Some(Capture::new(0, 0)), find("", "abc"));
    assert_eq!(Some(Capture::new(2, 0)), find_at("", "abc", 2));
    assert!(is_match("", b"\xFF"));
}

#[test]
fn validate_counts_groups() {
    assert!(validate("a{").is_err());
    assert_eq!(2, validate("(a)").unwrap().captures_len());
    assert_eq!(4, validate("((.*)* (a))").unwrap().captures_len());
    assert_eq!(1, validate("[()]*").unwrap().captures_len());
    assert_eq!(2, validate("()*").unwrap().captures_len());
    assert_eq!(0, validate("(?:a)").unwrap().group_len());
}

#[test]
fn validate_error_offsets() {
    let err = validate("a{").unwrap_err();
    assert_eq!(1, err.offset());
    assert_eq!(
        format!("{} (at offset 1)", err.message()),
        err.to_string(),
    );
    assert_eq!(2, validate("ab)").unwrap_err().offset());
    assert_eq!(1, validate("x(a").unwrap_err().offset());
    assert_eq!(1, validate("a^").unwrap_err().offset());
}

#[test]
fn alternation_sets_only_winner() {
    let caps = captures("(foo)|(bar)|(baz)", "a bar b").unwrap();
    assert_eq!(4, caps.len());
    assert_eq!(Some(Capture::new(2, 3)), caps.get_match());
    assert_eq!(None, caps.get(1));
    assert_eq!(Some(Capture::new(2, 3)), caps.get(2));
    assert_eq!(None, caps.get(3));
}

#[test]
fn failed_branch_does_not_keep_old_capture() {
    let star = captures(r"(?:b|x(a))*", "xab").unwrap();
    let two = captures(r"(?:b|x(a)){2}", "xab").unwrap();
    let swapped = captures(r"(?:x(a)|b){2}", "xab").unwrap();
    assert_eq!(Some(Capture::new(0, 3)), two.get_match());
    assert_eq!(None, two.get(1));
    assert_eq!(star, two);
    assert_eq!(swapped, two);
}

#[test]
fn counted_repetition_policies() {
    assert_eq!(Some(Capture::new(0, 9)), find(r"\d{2,}.", "123456789"));
    assert_eq!(Some(Capture::new(0, 3)), find(r"\d{2,}?.", "123456789"));
}

#[test]
fn repeated_group_records_first() {
    let caps = captures("((.) (.) ?)*", "a b c d e").unwrap();
    assert_eq!(Some(Capture::new(0, 8)), caps.get_match());
    assert_eq!(Some(Capture::new(0, 4)), caps.get(1));
    assert_eq!(Some(Capture::new(4, 1)), caps.get(2));
    assert_eq!(Some(Capture::new(6, 1)), caps.get(3));
}

#[test]
fn unmatched_group_is_unset() {
    let caps = captures("(.)*x", "x").unwrap();
    assert_eq!(Some(Capture::new(0, 1)), caps.get_match());
    assert_eq!(None, caps.get(1));
}

#[test]
fn escaped_end_anchor() {
    assert!(is_match(r"x\\$", r"ax\"));
    assert!(!is_match(r"x\\$", r"ax\b"));
    assert_eq!(Some(Capture::new(1, 1)), find(r"\$", "a$b"));
    assert_eq!(Some(Capture::new(1, 2)), find(r"\\\$", r"a\$b"));
}

#[test]
fn fresh_buffers_agree() {
    let pattern = "(a|ab)(c|bcd)(d*)";
    let mut first = vec![None; 4];
    let mut second = vec![Some(Capture::new(7, 7)); 4];
    assert!(captures_read(pattern, "abcd", &mut first));
    assert!(captures_read(pattern, "abcd", &mut second));
    assert_eq!(first, second);
}

#[test]
fn undersized_buffer() {
    let mut slots = [None; 2];
    assert!(captures_read("(a)(b)(c)", "abc", &mut slots));
    assert_eq!([Some(Capture::new(0, 3)), Some(Capture::new(0, 1))], slots);
    assert!(captures_read("(a)(b)(c)", "abc", &mut []));
}

#[test]
fn oversized_buffer() {
    let mut slots = [Some(Capture::new(9, 9)); 4];
    assert!(captures_read("(a)", "a", &mut slots));
    assert_eq!(
        [Some(Capture::new(0, 1)), Some(Capture::new(0, 1)), None, None],
        slots,
    );
}

#[test]
fn read_at_offset() {
    let mut slots = [None; 2];
    assert!(captures_read_at("(b+)", "abba bb", 3, &mut slots));
    assert_eq!(Some(Capture::new(5, 2)), slots[1]);
    assert!(!captures_read_at("^(a)", "aa", 1, &mut slots));
    assert_eq!([None, None], slots);
}

#[test]
fn invalid_patterns_never_match() {
    for pattern in ["(", ")", "[", "a{", "a**", r"\q", "a^", "(?i)a"] {
        assert!(!is_match(pattern, pattern), "{:?}", pattern);
        assert_eq!(None, captures(pattern, pattern), "{:?}", pattern);
        assert_eq!(0, find_iter(pattern, pattern).count(), "{:?}", pattern);
    }
}

#[test]
fn bytes_and_strings() {
    assert!(is_match(&b"a.c"[..], &b"a\xFFc"[..]));
    assert!(is_match(&String::from("b+"), "abbc"));
    assert!(!is_match(r"\w", "\u{2603}"));
}

#[test]
fn escape_literals() {
    assert_eq!(r"1\.5\*\(x\)", escape("1.5*(x)"));
    assert_eq!("snow\u{2603}", escape("snow\u{2603}"));
    assert!(is_match(&escape("a+b"), "a+b"));
    assert!(!is_match(&escape("a+b"), "aab"));
}

/// A short pattern built from a small vocabulary, so that searches stay
/// fast and matches are likely.
#[derive(Clone, Debug)]
struct Pattern(String);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        const ATOMS: &[&str] = &[
            "a", "b", ".", "[ab]", "[^a]", r"\d", r"\w", "(a)", "(?:ab)",
            "(a|b)",
        ];
        const QUANTS: &[&str] =
            &["", "", "*", "+", "?", "{2}", "{1,2}", "*?"];
        let mut pattern = String::new();
        for _ in 0..usize::arbitrary(g) % 5 {
            if !pattern.is_empty() && bool::arbitrary(g) && bool::arbitrary(g)
            {
                pattern.push('|');
            }
            pattern.push_str(g.choose(ATOMS).unwrap());
            pattern.push_str(g.choose(QUANTS).unwrap());
        }
        Pattern(pattern)
    }
}

/// A short haystack over the bytes that `Pattern` cares about.
#[derive(Clone, Debug)]
struct Haystack(String);

impl Arbitrary for Haystack {
    fn arbitrary(g: &mut Gen) -> Haystack {
        const CHARS: &[char] = &['a', 'b', '1', ' ', '_'];
        let len = usize::arbitrary(g) % 10;
        Haystack((0..len).map(|_| *g.choose(CHARS).unwrap()).collect())
    }
}

#[test]
fn matching_is_idempotent() {
    fn prop(Pattern(p): Pattern, Haystack(h): Haystack) -> bool {
        captures(&p, &h) == captures(&p, &h)
    }
    qc(prop as fn(Pattern, Haystack) -> bool);
}

#[test]
fn is_match_agrees_with_find() {
    fn prop(Pattern(p): Pattern, Haystack(h): Haystack) -> bool {
        let m = find(&p, &h);
        is_match(&p, &h) == m.is_some()
            && captures(&p, &h).and_then(|caps| caps.get_match()) == m
            && find_iter(&p, &h).next() == m
    }
    qc(prop as fn(Pattern, Haystack) -> bool);
}

#[test]
fn matches_are_in_bounds() {
    fn prop(Pattern(p): Pattern, Haystack(h): Haystack) -> bool {
        let mut last = 0;
        for m in find_iter(&p, &h) {
            if m.start() < last || m.end() > h.len() {
                return false;
            }
            last = m.end();
        }
        true
    }
    qc(prop as fn(Pattern, Haystack) -> bool);
}

#[test]
fn escaped_text_matches_itself() {
    fn prop(text: String) -> bool {
        is_match(&format!("^{}$", escape(&text)), &text)
    }
    qc(prop as fn(String) -> bool);
}
