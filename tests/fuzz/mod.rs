#[test]
fn many_zero_to_many_reps() {
    let pat = format!(".{}", "*".repeat(1 << 15));
    assert!(regex_recursive::validate(&pat).is_err());
    assert!(!regex_recursive::is_match(&pat, ""));
}

#[test]
fn deeply_nested_groups() {
    let pat = format!("{}a{}", "(".repeat(64), ")".repeat(64));
    let caps = regex_recursive::captures(&pat, "xa").unwrap();
    assert_eq!(65, caps.len());
    assert!(caps.iter().all(|m| m.map(|m| m.range()) == Some(1..2)));
}

#[test]
fn unbalanced_input() {
    assert_eq!(None, run(b"\x03((((a"));
    assert_eq!(None, run(b"\x01)a"));
    assert_eq!(Some(()), run(b"\x02a*a"));
}

// This is the fuzz target function. We duplicate it here since this is the
// thing we use to interpret the data. It is ultimately what we want to
// succeed.
fn run(data: &[u8]) -> Option<()> {
    if data.len() < 2 {
        return None;
    }
    let mut split_at = usize::from(data[0]);
    let data = &data[1..];
    split_at = std::cmp::max(split_at, 1) % data.len();
    let (pattern, haystack) = data.split_at(split_at);
    regex_recursive::validate(pattern).ok()?;
    let m = regex_recursive::find(pattern, haystack);
    assert_eq!(m.is_some(), regex_recursive::is_match(pattern, haystack));
    Some(())
}
