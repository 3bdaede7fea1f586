#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = run(data);
});

fn run(data: &[u8]) -> Option<()> {
    if data.len() < 2 {
        return None;
    }
    let mut split_at = usize::from(data[0]);
    let data = &data[1..];
    // Split data into a pattern and haystack to search.
    split_at = std::cmp::max(split_at, 1) % data.len();
    let (pattern, haystack) = data.split_at(split_at);
    regex_recursive::validate(pattern).ok()?;
    let m = regex_recursive::find(pattern, haystack);
    assert_eq!(m.is_some(), regex_recursive::is_match(pattern, haystack));
    Some(())
}
