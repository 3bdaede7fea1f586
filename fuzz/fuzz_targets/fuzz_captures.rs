#![no_main]

use libfuzzer_sys::{fuzz_target, Corpus};

// Matching is exponential in the worst case, so keep inputs small enough
// that a slow case is still a finding rather than a timeout.
const MAX_PATTERN_LEN: usize = 32;
const MAX_HAYSTACK_LEN: usize = 128;

#[derive(arbitrary::Arbitrary, Eq, PartialEq)]
struct FuzzData {
    pattern: Vec<u8>,
    haystack: Vec<u8>,
}

impl std::fmt::Debug for FuzzData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use bstr::ByteSlice;

        let mut builder = f.debug_struct("FuzzData");
        builder.field("pattern", &self.pattern.as_bstr());
        builder.field("haystack", &self.haystack.as_bstr());
        builder.finish()
    }
}

fuzz_target!(|data: FuzzData| -> Corpus {
    let _ = env_logger::try_init();

    if data.pattern.len() > MAX_PATTERN_LEN
        || data.haystack.len() > MAX_HAYSTACK_LEN
    {
        return Corpus::Reject;
    }
    let Ok(v) = regex_recursive::validate(&data.pattern) else {
        return Corpus::Reject;
    };
    let m = regex_recursive::find(&data.pattern, &data.haystack);
    let caps = regex_recursive::captures(&data.pattern, &data.haystack);
    assert_eq!(m, caps.as_ref().and_then(|c| c.get_match()));
    if let Some(caps) = caps {
        assert_eq!(v.captures_len(), caps.len());
        for cap in caps.iter().flatten() {
            assert!(cap.end() <= data.haystack.len());
        }
        if let (Some(len), Some(m)) = (v.fixed_len(), m) {
            assert_eq!(len, m.len());
        }
    }
    for m in regex_recursive::find_iter(&data.pattern, &data.haystack) {
        assert!(m.end() <= data.haystack.len());
    }
    Corpus::Keep
});
