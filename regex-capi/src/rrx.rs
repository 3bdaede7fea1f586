use std::{ffi::CStr, slice};

use {
    libc::{c_char, ptrdiff_t, size_t},
    regex_recursive::Capture,
};

/// The span of a match or of a capturing group.
///
/// A group that did not participate in a match has an `offset` of `-1` and a
/// `len` of `0`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct rrx_capture {
    pub offset: ptrdiff_t,
    pub len: size_t,
}

const UNMATCHED: rrx_capture = rrx_capture { offset: -1, len: 0 };

impl From<Option<Capture>> for rrx_capture {
    fn from(m: Option<Capture>) -> rrx_capture {
        match m {
            None => UNMATCHED,
            Some(m) => rrx_capture {
                // Slices never exceed isize::MAX bytes.
                offset: m.offset() as ptrdiff_t,
                len: m.len(),
            },
        }
    }
}

/// Borrows a NUL-terminated string, without its terminator.
///
/// # Safety
///
/// `s` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_bytes<'a>(s: *const c_char) -> Option<&'a [u8]> {
    if s.is_null() {
        None
    } else {
        Some(CStr::from_ptr(s).to_bytes())
    }
}

/// Borrows `len` bytes starting at `s`.
///
/// # Safety
///
/// `s` must be null or point to `len` readable bytes that outlive `'a`.
unsafe fn len_bytes<'a>(s: *const u8, len: size_t) -> Option<&'a [u8]> {
    if s.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(s, len))
    }
}

/// Borrows the caller's capture buffer. A null buffer is an empty one.
///
/// # Safety
///
/// `caps` must be null or point to `len` writable `rrx_capture` values.
unsafe fn captures_buf<'a>(
    caps: *mut rrx_capture,
    len: size_t,
) -> &'a mut [rrx_capture] {
    if caps.is_null() {
        &mut []
    } else {
        slice::from_raw_parts_mut(caps, len)
    }
}

fn find(
    pattern: Option<&[u8]>,
    text: Option<&[u8]>,
    out: *mut rrx_capture,
) -> bool {
    let m = match (pattern, text) {
        (Some(pattern), Some(text)) => regex_recursive::find(pattern, text),
        _ => None,
    };
    if !out.is_null() {
        unsafe {
            *out = rrx_capture::from(m);
        }
    }
    m.is_some()
}

fn captures(
    pattern: Option<&[u8]>,
    text: Option<&[u8]>,
    out: &mut [rrx_capture],
) -> bool {
    for dst in out.iter_mut() {
        *dst = UNMATCHED;
    }
    let (pattern, text) = match (pattern, text) {
        (Some(pattern), Some(text)) => (pattern, text),
        _ => return false,
    };
    // The scratch buffer never needs more slots than the pattern has groups,
    // no matter how large a buffer the caller hands us.
    let len = match regex_recursive::validate(pattern) {
        Ok(v) => v.captures_len().min(out.len()),
        Err(_) => return false,
    };
    let mut slots = vec![None; len];
    if !regex_recursive::captures_read(pattern, text, &mut slots) {
        return false;
    }
    for (dst, slot) in out.iter_mut().zip(slots) {
        *dst = rrx_capture::from(slot);
    }
    true
}

fn validate(pattern: Option<&[u8]>, error_offset: *mut size_t) -> ptrdiff_t {
    let pattern = match pattern {
        None => return -1,
        Some(pattern) => pattern,
    };
    match regex_recursive::validate(pattern) {
        Ok(v) => v.captures_len() as ptrdiff_t,
        Err(err) => {
            if !error_offset.is_null() {
                unsafe {
                    *error_offset = err.offset();
                }
            }
            -1
        }
    }
}

ffi_fn! {
    fn rrx_is_match(pattern: *const c_char, text: *const c_char) -> bool {
        match unsafe { (c_bytes(pattern), c_bytes(text)) } {
            (Some(pattern), Some(text)) => {
                regex_recursive::is_match(pattern, text)
            }
            _ => false,
        }
    }
}

ffi_fn! {
    fn rrx_is_match_len(
        pattern: *const u8,
        pattern_len: size_t,
        text: *const u8,
        text_len: size_t,
    ) -> bool {
        let pattern = unsafe { len_bytes(pattern, pattern_len) };
        let text = unsafe { len_bytes(text, text_len) };
        match (pattern, text) {
            (Some(pattern), Some(text)) => {
                regex_recursive::is_match(pattern, text)
            }
            _ => false,
        }
    }
}

ffi_fn! {
    fn rrx_find(
        pattern: *const c_char,
        text: *const c_char,
        match_: *mut rrx_capture,
    ) -> bool {
        find(unsafe { c_bytes(pattern) }, unsafe { c_bytes(text) }, match_)
    }
}

ffi_fn! {
    fn rrx_find_len(
        pattern: *const u8,
        pattern_len: size_t,
        text: *const u8,
        text_len: size_t,
        match_: *mut rrx_capture,
    ) -> bool {
        let pattern = unsafe { len_bytes(pattern, pattern_len) };
        let text = unsafe { len_bytes(text, text_len) };
        find(pattern, text, match_)
    }
}

ffi_fn! {
    fn rrx_captures(
        pattern: *const c_char,
        text: *const c_char,
        caps: *mut rrx_capture,
        caps_len: size_t,
    ) -> bool {
        let out = unsafe { captures_buf(caps, caps_len) };
        captures(unsafe { c_bytes(pattern) }, unsafe { c_bytes(text) }, out)
    }
}

ffi_fn! {
    fn rrx_captures_len(
        pattern: *const u8,
        pattern_len: size_t,
        text: *const u8,
        text_len: size_t,
        caps: *mut rrx_capture,
        caps_len: size_t,
    ) -> bool {
        let pattern = unsafe { len_bytes(pattern, pattern_len) };
        let text = unsafe { len_bytes(text, text_len) };
        let out = unsafe { captures_buf(caps, caps_len) };
        captures(pattern, text, out)
    }
}

ffi_fn! {
    fn rrx_validate(
        pattern: *const c_char,
        error_offset: *mut size_t,
    ) -> ptrdiff_t {
        validate(unsafe { c_bytes(pattern) }, error_offset)
    }
}

ffi_fn! {
    fn rrx_validate_len(
        pattern: *const u8,
        pattern_len: size_t,
        error_offset: *mut size_t,
    ) -> ptrdiff_t {
        validate(unsafe { len_bytes(pattern, pattern_len) }, error_offset)
    }
}

#[cfg(test)]
mod tests {
    use std::{ffi::CString, ptr};

    use super::*;

    fn c(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    #[test]
    fn is_match() {
        assert!(rrx_is_match(c(r"\d+").as_ptr(), c("a1").as_ptr()));
        assert!(!rrx_is_match(c(r"^\d+").as_ptr(), c("a1").as_ptr()));
        assert!(!rrx_is_match(ptr::null(), c("a1").as_ptr()));
        assert!(!rrx_is_match(c("").as_ptr(), ptr::null()));

        let (pat, text) = (b"a.c", b"a\x00c");
        assert!(rrx_is_match_len(pat.as_ptr(), 3, text.as_ptr(), 3));
        assert!(!rrx_is_match_len(pat.as_ptr(), 3, ptr::null(), 3));
    }

    #[test]
    fn find() {
        let mut m = UNMATCHED;
        assert!(rrx_find(c("b+").as_ptr(), c("abbc").as_ptr(), &mut m));
        assert_eq!(rrx_capture { offset: 1, len: 2 }, m);
        assert!(!rrx_find(c("x").as_ptr(), c("abbc").as_ptr(), &mut m));
        assert_eq!(UNMATCHED, m);
        let none = ptr::null_mut();
        assert!(rrx_find(c("c").as_ptr(), c("abc").as_ptr(), none));

        let (pat, text) = (b"\x00", b"a\x00");
        assert!(rrx_find_len(pat.as_ptr(), 1, text.as_ptr(), 2, &mut m));
        assert_eq!(rrx_capture { offset: 1, len: 1 }, m);
    }

    #[test]
    fn captures() {
        let mut caps = [rrx_capture { offset: 9, len: 9 }; 4];
        let (pat, text) = (c("(foo)|(bar)|(baz)"), c("a bar b"));
        let p = caps.as_mut_ptr();
        assert!(rrx_captures(pat.as_ptr(), text.as_ptr(), p, 4));
        assert_eq!(
            [
                rrx_capture { offset: 2, len: 3 },
                UNMATCHED,
                rrx_capture { offset: 2, len: 3 },
                UNMATCHED,
            ],
            caps,
        );

        let text = c("a qux b");
        assert!(!rrx_captures(pat.as_ptr(), text.as_ptr(), p, 4));
        assert_eq!([UNMATCHED; 4], caps);

        let (pat, text) = (b"(a)(b)", b"ab");
        let p = caps.as_mut_ptr();
        assert!(rrx_captures_len(pat.as_ptr(), 6, text.as_ptr(), 2, p, 2));
        assert_eq!(rrx_capture { offset: 0, len: 1 }, caps[1]);
        assert!(rrx_captures_len(
            pat.as_ptr(),
            6,
            text.as_ptr(),
            2,
            ptr::null_mut(),
            0,
        ));
    }

    #[test]
    fn captures_oversized_buffer() {
        let mut caps = [rrx_capture { offset: 9, len: 9 }; 6];
        let (pat, text) = (c("x(a)"), c("xa"));
        let p = caps.as_mut_ptr();
        assert!(rrx_captures(pat.as_ptr(), text.as_ptr(), p, 6));
        assert_eq!(rrx_capture { offset: 0, len: 2 }, caps[0]);
        assert_eq!(rrx_capture { offset: 1, len: 1 }, caps[1]);
        assert_eq!([UNMATCHED; 4], caps[2..]);

        caps = [rrx_capture { offset: 9, len: 9 }; 6];
        let pat = c("x(a");
        let p = caps.as_mut_ptr();
        assert!(!rrx_captures(pat.as_ptr(), text.as_ptr(), p, 6));
        assert_eq!([UNMATCHED; 6], caps);
    }

    #[test]
    fn validate() {
        let mut offset = 0;
        assert_eq!(3, rrx_validate(c("(a)(b)").as_ptr(), &mut offset));
        assert_eq!(-1, rrx_validate(c("ab)").as_ptr(), &mut offset));
        assert_eq!(2, offset);
        assert_eq!(-1, rrx_validate(ptr::null(), ptr::null_mut()));

        let pat = b"a{";
        assert_eq!(-1, rrx_validate_len(pat.as_ptr(), 2, &mut offset));
        assert_eq!(1, offset);
        assert_eq!(1, rrx_validate_len(pat.as_ptr(), 1, ptr::null_mut()));
    }
}
