/*!
This crate provides a small backtracking regex engine that matches patterns
directly from their text.

There is no compilation step. Every search re-reads the pattern while it
matches, and all of the state needed to backtrack lives on the call stack. As
a result, searching never allocates and there is nothing to cache between
searches. The price is speed: matching is exponential in the worst case.

# Example

This example shows how to find the captures of a pattern in some text:

```
use regex_recursive::{captures, Capture};

let caps = captures(r"(\d+)-(\d+)", "call 555-1234").unwrap();
assert_eq!(Some(Capture::new(5, 8)), caps.get_match());
assert_eq!(Some(Capture::new(5, 3)), caps.get(1));
assert_eq!(Some(Capture::new(9, 4)), caps.get(2));
```

Callers that want to avoid allocation entirely can size a slot buffer with
[`validate`] and use [`captures_read`].

# Syntax

Patterns are sequences of bytes. Everything works on bytes and every class
is ASCII only: `\w` never matches a byte of a multi-byte UTF-8 encoding.

```text
.           any byte, including \n
[xyz]       a class matching x, y or z
[^xyz]      a class matching any byte except x, y and z
[a-z]       a class range. Members may be escaped, e.g., [\]\-]
\d \D       ASCII digit, and its negation
\s \S       ASCII whitespace (space, \t, \n, \x0B, \x0C, \r), and its negation
\w \W       ASCII word byte [0-9A-Za-z_], and its negation
\*          a meta character matched literally. One of {}*?+()[]^$|.\

xy          x followed by y
x|y         x or y, whichever matches more text

x*  x+  x?  zero or more, one or more, zero or one of x
x{n}        exactly n of x
x{n,}       at least n of x
x{n,m}      at least n and at most m of x
x*? x{n,}?  ... the lazy version of any of the above

(x)         a capturing group
(?:x)       a non-capturing group

^x          x, only at the beginning of the text
x$          x, only at the end of the text
```

`^` and `$` are only recognized at the very beginning and end of a pattern.
A `$` preceded by an odd number of backslashes is escaped and matches a
literal `$`.

# Semantics

A search tries every starting position from left to right and reports the
first one at which the pattern matches. At a given position, an alternation
picks the branch that matches the *longest* text, with the earliest branch
winning ties.

When a capturing group is repeated, its capture records the span of its
*first* repetition. Groups nested inside of it record their last
repetition. A group that never participated in the match has no capture.

```
use regex_recursive::{captures, Capture};

let caps = captures("((.) (.) ?)*", "a b c d e").unwrap();
assert_eq!(Some(Capture::new(0, 8)), caps.get_match());
assert_eq!(Some(Capture::new(0, 4)), caps.get(1));

let caps = captures("(.)*x", "x").unwrap();
assert_eq!(None, caps.get(1));
```

# Errors

Only [`validate`] reports errors. Every other routine treats an invalid
pattern as one that never matches.

# Performance

Backtracking explores repetition counts one at a time, and repeated groups
try every possible length for each repetition. Nested unbounded repetitions
like `(a*)*b` take exponential time (and stack depth proportional to the
length of the text) on inputs that almost match. There is no memoization
and no way to cancel a search, so callers that handle untrusted patterns or
large texts must bound them first.

# Crate features

* **std** (enabled by default) - Implements `std::error::Error` for
[`Error`].
* **logging** - Emits `debug` and `trace` messages through the `log` crate.
*/

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs, rustdoc::broken_intra_doc_links)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("not supported on non-{32,64}, please file an issue");

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

pub use crate::{
    captures::{Capture, Captures},
    error::Error,
    search::{
        captures, captures_iter, captures_read, captures_read_at, find,
        find_at, find_iter, is_match, CapturesIter, Matches,
    },
    syntax::escape,
    validate::{validate, Validation},
};

#[macro_use]
mod macros;

mod captures;
mod error;
mod expr;
mod repeat;
mod search;
mod span;
mod step;
mod syntax;
mod validate;
