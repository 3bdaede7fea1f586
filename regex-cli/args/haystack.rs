use std::path::PathBuf;

use {
    anyhow::Context,
    bstr::{BStr, BString, ByteSlice, ByteVec},
    lexopt::{Arg, Parser, ValueExt},
};

use crate::args::{Configurable, Usage};

/// Reads exactly one haystack, either inline via `-y/--haystack` or from a
/// file path given as a positional argument.
///
/// Giving more than one haystack is an error at configuration time. Giving
/// none is an error when the haystack is used.
#[derive(Debug, Default)]
pub struct Config {
    kind: Option<Kind>,
}

impl Config {
    /// Passes the haystack to `f`. A file is memory mapped rather than read
    /// onto the heap.
    pub fn with<T>(
        &self,
        mut f: impl FnMut(&BStr) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        match self.kind {
            Some(Kind::Inline(ref haystack)) => f(haystack.as_bstr()),
            Some(Kind::Path(ref path)) => {
                let file = std::fs::File::open(path).with_context(|| {
                    format!("failed to open {}", path.display())
                })?;
                // SAFETY: The haystack is only ever read as a slice of bytes.
                // Should another process modify the file while it is mapped,
                // a search may see inconsistent contents, but never anything
                // outside of the mapping.
                let mmap = unsafe {
                    memmap2::Mmap::map(&file).with_context(|| {
                        format!("failed to mmap {}", path.display())
                    })?
                };
                f(<&BStr>::from(&*mmap))
            }
            None => anyhow::bail!(
                "haystack is required via the -y/--haystack flag \
                 or via a positional argument",
            ),
        }
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('y') | Arg::Long("haystack") => {
                anyhow::ensure!(
                    self.kind.is_none(),
                    "only one haystack is allowed",
                );
                let hay = p.value().context("-y/--haystack needs a value")?;
                let hay = hay
                    .string()
                    .context("-y/--haystack must be valid UTF-8")?;
                let hay = Vec::unescape_bytes(&hay);
                self.kind = Some(Kind::Inline(BString::from(hay)));
            }
            Arg::Value(ref mut v) => {
                anyhow::ensure!(
                    self.kind.is_none(),
                    "only one haystack is allowed",
                );
                let path = PathBuf::from(std::mem::take(v));
                self.kind = Some(Kind::Path(path));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[Usage::new(
            "-y, --haystack <haystack>",
            "Provide an inline haystack on the command line.",
            r#"
The value of this flag is the haystack itself rather than a file path. This is
convenient for short searches.

The value must be valid UTF-8, but escape sequences are supported. For
example, "-y 'a\xFF\t'" searches the bytes 0x61 0xFF 0x09. Every class in a
pattern is ASCII only, so bytes like 0xFF only match '.', negated classes and
\D, \S or \W.

Exactly one haystack is permitted: either inline with this flag or as a file
path given as a positional argument.
"#,
        )];
        USAGES
    }
}

/// Where the haystack comes from. Files are read lazily so that they can be
/// memory mapped.
#[derive(Debug)]
enum Kind {
    Inline(BString),
    Path(PathBuf),
}
