use std::path::PathBuf;

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
};

use crate::args::{Configurable, Usage};

/// Reads patterns from the command line.
///
/// Patterns always come from the `-p/--pattern` and `-f/--pattern-file`
/// flags. In positional mode, every positional argument is a pattern too,
/// which suits commands like `rrx validate` that take nothing else.
#[derive(Debug, Default)]
pub struct Config {
    patterns: Vec<String>,
    fixed_strings: bool,
    positional: bool,
}

impl Config {
    /// A configuration that treats every positional argument as a pattern.
    pub fn positional() -> Config {
        Config { positional: true, ..Config::default() }
    }

    /// A configuration that only reads patterns from flags, leaving
    /// positional arguments to something else.
    pub fn only_flags() -> Config {
        Config::default()
    }

    /// Returns every pattern given, escaped when `-F/--fixed-strings` was
    /// set. This may be empty.
    pub fn get(&self) -> Vec<String> {
        if self.fixed_strings {
            self.patterns.iter().map(|p| regex_recursive::escape(p)).collect()
        } else {
            self.patterns.clone()
        }
    }

    /// Like `get`, but fails unless at least one pattern was given.
    pub fn get_nonempty(&self) -> anyhow::Result<Vec<String>> {
        let pats = self.get();
        anyhow::ensure!(
            !pats.is_empty(),
            "at least one pattern is required via -p/--pattern or \
             -f/--pattern-file",
        );
        Ok(pats)
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('p') | Arg::Long("pattern") => {
                let pat = p.value().context("-p/--pattern needs a value")?;
                let pat = pat
                    .string()
                    .context("-p/--pattern must be valid UTF-8")?;
                self.patterns.push(pat);
            }
            Arg::Short('F') | Arg::Long("fixed-strings") => {
                self.fixed_strings = true;
            }
            Arg::Short('f') | Arg::Long("pattern-file") => {
                let path =
                    PathBuf::from(p.value().context("-f/--pattern-file")?);
                let contents =
                    std::fs::read_to_string(&path).with_context(|| {
                        format!("failed to read {}", path.display())
                    })?;
                self.patterns.extend(contents.lines().map(|x| x.to_string()));
            }
            Arg::Value(ref mut v) if self.positional => {
                let v = std::mem::take(v);
                self.patterns
                    .push(v.string().context("patterns must be valid UTF-8")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[
            Usage::new(
                "-p, --pattern <pattern>",
                "Add a pattern to this command.",
                r#"
This adds a new pattern to the command.

Patterns are never combined. A command given several patterns runs each one
on its own, and labels its output with the index of the pattern, starting at
0, in the order the patterns were given.

All patterns given must be valid UTF-8.
"#,
            ),
            Usage::new(
                "-f, --pattern-file",
                "Read patterns from the file given.",
                r#"
Reads patterns, one per line, from the file given. They are added after any
patterns already given.

All patterns given must be valid UTF-8.
"#,
            ),
            Usage::new(
                "-F, --fixed-strings",
                "Interpret all patterns literally.",
                r#"
When set, all patterns are interpreted as literal strings. So for example,
meta characters like '+' are matched literally instead of being given special
significance.
"#,
            ),
        ];
        USAGES
    }
}
